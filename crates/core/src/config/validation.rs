//! Post-load checks for `AppConfig`.

use std::ops::RangeInclusive;

use url::Url;

use crate::config::AppConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];
const TIMEOUT_RANGE_MS: RangeInclusive<u64> = 100..=300_000;
const CACHE_TTL_RANGE_SECS: RangeInclusive<u64> = 1..=30 * 86_400;

/// Why configuration could not be produced.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not load configuration: {0}")]
    LoadFailed(String),

    #[error("bad value for {field}: {reason}")]
    Invalid { field: String, reason: String },
}

pub(crate) fn invalid(field: &str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid { field: field.to_string(), reason: reason.into() }
}

impl AppConfig {
    /// Reject values the server cannot run with.
    ///
    /// `base_url` must be an absolute http(s) URL, `timeout_ms` within
    /// 100..=300000, `cache_ttl_secs` within one second to 30 days, `user_agent` non-blank and
    /// `log_level` a plain tracing level.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let base = Url::parse(&self.base_url).map_err(|e| invalid("base_url", e.to_string()))?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(invalid("base_url", format!("scheme {} is not http(s)", base.scheme())));
        }
        if self.base_url.ends_with('/') {
            tracing::warn!(base_url = %self.base_url, "trailing slash in base_url is ignored");
        }

        if !TIMEOUT_RANGE_MS.contains(&self.timeout_ms) {
            return Err(invalid(
                "timeout_ms",
                format!("{} is outside {}..={}", self.timeout_ms, TIMEOUT_RANGE_MS.start(), TIMEOUT_RANGE_MS.end()),
            ));
        }

        if !CACHE_TTL_RANGE_SECS.contains(&self.cache_ttl_secs) {
            return Err(invalid(
                "cache_ttl_secs",
                format!(
                    "{} is outside {}..={}",
                    self.cache_ttl_secs,
                    CACHE_TTL_RANGE_SECS.start(),
                    CACHE_TTL_RANGE_SECS.end()
                ),
            ));
        }

        if self.user_agent.trim().is_empty() {
            return Err(invalid("user_agent", "blank"));
        }

        let level = self.log_level.to_ascii_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(invalid("log_level", format!("{} is not one of {}", self.log_level, LOG_LEVELS.join("/"))));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rejected_field(config: AppConfig) -> String {
        match config.validate() {
            Err(ConfigError::Invalid { field, .. }) => field,
            other => panic!("expected an invalid field, got {other:?}"),
        }
    }

    #[test]
    fn test_defaults_are_valid() {
        assert!(AppConfig::default().validate().is_ok());
    }

    #[test]
    fn test_base_url_must_be_http() {
        let relative = AppConfig { base_url: "e-gonghun.mpva.go.kr/opnAPI".into(), ..Default::default() };
        assert_eq!(rejected_field(relative), "base_url");

        let ftp = AppConfig { base_url: "ftp://e-gonghun.mpva.go.kr/opnAPI".into(), ..Default::default() };
        assert_eq!(rejected_field(ftp), "base_url");

        let local = AppConfig { base_url: "http://127.0.0.1:8080/opnAPI/".into(), ..Default::default() };
        assert!(local.validate().is_ok());
    }

    #[test]
    fn test_timeout_bounds() {
        assert_eq!(rejected_field(AppConfig { timeout_ms: 99, ..Default::default() }), "timeout_ms");
        assert_eq!(rejected_field(AppConfig { timeout_ms: 300_001, ..Default::default() }), "timeout_ms");
        assert!(AppConfig { timeout_ms: 100, ..Default::default() }.validate().is_ok());
        assert!(AppConfig { timeout_ms: 300_000, ..Default::default() }.validate().is_ok());
    }

    #[test]
    fn test_ttl_bounds() {
        assert_eq!(rejected_field(AppConfig { cache_ttl_secs: 0, ..Default::default() }), "cache_ttl_secs");
        assert_eq!(rejected_field(AppConfig { cache_ttl_secs: 30 * 86_400 + 1, ..Default::default() }), "cache_ttl_secs");
        assert_eq!(rejected_field(AppConfig { cache_ttl_secs: u64::MAX, ..Default::default() }), "cache_ttl_secs");
        assert!(AppConfig { cache_ttl_secs: 1, ..Default::default() }.validate().is_ok());
        assert!(AppConfig { cache_ttl_secs: 30 * 86_400, ..Default::default() }.validate().is_ok());
    }

    #[test]
    fn test_blank_user_agent_rejected() {
        assert_eq!(rejected_field(AppConfig { user_agent: "  ".into(), ..Default::default() }), "user_agent");
    }

    #[test]
    fn test_log_level_case_insensitive() {
        assert!(AppConfig { log_level: "WARN".into(), ..Default::default() }.validate().is_ok());
        assert_eq!(rejected_field(AppConfig { log_level: "verbose".into(), ..Default::default() }), "log_level");
    }
}
