//! Server settings.
//!
//! Sources, later ones overriding earlier ones: built-in defaults, the TOML
//! file named by `GONGHUN_CONFIG_FILE`, the bare `BASE_URL` and `LOG_LEVEL`
//! variables, then `GONGHUN_*` variables.
//!
//! ```toml
//! base_url = "https://e-gonghun.mpva.go.kr/opnAPI"
//! timeout_ms = 30000
//! cache_ttl_secs = 1800
//! ```

use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

mod validation;

pub use validation::ConfigError;

const ENV_PREFIX: &str = "GONGHUN_";
const CONFIG_FILE_VAR: &str = "GONGHUN_CONFIG_FILE";
/// Unprefixed variables still honored, below their `GONGHUN_*` forms.
const LEGACY_VARS: &[&str] = &["BASE_URL", "LOG_LEVEL"];

/// Settings for the open-data client, the cache and logging.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Base URL of the open-data API.
    ///
    /// Set via GONGHUN_BASE_URL environment variable.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Outbound request timeout in milliseconds.
    ///
    /// Set via GONGHUN_TIMEOUT_MS environment variable.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// How long a successful response stays cached, in seconds.
    ///
    /// Set via GONGHUN_CACHE_TTL_SECS environment variable.
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,

    /// User-Agent string for outbound requests.
    ///
    /// Set via GONGHUN_USER_AGENT environment variable.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Default tracing filter when RUST_LOG is unset.
    ///
    /// Set via GONGHUN_LOG_LEVEL environment variable.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_base_url() -> String {
    "https://e-gonghun.mpva.go.kr/opnAPI".into()
}

fn default_timeout_ms() -> u64 {
    30_000
}

fn default_cache_ttl_secs() -> u64 {
    crate::cache::DEFAULT_TTL_SECS as u64
}

fn default_user_agent() -> String {
    "gonghun-mcp/0.1".into()
}

fn default_log_level() -> String {
    "info".into()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_ms: default_timeout_ms(),
            cache_ttl_secs: default_cache_ttl_secs(),
            user_agent: default_user_agent(),
            log_level: default_log_level(),
        }
    }
}

impl AppConfig {
    /// Per-request timeout handed to the HTTP client.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Cache TTL as the chrono duration the cache compares ages against.
    ///
    /// # Errors
    ///
    /// `ConfigError::Invalid` when `cache_ttl_secs` does not fit a duration.
    pub fn cache_ttl(&self) -> Result<chrono::Duration, ConfigError> {
        i64::try_from(self.cache_ttl_secs)
            .ok()
            .and_then(chrono::Duration::try_seconds)
            .ok_or_else(|| validation::invalid("cache_ttl_secs", format!("{} seconds overflows", self.cache_ttl_secs)))
    }

    /// Merge defaults, the optional TOML file, the legacy variables and
    /// `GONGHUN_*` variables, then validate.
    ///
    /// # Errors
    ///
    /// `ConfigError::LoadFailed` when a source cannot be read or a value has
    /// the wrong type; `ConfigError::Invalid` when a value is out of range.
    pub fn load() -> Result<Self, ConfigError> {
        let file = std::env::var(CONFIG_FILE_VAR).ok();

        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(path) = &file {
            figment = figment.merge(Toml::file(path));
        }
        let config: Self = figment
            .merge(Env::raw().only(LEGACY_VARS).map(|key| key.as_str().to_lowercase().into()))
            .merge(Env::prefixed(ENV_PREFIX).map(|key| key.as_str().to_lowercase().into()))
            .extract()
            .map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;
        tracing::debug!(config_file = ?file, "configuration loaded");

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.base_url, "https://e-gonghun.mpva.go.kr/opnAPI");
        assert_eq!(config.timeout_ms, 30_000);
        assert_eq!(config.cache_ttl_secs, 1800);
        assert_eq!(config.user_agent, "gonghun-mcp/0.1");
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_durations() {
        let config = AppConfig::default();
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert_eq!(config.cache_ttl().unwrap(), chrono::Duration::minutes(30));
    }

    #[test]
    fn test_cache_ttl_overflow_is_invalid() {
        for secs in [u64::MAX, 10_000_000_000_000_000] {
            let config = AppConfig { cache_ttl_secs: secs, ..Default::default() };
            assert!(matches!(config.cache_ttl(), Err(ConfigError::Invalid { field, .. }) if field == "cache_ttl_secs"));
        }
    }

    #[test]
    fn test_load_rejects_oversized_ttl() {
        Jail::expect_with(|jail| {
            jail.set_env("GONGHUN_CACHE_TTL_SECS", "99999999999");
            assert!(matches!(AppConfig::load(), Err(ConfigError::Invalid { field, .. }) if field == "cache_ttl_secs"));
            Ok(())
        });
    }

    #[test]
    fn test_load_env_overrides() {
        Jail::expect_with(|jail| {
            jail.set_env("GONGHUN_BASE_URL", "http://localhost:9000/opnAPI");
            jail.set_env("GONGHUN_LOG_LEVEL", "debug");

            let config = AppConfig::load().map_err(|e| e.to_string())?;
            assert_eq!(config.base_url, "http://localhost:9000/opnAPI");
            assert_eq!(config.log_level, "debug");
            assert_eq!(config.timeout_ms, 30_000);
            Ok(())
        });
    }

    #[test]
    fn test_load_toml_file_then_env() {
        Jail::expect_with(|jail| {
            jail.create_file("gonghun.toml", "timeout_ms = 5000\ncache_ttl_secs = 60\n")?;
            jail.set_env("GONGHUN_CONFIG_FILE", "gonghun.toml");
            jail.set_env("GONGHUN_CACHE_TTL_SECS", "120");

            let config = AppConfig::load().map_err(|e| e.to_string())?;
            assert_eq!(config.timeout_ms, 5000);
            assert_eq!(config.cache_ttl_secs, 120);
            Ok(())
        });
    }

    #[test]
    fn test_load_legacy_names_below_prefixed() {
        Jail::expect_with(|jail| {
            jail.set_env("BASE_URL", "http://legacy.local/opnAPI");
            jail.set_env("LOG_LEVEL", "warn");

            let config = AppConfig::load().map_err(|e| e.to_string())?;
            assert_eq!(config.base_url, "http://legacy.local/opnAPI");
            assert_eq!(config.log_level, "warn");

            jail.set_env("GONGHUN_BASE_URL", "http://prefixed.local/opnAPI");
            let config = AppConfig::load().map_err(|e| e.to_string())?;
            assert_eq!(config.base_url, "http://prefixed.local/opnAPI");
            assert_eq!(config.log_level, "warn");
            Ok(())
        });
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        Jail::expect_with(|jail| {
            jail.set_env("GONGHUN_BASE_URL", "not a url");
            assert!(matches!(AppConfig::load(), Err(ConfigError::Invalid { .. })));
            Ok(())
        });
    }
}
