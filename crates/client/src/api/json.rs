//! Structured (JSON) response decoding.
//!
//! The API's JSON casing is not stable across endpoints, so keys are matched
//! ignoring case and underscores (`TOTAL_COUNT` and `totalCount` are the same
//! key). Item fields are stored in snake_case (`workoutAffil` becomes
//! `workout_affil`), the same `Record` shape the XML normalizer produces.

use gonghun_core::{Link, Record, Reference, ResultPage};
use serde_json::{Map, Value};

use crate::api::ApiError;

/// Decode a JSON payload into a `ResultPage`.
///
/// A top-level `error` member is returned as an error page rather than a
/// decode failure, so callers can tell upstream errors from garbage.
pub fn decode(payload: &str) -> Result<ResultPage, ApiError> {
    let value: Value = serde_json::from_str(payload).map_err(|e| ApiError::Parse(format!("invalid JSON: {e}")))?;
    let Value::Object(root) = value else {
        return Err(ApiError::Parse("expected a JSON object at the top level".into()));
    };

    if let Some(flag) = lookup(&root, "error")
        && !matches!(flag, Value::Null | Value::Bool(false))
    {
        let message = lookup(&root, "message")
            .map(text)
            .unwrap_or_else(|| "the API reported an error".to_string());
        return Ok(ResultPage::failed(message));
    }

    let mut page = ResultPage {
        total_count: count(&root, "totalcount")?,
        page_count: count(&root, "pagecount")?,
        page_index: count(&root, "pageindex")?,
        count_per_page: count(&root, "countperpage")?,
        item_count: count(&root, "itemcount")?,
        ..Default::default()
    };

    for item in unwrap_list(lookup(&root, "items"), "item") {
        let Value::Object(fields) = item else {
            return Err(ApiError::Parse(format!("expected an object per item, got {item}")));
        };
        page.items.push(record(fields));
    }

    Ok(page)
}

fn normalize_key(key: &str) -> String {
    key.chars()
        .filter(|c| *c != '_')
        .flat_map(char::to_lowercase)
        .collect()
}

/// `NAME_KO`, `nameKo` and `name_ko` all become `name_ko`.
fn snake_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    let mut prev_lower = false;
    for c in key.chars() {
        if c.is_uppercase() && prev_lower {
            out.push('_');
        }
        prev_lower = c.is_lowercase() || c.is_ascii_digit();
        out.extend(c.to_lowercase());
    }
    out
}

fn lookup<'a>(obj: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    obj.iter()
        .find(|(k, _)| normalize_key(k) == key)
        .map(|(_, v)| v)
}

/// Accept either a bare array or an object wrapping `inner` (array or single object).
fn unwrap_list<'a>(value: Option<&'a Value>, inner: &str) -> Vec<&'a Value> {
    match value {
        Some(Value::Array(items)) => items.iter().collect(),
        Some(Value::Object(obj)) => match lookup(obj, inner) {
            Some(Value::Array(items)) => items.iter().collect(),
            Some(single) if single.is_object() => vec![single],
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}

fn text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn optional_text(obj: &Map<String, Value>, key: &str) -> Option<String> {
    lookup(obj, key).filter(|v| !v.is_null()).map(text)
}

fn count(root: &Map<String, Value>, key: &str) -> Result<u64, ApiError> {
    match lookup(root, key) {
        None | Some(Value::Null) => Ok(0),
        Some(Value::Number(n)) => n
            .as_u64()
            .ok_or_else(|| ApiError::Parse(format!("{key} is not a non-negative integer: {n}"))),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(0),
        Some(Value::String(s)) => s
            .trim()
            .parse()
            .map_err(|_| ApiError::Parse(format!("{key} is not an integer: {s}"))),
        Some(other) => Err(ApiError::Parse(format!("{key} has unexpected type: {other}"))),
    }
}

fn record(fields: &Map<String, Value>) -> Record {
    let mut record = Record::default();
    for (key, value) in fields {
        if normalize_key(key) == "references" {
            record.references = Some(unwrap_list(Some(value), "reference").into_iter().filter_map(reference).collect());
        } else {
            record.insert(snake_key(key), text(value));
        }
    }
    record.decorate();
    record
}

fn reference(value: &Value) -> Option<Reference> {
    let obj = value.as_object()?;
    let links = unwrap_list(lookup(obj, "links"), "link")
        .into_iter()
        .filter_map(Value::as_object)
        .map(|link| Link { name: optional_text(link, "name"), url: optional_text(link, "url") })
        .collect();

    Some(Reference { book_name: optional_text(obj, "bookname"), links })
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE_JSON: &str = r#"{
        "TOTAL_COUNT": 2,
        "PAGE_COUNT": "1",
        "PAGE_INDEX": 1,
        "COUNT_PER_PAGE": 10,
        "ITEM_COUNT": 2,
        "ITEMS": [
            {
                "MNG_NO": "9672",
                "NAME_KO": "유관순",
                "SEX": "0",
                "HUNKUK": "PSG00002",
                "WORKOUT_AFFIL": "UGC00003",
                "JUDGE_YEAR": 1962,
                "DIFF_NAME": null,
                "REFERENCES": [
                    {
                        "BOOK_NAME": "독립운동사 2권",
                        "LINKS": [{"NAME": "e-gonghun", "URL": "https://e-gonghun.mpva.go.kr"}]
                    },
                    {"BOOK_NAME": "독립운동사자료집 5권", "LINKS": []}
                ]
            },
            {"NAME_KO": "안창호", "SEX": "1", "HUNKUK": "PSG99999"}
        ]
    }"#;

    #[test]
    fn test_decode_fixture() {
        let page = decode(FIXTURE_JSON).unwrap();

        assert_eq!(page.total_count, 2);
        assert_eq!(page.page_count, 1);
        assert_eq!(page.items.len(), 2);

        let first = &page.items[0];
        assert_eq!(first.get("name_ko"), Some("유관순"));
        assert_eq!(first.get("judge_year"), Some("1962"));
        assert_eq!(first.get("diff_name"), Some(""));
        assert_eq!(first.get("sexText"), Some("여"));
        assert_eq!(first.get("hunkukText"), Some("대한민국장"));
        assert_eq!(first.get("workoutAffilText"), Some("3.1운동"));

        let references = first.references.as_ref().unwrap();
        assert_eq!(references.len(), 2);
        assert_eq!(references[0].links[0].url.as_deref(), Some("https://e-gonghun.mpva.go.kr"));
        assert!(references[1].links.is_empty());

        let second = &page.items[1];
        assert_eq!(second.get("sexText"), Some("남"));
        assert_eq!(second.get("hunkukText"), Some(""));
    }

    #[test]
    fn test_decode_camel_case_and_wrapped_items() {
        let json = r#"{"totalCount": 1, "items": {"item": {"nameKo": "김구"}}}"#;
        let page = decode(json).unwrap();

        assert_eq!(page.total_count, 1);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].get("name_ko"), Some("김구"));
    }

    #[test]
    fn test_camel_case_items_are_decorated() {
        let json = r#"{"items": [{"nameKo": "김구", "sex": "1", "workoutAffil": "UGC00010", "judgeYear": "1962"}]}"#;
        let page = decode(json).unwrap();
        let record = &page.items[0];

        assert_eq!(record.get("name_ko"), Some("김구"));
        assert_eq!(record.get("workout_affil"), Some("UGC00010"));
        assert_eq!(record.get("judge_year"), Some("1962"));
        assert_eq!(record.get("sexText"), Some("남"));
        assert_eq!(record.get("workoutAffilText"), Some("임시정부"));
        assert_eq!(record.get("nameko"), None);
    }

    #[test]
    fn test_snake_key() {
        assert_eq!(snake_key("NAME_KO"), "name_ko");
        assert_eq!(snake_key("nameKo"), "name_ko");
        assert_eq!(snake_key("name_ko"), "name_ko");
        assert_eq!(snake_key("registerLargeDiv"), "register_large_div");
        assert_eq!(snake_key("MNG_NO"), "mng_no");
    }

    #[test]
    fn test_decode_without_items() {
        let page = decode(r#"{"TOTAL_COUNT": 0}"#).unwrap();
        assert!(page.items.is_empty());
        assert!(!page.is_error());
    }

    #[test]
    fn test_upstream_error_member() {
        let page = decode(r#"{"error": true, "message": "서비스 점검 중"}"#).unwrap();
        assert!(page.is_error());
        assert_eq!(page.message.as_deref(), Some("서비스 점검 중"));
    }

    #[test]
    fn test_error_false_is_not_an_error() {
        let page = decode(r#"{"error": false, "TOTAL_COUNT": 3}"#).unwrap();
        assert!(!page.is_error());
        assert_eq!(page.total_count, 3);
    }

    #[test]
    fn test_invalid_payloads() {
        assert!(matches!(decode("<html>maintenance</html>"), Err(ApiError::Parse(_))));
        assert!(matches!(decode("[1, 2]"), Err(ApiError::Parse(_))));
        assert!(matches!(decode(r#"{"TOTAL_COUNT": "lots"}"#), Err(ApiError::Parse(_))));
        assert!(matches!(decode(r#"{"ITEMS": [1]}"#), Err(ApiError::Parse(_))));
    }
}
