//! Canonical record model.
//!
//! Both upstream response formats (JSON and XML) are converted into these
//! types so the cache and the tool layer only ever see one shape.

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::codes::CodeTable;

/// One page of merit-list or public-report results.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResultPage {
    pub total_count: u64,
    pub page_count: u64,
    pub page_index: u64,
    pub count_per_page: u64,
    pub item_count: u64,
    #[serde(default)]
    pub items: Vec<Record>,
    /// Set when the upstream payload reported or caused an error.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub error: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ResultPage {
    /// An error result: flagged, with a message and no items.
    pub fn failed(message: impl Into<String>) -> Self {
        Self { error: true, message: Some(message.into()), ..Default::default() }
    }

    pub fn is_error(&self) -> bool {
        self.error
    }
}

/// A single activist record: lower-cased field names mapped to text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Record {
    #[serde(flatten)]
    pub fields: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub references: Option<Vec<Reference>>,
}

impl Record {
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(field.into(), value.into());
    }

    /// Attach `sexText`, `hunkukText` and `workoutAffilText` for every coded
    /// field present. Unknown codes decorate as an empty string.
    pub fn decorate(&mut self) {
        for table in CodeTable::ALL {
            if let Some(code) = self.fields.get(table.field()) {
                let label = table.label_or_empty(code);
                self.fields.insert(table.text_field().to_string(), label.to_string());
            }
        }
    }
}

/// A bibliographic reference attached to a record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Reference {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub book_name: Option<String>,
    #[serde(default)]
    pub links: Vec<Link>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Link {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decorate_known_and_unknown_codes() {
        let mut record = Record::default();
        record.insert("sex", "1");
        record.insert("hunkuk", "PSG99999");
        record.decorate();

        assert_eq!(record.get("sexText"), Some("남"));
        assert_eq!(record.get("hunkukText"), Some(""));
        assert_eq!(record.get("workoutAffilText"), None);
    }

    #[test]
    fn test_result_page_serializes_camel_case() {
        let page = ResultPage { total_count: 3, item_count: 1, ..Default::default() };
        let json = serde_json::to_value(&page).unwrap();

        assert_eq!(json["totalCount"], 3);
        assert_eq!(json["itemCount"], 1);
        assert!(json.get("error").is_none());
        assert!(json.get("message").is_none());
    }

    #[test]
    fn test_failed_page_shape() {
        let json = serde_json::to_value(ResultPage::failed("boom")).unwrap();
        assert_eq!(json["error"], true);
        assert_eq!(json["message"], "boom");
        assert_eq!(json["items"], serde_json::json!([]));
    }

    #[test]
    fn test_record_flattens_fields() {
        let mut record = Record::default();
        record.insert("name_ko", "유관순");
        record.references = Some(vec![Reference { book_name: Some("독립운동사".into()), links: vec![] }]);

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["name_ko"], "유관순");
        assert_eq!(json["references"][0]["bookName"], "독립운동사");
        assert_eq!(json["references"][0]["links"], serde_json::json!([]));
    }
}
