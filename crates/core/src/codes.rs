//! Static code tables published alongside the merit records API.
//!
//! Each table is an immutable, code-sorted slice; lookups are linear since the
//! largest table has seventeen rows.

use serde_json::{Map, Value};

const SEX: &[(&str, &str)] = &[("0", "여"), ("1", "남")];

const HUNKUK: &[(&str, &str)] = &[
    ("PSG00002", "대한민국장"),
    ("PSG00003", "대통령장"),
    ("PSG00004", "독립장"),
    ("PSG00005", "애국장"),
    ("PSG00006", "애족장"),
    ("PSG00007", "건국포장"),
    ("PSG00008", "대통령표창"),
];

const WORKOUT_AFFIL: &[(&str, &str)] = &[
    ("UGC00002", "의병"),
    ("UGC00003", "3.1운동"),
    ("UGC00004", "문화운동"),
    ("UGC00005", "국내항일"),
    ("UGC00006", "의열투쟁"),
    ("UGC00007", "학생운동"),
    ("UGC00008", "광복군"),
    ("UGC00009", "계몽운동"),
    ("UGC00010", "임시정부"),
    ("UGC00011", "일본방면"),
    ("UGC00012", "만주방면"),
    ("UGC00013", "중국방면"),
    ("UGC00014", "노령방면"),
    ("UGC00015", "미주방면"),
    ("UGC00017", "인도네시아방면"),
    ("UGC00023", "독립운동지원"),
    ("UGC00024", "구주방면"),
];

/// One of the coded fields that records carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeTable {
    /// `sex`: 0 female, 1 male.
    Sex,
    /// `hunkuk`: honor grade of the award.
    Hunkuk,
    /// `workout_affil`: movement affiliation.
    WorkoutAffil,
}

impl CodeTable {
    /// All tables, in the order records are decorated.
    pub const ALL: [CodeTable; 3] = [CodeTable::Sex, CodeTable::Hunkuk, CodeTable::WorkoutAffil];

    /// The `(code, label)` rows of this table.
    pub fn entries(self) -> &'static [(&'static str, &'static str)] {
        match self {
            CodeTable::Sex => SEX,
            CodeTable::Hunkuk => HUNKUK,
            CodeTable::WorkoutAffil => WORKOUT_AFFIL,
        }
    }

    /// Lower-cased record field holding the code.
    pub fn field(self) -> &'static str {
        match self {
            CodeTable::Sex => "sex",
            CodeTable::Hunkuk => "hunkuk",
            CodeTable::WorkoutAffil => "workout_affil",
        }
    }

    /// Record field the decoded label is written to.
    pub fn text_field(self) -> &'static str {
        match self {
            CodeTable::Sex => "sexText",
            CodeTable::Hunkuk => "hunkukText",
            CodeTable::WorkoutAffil => "workoutAffilText",
        }
    }

    pub fn label(self, code: &str) -> Option<&'static str> {
        self.entries().iter().find(|(c, _)| *c == code).map(|(_, label)| *label)
    }

    /// Label for `code`, or `""` when the code is unknown.
    pub fn label_or_empty(self, code: &str) -> &'static str {
        self.label(code).unwrap_or("")
    }

    pub fn contains(self, code: &str) -> bool {
        self.label(code).is_some()
    }

    pub fn codes(self) -> impl Iterator<Item = &'static str> {
        self.entries().iter().map(|(code, _)| *code)
    }

    /// The table as a `{code: label}` JSON object, in code order.
    pub fn to_json(self) -> Value {
        let map: Map<String, Value> = self
            .entries()
            .iter()
            .map(|(code, label)| ((*code).to_string(), Value::String((*label).to_string())))
            .collect();
        Value::Object(map)
    }
}
