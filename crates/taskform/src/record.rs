//! Core record types for taskform.
//!
//! A [`Record`] is one stored task entry: an id plus the four form fields.
//! On disk it is a flat JSON object, `{"id", "name", "lastName", "email", "password"}`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Identifier of a record.
///
/// Ids are creation timestamps in milliseconds since the Unix epoch, bumped
/// forward when needed so that no two records in a collection share one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(i64);

impl RecordId {
    /// Wrap a raw id value.
    #[must_use]
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// The raw id value as written to disk.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }

    /// Allocate an id from the current wall clock.
    ///
    /// `latest` is the largest id already present in the collection, if any.
    /// Returns `None` once `latest` is `i64::MAX`.
    #[must_use]
    pub fn generate(latest: Option<Self>) -> Option<Self> {
        Self::next_after(latest, Utc::now().timestamp_millis())
    }

    /// Pick `now_ms` unless it would not be strictly greater than `latest`.
    ///
    /// Returns `None` when no id greater than `latest` exists.
    #[must_use]
    pub fn next_after(latest: Option<Self>, now_ms: i64) -> Option<Self> {
        match latest {
            Some(prev) if prev.0 >= now_ms => prev.0.checked_add(1).map(Self),
            _ => Some(Self(now_ms)),
        }
    }

    /// Creation time encoded in the id, if it is a representable timestamp.
    #[must_use]
    pub fn created_at(self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.0)
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for RecordId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

/// The four user-editable fields of a record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordFields {
    /// First name.
    pub name: String,
    /// Last name.
    pub last_name: String,
    /// Email address.
    pub email: String,
    /// Password, stored as entered.
    pub password: String,
}

impl RecordFields {
    /// Build a field set from its four values.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            last_name: last_name.into(),
            email: email.into(),
            password: password.into(),
        }
    }

    /// Whether every field is empty.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.name.is_empty()
            && self.last_name.is_empty()
            && self.email.is_empty()
            && self.password.is_empty()
    }

    /// The password with every character replaced by `mask`.
    #[must_use]
    pub fn masked_password(&self, mask: char) -> String {
        std::iter::repeat(mask)
            .take(self.password.chars().count())
            .collect()
    }
}

/// A stored task entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Unique, immutable identifier.
    pub id: RecordId,

    /// The user-editable fields.
    #[serde(flatten)]
    pub fields: RecordFields,

    /// Keys found in the data file that taskform does not know about.
    /// Written back unchanged on every rewrite.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Record {
    /// Create a record with the given id and fields.
    #[must_use]
    pub fn new(id: RecordId, fields: RecordFields) -> Self {
        Self {
            id,
            fields,
            extra: Map::new(),
        }
    }

    /// A copy of this record carrying `fields`, with the id and any unknown
    /// keys unchanged.
    #[must_use]
    pub fn with_fields(&self, fields: RecordFields) -> Self {
        Self {
            id: self.id,
            fields,
            extra: self.extra.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_fields() -> RecordFields {
        RecordFields::new("A", "B", "a@b.com", "x")
    }

    #[test]
    fn test_record_json_shape() {
        let record = Record::new(RecordId::new(1_700_000_000_000), sample_fields());
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(
            json,
            r#"{"id":1700000000000,"name":"A","lastName":"B","email":"a@b.com","password":"x"}"#
        );
    }

    #[test]
    fn test_record_parses_camel_case_file() {
        let json = r#"{"id":1712345678901,"name":"Ana","lastName":"Diaz","email":"ana@example.com","password":"pw"}"#;
        let record: Record = serde_json::from_str(json).unwrap();
        assert_eq!(record.id.get(), 1_712_345_678_901);
        assert_eq!(record.fields.last_name, "Diaz");
        assert_eq!(record.fields.password, "pw");
        assert!(record.extra.is_empty());
    }

    #[test]
    fn test_unknown_keys_survive_field_update() {
        let json = r#"{"id":3,"name":"Ana","lastName":"Diaz","email":"a@x.com","password":"pw","done":true,"tags":["x"]}"#;
        let record: Record = serde_json::from_str(json).unwrap();
        assert_eq!(record.extra.len(), 2);
        assert!(!record.extra.contains_key("name"));

        let updated = record.with_fields(RecordFields::new("Bo", "Li", "b@x.com", "new"));
        let out: Value = serde_json::to_value(&updated).unwrap();

        assert_eq!(out["done"], Value::Bool(true));
        assert_eq!(out["tags"][0], "x");
        assert_eq!(out["name"], "Bo");
        assert_eq!(out["lastName"], "Li");
    }

    #[test]
    fn test_record_missing_field_is_rejected() {
        let json = r#"{"id":1,"name":"Ana","email":"ana@example.com","password":"pw"}"#;
        assert!(serde_json::from_str::<Record>(json).is_err());
    }

    #[test]
    fn test_next_after_uses_clock_when_ahead() {
        let id = RecordId::next_after(Some(RecordId::new(100)), 250);
        assert_eq!(id, Some(RecordId::new(250)));
    }

    #[test]
    fn test_next_after_bumps_on_same_millisecond() {
        let id = RecordId::next_after(Some(RecordId::new(250)), 250);
        assert_eq!(id, Some(RecordId::new(251)));
    }

    #[test]
    fn test_next_after_bumps_when_clock_goes_backwards() {
        let id = RecordId::next_after(Some(RecordId::new(900)), 250);
        assert_eq!(id, Some(RecordId::new(901)));
    }

    #[test]
    fn test_next_after_max_id_has_no_successor() {
        assert_eq!(RecordId::next_after(Some(RecordId::new(i64::MAX)), 250), None);
    }

    #[test]
    fn test_next_after_empty_collection() {
        assert_eq!(RecordId::next_after(None, 42), Some(RecordId::new(42)));
    }

    #[test]
    fn test_generate_is_recent_timestamp() {
        let before = Utc::now().timestamp_millis();
        let id = RecordId::generate(None).unwrap();
        let after = Utc::now().timestamp_millis();
        assert!(id.get() >= before && id.get() <= after);
        assert!(id.created_at().is_some());
    }

    #[test]
    fn test_record_id_from_str() {
        assert_eq!(" 1234 ".parse::<RecordId>().unwrap(), RecordId::new(1234));
        assert!("abc".parse::<RecordId>().is_err());
    }

    #[test]
    fn test_with_fields_keeps_id() {
        let record = Record::new(RecordId::new(7), sample_fields());
        let updated = record.with_fields(RecordFields::new("C", "D", "c@d.com", "y"));
        assert_eq!(updated.id, record.id);
        assert_eq!(updated.fields.name, "C");
    }

    #[test]
    fn test_masked_password_counts_chars() {
        let fields = RecordFields::new("", "", "", "contraseña");
        assert_eq!(fields.masked_password('*'), "**********");
    }

    #[test]
    fn test_is_blank() {
        assert!(RecordFields::default().is_blank());
        assert!(!sample_fields().is_blank());
    }
}
