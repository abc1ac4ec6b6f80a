//! Field values used for filtering and ordering documents

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use uuid::Uuid;

/// A polymorphic field value exposed by [`crate::core::Data::field_value`]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Number(f64),
    Uuid(Uuid),
    Timestamp(DateTime<Utc>),
}

impl FieldValue {
    /// Equality against a raw query-string value
    pub fn matches(&self, raw: &str) -> bool {
        match self {
            FieldValue::Text(s) => s == raw,
            FieldValue::Number(n) => raw.parse::<f64>().is_ok_and(|r| r == *n),
            FieldValue::Uuid(u) => Uuid::parse_str(raw).is_ok_and(|r| r == *u),
            FieldValue::Timestamp(t) => {
                DateTime::parse_from_rfc3339(raw).is_ok_and(|r| r.with_timezone(&Utc) == *t)
            }
        }
    }

    /// Total order between values of the same kind; mixed kinds compare equal
    pub fn compare(&self, other: &FieldValue) -> Ordering {
        match (self, other) {
            (FieldValue::Text(a), FieldValue::Text(b)) => a.cmp(b),
            (FieldValue::Number(a), FieldValue::Number(b)) => a.total_cmp(b),
            (FieldValue::Uuid(a), FieldValue::Uuid(b)) => a.cmp(b),
            (FieldValue::Timestamp(a), FieldValue::Timestamp(b)) => a.cmp(b),
            _ => Ordering::Equal,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(t: DateTime<Utc>) -> Self {
        FieldValue::Timestamp(t)
    }
}

impl From<Uuid> for FieldValue {
    fn from(u: Uuid) -> Self {
        FieldValue::Uuid(u)
    }
}
