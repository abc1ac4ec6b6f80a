//! Reusable field filters
//!
//! These filters transform field values before validation

use anyhow::{Result, anyhow};
use chrono::{NaiveDate, TimeZone, Utc};
use serde_json::{Value, json};

/// Filter: trim whitespace from string
pub fn trim() -> impl Fn(&str, Value) -> Result<Value> + Send + Sync + Clone {
    |_: &str, value: Value| {
        if let Some(s) = value.as_str() {
            Ok(Value::String(s.trim().to_string()))
        } else {
            Ok(value)
        }
    }
}

/// Filter: convert string to lowercase
pub fn lowercase() -> impl Fn(&str, Value) -> Result<Value> + Send + Sync + Clone {
    |_: &str, value: Value| {
        if let Some(s) = value.as_str() {
            Ok(Value::String(s.to_lowercase()))
        } else {
            Ok(value)
        }
    }
}

/// Filter: trim every string of an array
pub fn trim_items() -> impl Fn(&str, Value) -> Result<Value> + Send + Sync + Clone {
    |_: &str, value: Value| match value {
        Value::Array(items) => Ok(Value::Array(
            items
                .into_iter()
                .map(|item| match item {
                    Value::String(s) => Value::String(s.trim().to_string()),
                    other => other,
                })
                .collect(),
        )),
        other => Ok(other),
    }
}

/// Filter: numeric strings become numbers (form posts send "2")
pub fn to_number() -> impl Fn(&str, Value) -> Result<Value> + Send + Sync + Clone {
    |field: &str, value: Value| {
        let Some(s) = value.as_str() else {
            return Ok(value);
        };

        let trimmed = s.trim();
        if let Ok(i) = trimmed.parse::<i64>() {
            Ok(json!(i))
        } else if let Ok(f) = trimmed.parse::<f64>() {
            Ok(json!(f))
        } else {
            Err(anyhow!("'{}' must be a number", field))
        }
    }
}

/// Filter: a bare `YYYY-MM-DD` becomes midnight UTC in RFC 3339
pub fn to_timestamp() -> impl Fn(&str, Value) -> Result<Value> + Send + Sync + Clone {
    |_: &str, value: Value| {
        let Some(s) = value.as_str() else {
            return Ok(value);
        };

        match NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d") {
            Ok(date) => {
                let midnight = date.and_hms_opt(0, 0, 0).map(|dt| Utc.from_utc_datetime(&dt));
                match midnight {
                    Some(ts) => Ok(Value::String(ts.to_rfc3339())),
                    None => Ok(value),
                }
            }
            Err(_) => Ok(value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trim_removes_whitespace() {
        let f = trim();
        assert_eq!(f("name", json!("  hello  ")).unwrap(), json!("hello"));
        assert_eq!(f("age", json!(42)).unwrap(), json!(42));
    }

    #[test]
    fn test_lowercase() {
        let f = lowercase();
        assert_eq!(
            f("email", json!("Guest@Example.COM")).unwrap(),
            json!("guest@example.com")
        );
    }

    #[test]
    fn test_trim_items() {
        let f = trim_items();
        assert_eq!(
            f("features", json!([" Pool ", "Garden"])).unwrap(),
            json!(["Pool", "Garden"])
        );
        assert_eq!(f("features", json!("Pool")).unwrap(), json!("Pool"));
    }

    #[test]
    fn test_to_number() {
        let f = to_number();
        assert_eq!(f("adults", json!("2")).unwrap(), json!(2));
        assert_eq!(f("amount", json!("2.5")).unwrap(), json!(2.5));
        assert_eq!(f("adults", json!(3)).unwrap(), json!(3));
        assert!(f("adults", json!("two")).is_err());
    }

    #[test]
    fn test_to_timestamp_expands_plain_dates() {
        let f = to_timestamp();
        assert_eq!(
            f("checkIn", json!("2025-03-01")).unwrap(),
            json!("2025-03-01T00:00:00+00:00")
        );
        assert_eq!(
            f("checkIn", json!("2025-03-01T10:00:00Z")).unwrap(),
            json!("2025-03-01T10:00:00Z")
        );
    }
}
