//! Reusable field validators
//!
//! Validators only see fields that are present and non-null; presence itself
//! is checked by the `require` rules of [`super::EntityValidationConfig`].

use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

/// Validator: number must be at least `min`
pub fn min_value(min: f64) -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    move |field: &str, value: &Value| match value.as_f64() {
        Some(num) if num < min => Err(format!(
            "'{}' must be at least {} (got {})",
            field, min, num
        )),
        Some(_) => Ok(()),
        None => Err(format!("'{}' must be a number", field)),
    }
}

/// Validator: value must be in allowed list
pub fn in_list(
    allowed: &'static [&'static str],
) -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    move |field: &str, value: &Value| match value.as_str() {
        Some(s) if allowed.contains(&s) => Ok(()),
        Some(s) => Err(format!(
            "'{}' must be one of: {} (got {})",
            field,
            allowed.join(", "),
            s
        )),
        None => Err(format!("'{}' must be a string", field)),
    }
}

/// Validator: array of strings, none of them blank
pub fn non_empty_items() -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    |field: &str, value: &Value| {
        let Some(items) = value.as_array() else {
            return Err(format!("'{}' must be a list", field));
        };

        for item in items {
            match item.as_str() {
                Some(s) if !s.trim().is_empty() => {}
                _ => return Err(format!("'{}' entries must be non-empty text", field)),
            }
        }
        Ok(())
    }
}

/// Validator: array of strings (blank entries allowed)
pub fn string_list() -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    |field: &str, value: &Value| match value.as_array() {
        Some(items) if items.iter().all(Value::is_string) => Ok(()),
        _ => Err(format!("'{}' must be a list of text", field)),
    }
}

/// Validator: RFC 3339 timestamp
pub fn timestamp() -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    |field: &str, value: &Value| {
        let parsed = value
            .as_str()
            .map(chrono::DateTime::parse_from_rfc3339);
        match parsed {
            Some(Ok(_)) => Ok(()),
            _ => Err(format!("'{}' must be a date", field)),
        }
    }
}

/// Validator: loosely well-formed email address
pub fn email() -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    |field: &str, value: &Value| {
        static EMAIL_REGEX: OnceLock<Option<Regex>> = OnceLock::new();
        let regex = EMAIL_REGEX.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").ok());

        match (value.as_str(), regex) {
            (Some(s), Some(re)) if re.is_match(s) => Ok(()),
            (Some(_), None) => Ok(()),
            _ => Err(format!("'{}' must be a valid email address", field)),
        }
    }
}
