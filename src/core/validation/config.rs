//! Declarative per-entity validation rules

use crate::core::error::{FieldValidationError, ValidationError};
use anyhow::Result;
use serde_json::Value;

type Validator = Box<dyn Fn(&str, &Value) -> Result<(), String> + Send + Sync>;
type Filter = Box<dyn Fn(&str, Value) -> Result<Value> + Send + Sync>;

/// A `(field, value)` pair that must hold for a conditional rule to apply
type Condition = (&'static str, &'static str);

struct Requirement {
    field: &'static str,
    when: Option<Condition>,
}

struct ValidatorRule {
    field: &'static str,
    when: Option<Condition>,
    validator: Validator,
}

/// Validation and filtering rules for one entity
///
/// # Example
///
/// ```rust,ignore
/// EntityValidationConfig::new()
///     .require("email")
///     .filter("email", filters::trim())
///     .filter("email", filters::lowercase())
///     .validate("email", validators::email())
///     .require_if("propertyId", ("type", "investment"));
/// ```
#[derive(Default)]
pub struct EntityValidationConfig {
    required: Vec<Requirement>,
    filters: Vec<(&'static str, Filter)>,
    validators: Vec<ValidatorRule>,
    statuses: Option<&'static [&'static str]>,
}

impl EntityValidationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict `status`, when supplied, to the given values
    pub fn status_in(mut self, allowed: &'static [&'static str]) -> Self {
        self.statuses = Some(allowed);
        self
    }

    /// Field must be present and non-blank
    pub fn require(mut self, field: &'static str) -> Self {
        self.required.push(Requirement { field, when: None });
        self
    }

    /// Field must be present when `when.0 == when.1`
    pub fn require_if(mut self, field: &'static str, when: Condition) -> Self {
        self.required.push(Requirement {
            field,
            when: Some(when),
        });
        self
    }

    /// Add a filter, applied in registration order
    pub fn filter<F>(mut self, field: &'static str, filter: F) -> Self
    where
        F: Fn(&str, Value) -> Result<Value> + Send + Sync + 'static,
    {
        self.filters.push((field, Box::new(filter)));
        self
    }

    /// Add a validator for a present field
    pub fn validate<V>(mut self, field: &'static str, validator: V) -> Self
    where
        V: Fn(&str, &Value) -> Result<(), String> + Send + Sync + 'static,
    {
        self.validators.push(ValidatorRule {
            field,
            when: None,
            validator: Box::new(validator),
        });
        self
    }

    /// Add a validator that only runs when `when.0 == when.1`
    pub fn validate_if<V>(mut self, field: &'static str, when: Condition, validator: V) -> Self
    where
        V: Fn(&str, &Value) -> Result<(), String> + Send + Sync + 'static,
    {
        self.validators.push(ValidatorRule {
            field,
            when: Some(when),
            validator: Box::new(validator),
        });
        self
    }

    /// Required fields that are absent, null, blank or an empty list
    pub fn missing_fields(&self, payload: &Value) -> Vec<String> {
        self.required
            .iter()
            .filter(|req| applies(req.when, payload))
            .filter(|req| is_blank(payload.get(req.field)))
            .map(|req| req.field.to_string())
            .collect()
    }

    /// A supplied `status` outside the declared set
    pub fn invalid_status(&self, payload: &Value) -> Option<ValidationError> {
        let allowed = self.statuses?;
        match payload.get("status") {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) if allowed.contains(&s.as_str()) => None,
            Some(other) => Some(ValidationError::InvalidStatus {
                value: other.as_str().unwrap_or_default().to_string(),
                allowed,
            }),
        }
    }

    /// Run filters, then validators, over an object payload
    pub fn validate_and_filter(
        &self,
        mut payload: Value,
    ) -> Result<Value, Vec<FieldValidationError>> {
        let mut errors = Vec::new();

        if let Some(obj) = payload.as_object_mut() {
            for (field, filter) in &self.filters {
                let Some(value) = obj.remove(*field) else {
                    continue;
                };
                if value.is_null() {
                    obj.insert(field.to_string(), value);
                    continue;
                }
                match filter(field, value) {
                    Ok(filtered) => {
                        obj.insert(field.to_string(), filtered);
                    }
                    Err(e) => errors.push(FieldValidationError::new(*field, e.to_string())),
                }
            }
        } else {
            errors.push(FieldValidationError::new("body", "expected a JSON object"));
            return Err(errors);
        }

        for rule in &self.validators {
            if !applies(rule.when, &payload) {
                continue;
            }
            if errors.iter().any(|e| e.field == rule.field) {
                continue;
            }
            match payload.get(rule.field) {
                None | Some(Value::Null) => {}
                Some(value) => {
                    if let Err(message) = (rule.validator)(rule.field, value) {
                        errors.push(FieldValidationError::new(rule.field, message));
                    }
                }
            }
        }

        if errors.is_empty() {
            Ok(payload)
        } else {
            Err(errors)
        }
    }
}

fn applies(when: Option<Condition>, payload: &Value) -> bool {
    match when {
        None => true,
        Some((field, expected)) => payload.get(field).and_then(Value::as_str) == Some(expected),
    }
}

fn is_blank(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(Value::Array(items)) => items.is_empty(),
        Some(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::validation::{filters, validators};
    use serde_json::json;

    fn config() -> EntityValidationConfig {
        EntityValidationConfig::new()
            .require("name")
            .require("features")
            .require_if("propertyId", ("type", "investment"))
            .filter("name", filters::trim())
            .validate("adults", validators::min_value(1.0))
            .validate_if("amount", ("type", "investment"), validators::min_value(0.0))
    }

    #[test]
    fn test_missing_fields_lists_every_blank_field() {
        let missing = config().missing_fields(&json!({
            "name": "   ",
            "features": [],
            "type": "investment"
        }));
        assert_eq!(missing, vec!["name", "features", "propertyId"]);
    }

    #[test]
    fn test_conditional_requirement_skipped_for_other_type() {
        let missing = config().missing_fields(&json!({
            "name": "Ana",
            "features": ["Pool"],
            "type": "tourism"
        }));
        assert!(missing.is_empty());
    }

    #[test]
    fn test_filters_run_before_validators() {
        let out = config()
            .validate_and_filter(json!({"name": "  Ana  ", "adults": 2}))
            .unwrap();
        assert_eq!(out["name"], "Ana");
    }

    #[test]
    fn test_validator_errors_are_collected() {
        let errors = config()
            .validate_and_filter(json!({"adults": 0, "type": "investment", "amount": -1}))
            .unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["adults", "amount"]);
    }

    #[test]
    fn test_conditional_validator_skipped() {
        let out = config().validate_and_filter(json!({"type": "tourism", "amount": -1}));
        assert!(out.is_ok());
    }

    #[test]
    fn test_invalid_status_detected() {
        let config = EntityValidationConfig::new().status_in(&["available", "sold"]);
        assert!(config.invalid_status(&json!({})).is_none());
        assert!(config.invalid_status(&json!({"status": "sold"})).is_none());
        let err = config.invalid_status(&json!({"status": "gone"})).unwrap();
        assert_eq!(
            err.to_string(),
            "Invalid status value. Must be one of: available, sold"
        );
    }

    #[test]
    fn test_non_object_rejected() {
        let errors = config().validate_and_filter(json!([1, 2])).unwrap_err();
        assert_eq!(errors[0].field, "body");
    }
}
