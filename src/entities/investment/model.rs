//! Investment (property listing) document

use crate::core::entity::Data;
use crate::core::field::FieldValue;
use crate::core::validation::{EntityValidationConfig, ValidatableEntity, filters, validators};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

crate::wire_enum!(
    /// Listing availability
    InvestmentStatus {
        Available => "available",
        Sold => "sold",
        Reserved => "reserved",
    } default Available
);

/// Name of the back-reference list holding registration ids
pub const REGISTRATIONS_FIELD: &str = "registrations";

/// A property offered for investment
///
/// `price`, `size` and `bedrooms` are display strings ("₹ 4.5 Cr",
/// "4500 sq ft", "4 BHK"), never parsed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Investment {
    pub id: Uuid,
    pub title: String,
    pub price: String,
    pub size: String,
    pub bedrooms: String,
    pub image: String,
    pub description: String,
    pub features: Vec<String>,
    #[serde(default)]
    pub status: InvestmentStatus,
    /// Registrations filed against this property, oldest first
    #[serde(default)]
    pub registrations: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

crate::impl_entity!(Investment, "investments", "investment", "Investment");
crate::impl_has_status!(Investment, InvestmentStatus);

impl Data for Investment {
    fn indexed_fields() -> &'static [&'static str] {
        &["status"]
    }

    fn field_value(&self, field: &str) -> Option<FieldValue> {
        match field {
            "id" => Some(self.id.into()),
            "title" => Some(self.title.as_str().into()),
            "price" => Some(self.price.as_str().into()),
            "status" => Some(self.status.as_str().into()),
            "createdAt" => Some(self.created_at.into()),
            "updatedAt" => Some(self.updated_at.into()),
            _ => None,
        }
    }

    fn references_mut(&mut self, field: &str) -> Option<&mut Vec<Uuid>> {
        match field {
            REGISTRATIONS_FIELD => Some(&mut self.registrations),
            _ => None,
        }
    }
}

impl ValidatableEntity for Investment {
    fn validation_config() -> EntityValidationConfig {
        EntityValidationConfig::new()
            .require("title")
            .require("price")
            .require("size")
            .require("bedrooms")
            .require("image")
            .require("description")
            .require("features")
            .status_in(InvestmentStatus::ALLOWED)
            .filter("title", filters::trim())
            .filter("features", filters::trim_items())
            .validate("features", validators::non_empty_items())
    }

    fn server_managed_fields() -> &'static [&'static str] {
        &["id", "_id", "createdAt", "updatedAt", REGISTRATIONS_FIELD]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::{ApiError, ValidationError};
    use serde_json::json;

    fn payload() -> serde_json::Value {
        json!({
            "title": "  Ocean Front Villa ",
            "price": "₹ 4.5 Cr",
            "size": "4500 sq ft",
            "bedrooms": "4 BHK",
            "image": "/images/villa1.jpg",
            "description": "Sea-facing villa with private beach access",
            "features": ["Private pool", "Beach access"]
        })
    }

    #[test]
    fn test_defaults_and_trim() {
        let investment = Investment::from_payload(payload()).unwrap();
        assert_eq!(investment.title, "Ocean Front Villa");
        assert_eq!(investment.status, InvestmentStatus::Available);
        assert!(investment.registrations.is_empty());
    }

    #[test]
    fn test_missing_fields_all_named() {
        let err = Investment::from_payload(json!({"title": "Villa", "features": []})).unwrap_err();
        match err {
            ApiError::Validation(ValidationError::MissingFields(fields)) => assert_eq!(
                fields,
                vec!["price", "size", "bedrooms", "image", "description", "features"]
            ),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_invalid_status_message() {
        let mut body = payload();
        body["status"] = json!("archived");
        let err = Investment::from_payload(body).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid status value. Must be one of: available, sold, reserved"
        );
    }

    #[test]
    fn test_registrations_not_client_writable() {
        let mut body = payload();
        body["registrations"] = json!([Uuid::new_v4().to_string()]);
        let investment = Investment::from_payload(body).unwrap();
        assert!(investment.registrations.is_empty());

        let updated = investment
            .merged_with(json!({"registrations": [Uuid::new_v4().to_string()], "status": "sold"}))
            .unwrap();
        assert!(updated.registrations.is_empty());
        assert_eq!(updated.status, InvestmentStatus::Sold);
    }

    #[test]
    fn test_blank_feature_rejected() {
        let mut body = payload();
        body["features"] = json!(["Pool", " "]);
        assert!(Investment::from_payload(body).is_err());
    }
}
