//! Form response document
//!
//! The enquiry form on the package and property pages. Unlike a
//! registration it snapshots the referenced title and carries a travel date
//! or an investment amount.

use crate::core::entity::Data;
use crate::core::field::FieldValue;
use crate::core::validation::{EntityValidationConfig, ValidatableEntity, filters, validators};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

crate::wire_enum!(
    /// Triage state of an enquiry
    FormResponseStatus {
        New => "new",
        InProgress => "in_progress",
        Completed => "completed",
    } default New
);

/// What the enquiry is about
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FormTarget {
    #[serde(rename_all = "camelCase")]
    Tourism {
        package_id: Uuid,
        package_title: String,
        travel_date: DateTime<Utc>,
    },
    #[serde(rename_all = "camelCase")]
    Investment {
        property_id: Uuid,
        property_title: String,
        investment_amount: f64,
    },
}

impl FormTarget {
    pub fn kind(&self) -> &'static str {
        match self {
            FormTarget::Tourism { .. } => "tourism",
            FormTarget::Investment { .. } => "investment",
        }
    }
}

pub const FORM_KINDS: &[&str] = &["tourism", "investment"];

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormResponse {
    pub id: Uuid,
    #[serde(flatten)]
    pub target: FormTarget,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
    #[serde(default)]
    pub status: FormResponseStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

crate::impl_entity!(FormResponse, "formresponses", "formresponse", "Form response");
crate::impl_has_status!(FormResponse, FormResponseStatus);

impl Data for FormResponse {
    fn indexed_fields() -> &'static [&'static str] {
        &["type", "status"]
    }

    fn field_value(&self, field: &str) -> Option<FieldValue> {
        match (field, &self.target) {
            ("id", _) => Some(self.id.into()),
            ("type", target) => Some(target.kind().into()),
            ("packageId", FormTarget::Tourism { package_id, .. }) => Some((*package_id).into()),
            ("propertyId", FormTarget::Investment { property_id, .. }) => {
                Some((*property_id).into())
            }
            ("name", _) => Some(self.name.as_str().into()),
            ("email", _) => Some(self.email.as_str().into()),
            ("status", _) => Some(self.status.as_str().into()),
            ("createdAt", _) => Some(self.created_at.into()),
            ("updatedAt", _) => Some(self.updated_at.into()),
            _ => None,
        }
    }
}

impl ValidatableEntity for FormResponse {
    fn validation_config() -> EntityValidationConfig {
        EntityValidationConfig::new()
            .require("type")
            .require("name")
            .require("email")
            .require("phone")
            .require("message")
            .require_if("packageId", ("type", "tourism"))
            .require_if("travelDate", ("type", "tourism"))
            .require_if("propertyId", ("type", "investment"))
            .require_if("investmentAmount", ("type", "investment"))
            .status_in(FormResponseStatus::ALLOWED)
            .filter("name", filters::trim())
            .filter("email", filters::trim())
            .filter("phone", filters::trim())
            .filter("message", filters::trim())
            .filter("travelDate", filters::to_timestamp())
            .filter("investmentAmount", filters::to_number())
            .validate("type", validators::in_list(FORM_KINDS))
            .validate("email", validators::email())
            .validate_if("travelDate", ("type", "tourism"), validators::timestamp())
            .validate_if(
                "investmentAmount",
                ("type", "investment"),
                validators::min_value(0.0),
            )
    }

    fn immutable_fields() -> &'static [&'static str] {
        &[
            "type",
            "packageId",
            "packageTitle",
            "propertyId",
            "propertyTitle",
        ]
    }
}
