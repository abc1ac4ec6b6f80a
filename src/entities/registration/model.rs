//! Registration document
//!
//! A registration is a lead filed against exactly one property or one
//! tourism package. The `type` discriminator and its reference id live in
//! [`RegistrationTarget`], so a registration with both or neither reference
//! cannot be represented.

use crate::core::entity::Data;
use crate::core::field::FieldValue;
use crate::core::validation::{EntityValidationConfig, ValidatableEntity, filters, validators};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

crate::wire_enum!(
    /// Follow-up state of a lead
    RegistrationStatus {
        Pending => "pending",
        Contacted => "contacted",
        Completed => "completed",
        Cancelled => "cancelled",
    } default Pending
);

/// What the registration is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum RegistrationTarget {
    #[serde(rename_all = "camelCase")]
    Investment { property_id: Uuid },
    #[serde(rename_all = "camelCase")]
    Tourism { package_id: Uuid },
}

impl RegistrationTarget {
    pub fn kind(&self) -> &'static str {
        match self {
            RegistrationTarget::Investment { .. } => "investment",
            RegistrationTarget::Tourism { .. } => "tourism",
        }
    }

    pub fn property_id(&self) -> Option<Uuid> {
        match self {
            RegistrationTarget::Investment { property_id } => Some(*property_id),
            RegistrationTarget::Tourism { .. } => None,
        }
    }

    pub fn package_id(&self) -> Option<Uuid> {
        match self {
            RegistrationTarget::Tourism { package_id } => Some(*package_id),
            RegistrationTarget::Investment { .. } => None,
        }
    }
}

pub const REGISTRATION_KINDS: &[&str] = &["investment", "tourism"];

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub id: Uuid,
    #[serde(flatten)]
    pub target: RegistrationTarget,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub country: String,
    pub state: String,
    pub occupation: String,
    pub requirements: String,
    pub message: String,
    #[serde(default)]
    pub status: RegistrationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

crate::impl_entity!(Registration, "registrations", "registration", "Registration");
crate::impl_has_status!(Registration, RegistrationStatus);

impl Data for Registration {
    fn indexed_fields() -> &'static [&'static str] {
        &["type", "status", "propertyId", "packageId"]
    }

    fn field_value(&self, field: &str) -> Option<FieldValue> {
        match field {
            "id" => Some(self.id.into()),
            "type" => Some(self.target.kind().into()),
            "propertyId" => self.target.property_id().map(FieldValue::from),
            "packageId" => self.target.package_id().map(FieldValue::from),
            "name" => Some(self.name.as_str().into()),
            "email" => Some(self.email.as_str().into()),
            "country" => Some(self.country.as_str().into()),
            "status" => Some(self.status.as_str().into()),
            "createdAt" => Some(self.created_at.into()),
            "updatedAt" => Some(self.updated_at.into()),
            _ => None,
        }
    }
}

/// Personal fields, all required and trimmed
pub const PERSONAL_FIELDS: &[&str] = &[
    "name",
    "email",
    "phone",
    "country",
    "state",
    "occupation",
    "requirements",
    "message",
];

impl ValidatableEntity for Registration {
    fn validation_config() -> EntityValidationConfig {
        let mut config = EntityValidationConfig::new()
            .require("type")
            .require_if("propertyId", ("type", "investment"))
            .require_if("packageId", ("type", "tourism"))
            .status_in(RegistrationStatus::ALLOWED);

        for &field in PERSONAL_FIELDS {
            config = config.require(field).filter(field, filters::trim());
        }

        config
            .filter("email", filters::lowercase())
            .validate("type", validators::in_list(REGISTRATION_KINDS))
            .validate("email", validators::email())
    }

    fn immutable_fields() -> &'static [&'static str] {
        &["type", "propertyId", "packageId"]
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use serde_json::{Value, json};

    pub(crate) fn registration_payload(kind: &str, reference: Uuid) -> Value {
        let mut body = json!({
            "type": kind,
            "name": "  Ravi Kumar ",
            "email": " Ravi.Kumar@Example.COM ",
            "phone": "+91 90000 00000",
            "country": "India",
            "state": "Kerala",
            "occupation": "Engineer",
            "requirements": "Sea view, 3 BHK",
            "message": "Please call after 6pm"
        });
        let key = if kind == "investment" {
            "propertyId"
        } else {
            "packageId"
        };
        body[key] = json!(reference.to_string());
        body
    }

    #[test]
    fn test_email_is_trimmed_and_lowercased() {
        let property = Uuid::new_v4();
        let registration =
            Registration::from_payload(registration_payload("investment", property)).unwrap();

        assert_eq!(registration.email, "ravi.kumar@example.com");
        assert_eq!(registration.name, "Ravi Kumar");
        assert_eq!(
            registration.target,
            RegistrationTarget::Investment {
                property_id: property
            }
        );
        assert_eq!(registration.status, RegistrationStatus::Pending);
    }

    #[test]
    fn test_serializes_flat_discriminator() {
        let package = Uuid::new_v4();
        let registration =
            Registration::from_payload(registration_payload("tourism", package)).unwrap();
        let body = serde_json::to_value(&registration).unwrap();

        assert_eq!(body["type"], "tourism");
        assert_eq!(body["packageId"], package.to_string());
        assert!(body.get("propertyId").is_none());
    }

    #[test]
    fn test_field_values_follow_target() {
        let property = Uuid::new_v4();
        let registration =
            Registration::from_payload(registration_payload("investment", property)).unwrap();

        assert_eq!(
            registration.field_value("propertyId"),
            Some(FieldValue::Uuid(property))
        );
        assert_eq!(registration.field_value("packageId"), None);
        assert_eq!(
            registration.field_value("type"),
            Some(FieldValue::from("investment"))
        );
    }

    #[test]
    fn test_update_cannot_retarget() {
        let property = Uuid::new_v4();
        let registration =
            Registration::from_payload(registration_payload("investment", property)).unwrap();
        let updated = registration
            .merged_with(json!({"type": "tourism", "packageId": Uuid::new_v4().to_string(), "state": "Goa"}))
            .unwrap();

        assert_eq!(updated.target, registration.target);
        assert_eq!(updated.state, "Goa");
    }
}
