//! Booking document

use crate::core::entity::Data;
use crate::core::field::FieldValue;
use crate::core::validation::{EntityValidationConfig, ValidatableEntity, filters, validators};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

crate::wire_enum!(
    /// Booking lifecycle
    BookingStatus {
        Pending => "pending",
        Confirmed => "confirmed",
        Cancelled => "cancelled",
        Completed => "completed",
    } default Pending
);

crate::wire_enum!(
    /// How the guest wants to be contacted
    ContactPreference {
        Phone => "phone",
        Email => "email",
        Whatsapp => "whatsapp",
    } default Phone
);

/// A stay request submitted from the public booking form
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: Uuid,
    pub full_name: String,
    pub phone_number: String,
    pub email: String,
    pub country: String,
    #[serde(default)]
    pub contact_preference: ContactPreference,
    #[serde(default)]
    pub purpose: Vec<String>,
    pub package: String,
    pub check_in: DateTime<Utc>,
    pub check_out: DateTime<Utc>,
    pub adults: u32,
    #[serde(default)]
    pub children: u32,
    #[serde(default)]
    pub infants: u32,
    pub accommodation: String,
    pub rooms: u32,
    pub view: String,
    pub meal_preference: String,
    #[serde(default)]
    pub special_requirements: Vec<String>,
    #[serde(default)]
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

crate::impl_entity!(Booking, "bookings", "booking", "Booking");
crate::impl_has_status!(Booking, BookingStatus);

impl Data for Booking {
    fn indexed_fields() -> &'static [&'static str] {
        &["status", "email", "package"]
    }

    fn field_value(&self, field: &str) -> Option<FieldValue> {
        match field {
            "id" => Some(self.id.into()),
            "fullName" => Some(self.full_name.as_str().into()),
            "email" => Some(self.email.as_str().into()),
            "package" => Some(self.package.as_str().into()),
            "status" => Some(self.status.as_str().into()),
            "checkIn" => Some(self.check_in.into()),
            "createdAt" => Some(self.created_at.into()),
            "updatedAt" => Some(self.updated_at.into()),
            _ => None,
        }
    }
}

impl ValidatableEntity for Booking {
    fn validation_config() -> EntityValidationConfig {
        let mut config = EntityValidationConfig::new().status_in(BookingStatus::ALLOWED);

        for field in [
            "fullName",
            "phoneNumber",
            "email",
            "country",
            "package",
            "checkIn",
            "checkOut",
            "adults",
            "accommodation",
            "rooms",
            "view",
            "mealPreference",
        ] {
            config = config.require(field);
        }

        for field in ["fullName", "phoneNumber", "email", "country"] {
            config = config.filter(field, filters::trim());
        }

        config
            .filter("checkIn", filters::to_timestamp())
            .filter("checkOut", filters::to_timestamp())
            .filter("adults", filters::to_number())
            .filter("children", filters::to_number())
            .filter("infants", filters::to_number())
            .filter("rooms", filters::to_number())
            .validate("contactPreference", validators::in_list(ContactPreference::ALLOWED))
            .validate("checkIn", validators::timestamp())
            .validate("checkOut", validators::timestamp())
            .validate("adults", validators::min_value(1.0))
            .validate("children", validators::min_value(0.0))
            .validate("infants", validators::min_value(0.0))
            .validate("rooms", validators::min_value(1.0))
            .validate("purpose", validators::string_list())
            .validate("specialRequirements", validators::string_list())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::core::error::{ApiError, ValidationError};
    use serde_json::{Value, json};

    pub(crate) fn booking_payload() -> Value {
        json!({
            "fullName": "Asha Menon",
            "phoneNumber": "+91 98470 00000",
            "email": "asha@example.com",
            "country": "India",
            "package": "Kerala Backwaters Retreat",
            "checkIn": "2025-12-20",
            "checkOut": "2025-12-27",
            "adults": 2,
            "children": 1,
            "accommodation": "Villa",
            "rooms": 1,
            "view": "Sea",
            "mealPreference": "Vegetarian"
        })
    }

    #[test]
    fn test_defaults_applied() {
        let booking = Booking::from_payload(booking_payload()).unwrap();
        assert_eq!(booking.infants, 0);
        assert_eq!(booking.children, 1);
        assert_eq!(booking.status, BookingStatus::Pending);
        assert_eq!(booking.contact_preference, ContactPreference::Phone);
        assert!(booking.purpose.is_empty());
        assert_eq!(booking.check_in.to_rfc3339(), "2025-12-20T00:00:00+00:00");
        assert_eq!(booking.created_at, booking.updated_at);
    }

    #[test]
    fn test_zero_adults_rejected() {
        let mut payload = booking_payload();
        payload["adults"] = json!(0);

        let err = Booking::from_payload(payload).unwrap_err();
        match err {
            ApiError::Validation(ValidationError::FieldErrors(errors)) => {
                assert_eq!(errors[0].field, "adults");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_numeric_strings_accepted() {
        let mut payload = booking_payload();
        payload["adults"] = json!("3");
        payload["rooms"] = json!("2");

        let booking = Booking::from_payload(payload).unwrap();
        assert_eq!(booking.adults, 3);
        assert_eq!(booking.rooms, 2);
    }

    #[test]
    fn test_client_cannot_choose_id_or_timestamps() {
        let mut payload = booking_payload();
        let forged = Uuid::new_v4();
        payload["id"] = json!(forged.to_string());
        payload["createdAt"] = json!("2000-01-01T00:00:00Z");

        let booking = Booking::from_payload(payload).unwrap();
        assert_ne!(booking.id, forged);
        assert!(booking.created_at.timestamp() > 946_684_800);
    }

    #[test]
    fn test_update_keeps_created_at() {
        let booking = Booking::from_payload(booking_payload()).unwrap();
        let updated = booking.merged_with(json!({"rooms": 2})).unwrap();

        assert_eq!(updated.id, booking.id);
        assert_eq!(updated.rooms, 2);
        assert_eq!(updated.created_at, booking.created_at);
        assert!(updated.updated_at >= booking.updated_at);
    }
}
