//! User account document

use crate::core::entity::Data;
use crate::core::field::FieldValue;
use crate::core::validation::{EntityValidationConfig, ValidatableEntity, filters, validators};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

crate::wire_enum!(
    /// Account role
    UserRole {
        User => "user",
        Admin => "admin",
    } default User
);

/// A stored account
///
/// `password` holds the bcrypt hash. Handlers answer with [`UserProfile`],
/// never with this type.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

crate::impl_entity!(User, "users", "user", "User");

impl Data for User {
    fn indexed_fields() -> &'static [&'static str] {
        &["email"]
    }

    fn field_value(&self, field: &str) -> Option<FieldValue> {
        match field {
            "id" => Some(self.id.into()),
            "name" => Some(self.name.as_str().into()),
            "email" => Some(self.email.as_str().into()),
            "role" => Some(self.role.as_str().into()),
            "createdAt" => Some(self.created_at.into()),
            "updatedAt" => Some(self.updated_at.into()),
            _ => None,
        }
    }
}

impl ValidatableEntity for User {
    fn validation_config() -> EntityValidationConfig {
        EntityValidationConfig::new()
            .require("name")
            .require("email")
            .require("password")
            .filter("name", filters::trim())
            .filter("email", filters::trim())
            .filter("email", filters::lowercase())
            .validate("email", validators::email())
            .validate("role", validators::in_list(UserRole::ALLOWED))
    }
}

/// The public face of an account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: UserRole,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
        }
    }
}

/// Body of a successful sign-in or sign-up
#[derive(Debug, Clone, Serialize)]
pub struct AuthSession {
    pub token: String,
    pub user: UserProfile,
}
