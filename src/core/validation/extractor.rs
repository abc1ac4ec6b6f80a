//! Turning raw JSON payloads into validated documents
//!
//! [`ValidatableEntity`] owns the create/update pipeline (strip server-managed
//! fields, check presence, filter, validate, deserialize) and [`Validated`]
//! runs the create half as an axum extractor.

use super::config::EntityValidationConfig;
use crate::core::entity::Entity;
use crate::core::error::{ApiError, ApiResult, ValidationError};
use crate::core::extractors::JsonBody;
use axum::extract::{FromRequest, Request};
use chrono::Utc;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use uuid::Uuid;

/// Trait for documents built from client payloads
pub trait ValidatableEntity: Entity + Serialize + DeserializeOwned {
    /// Rules applied on create and after every merge
    fn validation_config() -> EntityValidationConfig;

    /// Fields clients can never set
    fn server_managed_fields() -> &'static [&'static str] {
        &["id", "_id", "createdAt", "updatedAt"]
    }

    /// Fields fixed at creation and ignored by updates
    fn immutable_fields() -> &'static [&'static str] {
        &[]
    }

    /// Presence, status, filter and validator checks without building `Self`
    fn validate_payload(payload: Value) -> ApiResult<Value> {
        let mut payload = expect_object(payload)?;
        strip(&mut payload, Self::server_managed_fields());
        check(&Self::validation_config(), payload)
    }

    /// Build a new document: fresh id, both timestamps set to now
    fn from_payload(payload: Value) -> ApiResult<Self> {
        let mut doc = Self::validate_payload(payload)?;
        if let Some(obj) = doc.as_object_mut() {
            let now = Value::String(Utc::now().to_rfc3339());
            obj.insert("id".into(), Value::String(Uuid::new_v4().to_string()));
            obj.insert("createdAt".into(), now.clone());
            obj.insert("updatedAt".into(), now);
        }

        serde_json::from_value(doc).map_err(ApiError::from)
    }

    /// Apply a partial update and re-validate the whole document
    fn merged_with(&self, patch: Value) -> ApiResult<Self> {
        let mut patch = expect_object(patch)?;
        strip(&mut patch, Self::server_managed_fields());
        strip(&mut patch, Self::immutable_fields());

        let mut current = serde_json::to_value(self)?;
        if let (Some(target), Value::Object(changes)) = (current.as_object_mut(), patch) {
            for (key, value) in changes {
                target.insert(key, value);
            }
        }

        let doc = check(&Self::validation_config(), current)?;
        let mut updated: Self = serde_json::from_value(doc)?;
        updated.touch();
        Ok(updated)
    }
}

fn expect_object(payload: Value) -> ApiResult<Value> {
    if payload.is_object() {
        Ok(payload)
    } else {
        Err(ValidationError::InvalidJson {
            message: "expected a JSON object".to_string(),
        }
        .into())
    }
}

fn strip(payload: &mut Value, fields: &[&str]) {
    if let Some(obj) = payload.as_object_mut() {
        for field in fields {
            obj.remove(*field);
        }
    }
}

fn check(config: &EntityValidationConfig, payload: Value) -> ApiResult<Value> {
    let missing = config.missing_fields(&payload);
    if !missing.is_empty() {
        return Err(ValidationError::MissingFields(missing).into());
    }
    if let Some(err) = config.invalid_status(&payload) {
        return Err(err.into());
    }

    config
        .validate_and_filter(payload)
        .map_err(|errors| ValidationError::FieldErrors(errors).into())
}

/// Axum extractor that builds a new, validated `T` from the request body
///
/// # Usage
///
/// ```rust,ignore
/// pub async fn create_booking(
///     State(state): State<BookingState>,
///     Validated(booking): Validated<Booking>,
/// ) -> ApiResult<Envelope<Booking>> {
///     // booking already carries id, timestamps and defaults
/// }
/// ```
pub struct Validated<T>(pub T);

impl<T> Validated<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<S, T> FromRequest<S> for Validated<T>
where
    S: Send + Sync,
    T: ValidatableEntity,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let JsonBody(payload) = JsonBody::from_request(req, state).await?;
        T::from_payload(payload).map(Validated)
    }
}
