//! Axum extractors and path helpers
//!
//! These convert transport-level problems (unparseable bodies, malformed ids)
//! into [`ApiError`]s so they render through the common envelope.

use crate::core::entity::Entity;
use crate::core::error::{ApiError, EntityError, ValidationError};
use axum::Json;
use axum::extract::{FromRequest, FromRequestParts, Query, Request};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;
use serde_json::Value;
use uuid::Uuid;

/// JSON request body whose rejection renders as a 400 envelope
#[derive(Debug, Clone)]
pub struct JsonBody(pub Value);

impl JsonBody {
    pub fn into_inner(self) -> Value {
        self.0
    }
}

impl<S> FromRequest<S> for JsonBody
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<Value>::from_request(req, state).await {
            Ok(Json(payload)) => Ok(JsonBody(payload)),
            Err(rejection) => Err(ValidationError::InvalidJson {
                message: rejection.body_text(),
            }
            .into()),
        }
    }
}

/// Query string whose rejection renders as a 400 envelope
#[derive(Debug, Clone, Default)]
pub struct QueryParams<T>(pub T);

impl<T, S> FromRequestParts<S> for QueryParams<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Query::<T>::from_request_parts(parts, state).await {
            Ok(Query(params)) => Ok(QueryParams(params)),
            Err(rejection) => Err(ValidationError::InvalidQuery {
                message: rejection.body_text(),
            }
            .into()),
        }
    }
}

/// Parse a path id for entity `T`
///
/// Ids that are not UUIDs cannot resolve to anything, so they are reported
/// exactly like an unknown id.
pub fn parse_id<T: Entity>(raw: &str) -> Result<Uuid, EntityError> {
    Uuid::parse_str(raw).map_err(|_| EntityError::not_found(T::label(), raw))
}

/// Parse an id that references another entity, or `None` when unusable
pub fn parse_reference(value: Option<&Value>) -> Option<Uuid> {
    value
        .and_then(Value::as_str)
        .and_then(|raw| Uuid::parse_str(raw.trim()).ok())
}
