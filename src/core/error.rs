//! Typed error handling for the resort API
//!
//! Every handler returns [`ApiResult`]; the error side is rendered into the
//! same envelope as successful responses (`success: false`) so callers can
//! always rely on `message` being present.
//!
//! # Error Categories
//!
//! - [`EntityError`]: the targeted document (or a document it references) does not resolve
//! - [`ValidationError`]: missing, malformed or enum-violating input
//! - [`AuthError`]: sign-in / sign-up failures and token problems
//! - [`StorageError`]: the backing store rejected or failed an operation
//!
//! # Example
//!
//! ```rust,ignore
//! async fn get_booking(id: Uuid) -> ApiResult<Booking> {
//!     service
//!         .get(&id)
//!         .await
//!         .map_err(|e| StorageError::failed("fetching", "booking", e))?
//!         .ok_or_else(|| EntityError::not_found("Booking", id).into())
//! }
//! ```

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::{Map, Value, json};
use std::fmt;

/// The main error type for the API
#[derive(Debug)]
pub enum ApiError {
    /// Document lookup errors
    Entity(EntityError),

    /// Input validation errors
    Validation(ValidationError),

    /// Authentication errors
    Auth(AuthError),

    /// Storage backend errors
    Storage(StorageError),

    /// Anything else (should not happen in normal operation)
    Internal(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Entity(e) => write!(f, "{}", e),
            ApiError::Validation(e) => write!(f, "{}", e),
            ApiError::Auth(e) => write!(f, "{}", e),
            ApiError::Storage(e) => write!(f, "{}", e),
            ApiError::Internal(_) => write!(f, "Something went wrong!"),
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::Entity(e) => Some(e),
            ApiError::Validation(e) => Some(e),
            ApiError::Auth(e) => Some(e),
            ApiError::Storage(e) => Some(e),
            ApiError::Internal(_) => None,
        }
    }
}

/// Error body, shaped like every other envelope the API returns
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Underlying error detail, when one exists
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Extra top-level fields (`missingFields`, `errors`, ...)
    #[serde(flatten, skip_serializing_if = "Option::is_none")]
    pub details: Option<Map<String, Value>>,
}

impl ApiError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Entity(_) => StatusCode::NOT_FOUND,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Auth(e) => e.status_code(),
            ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::Entity(e) => e.error_code(),
            ApiError::Validation(e) => e.error_code(),
            ApiError::Auth(e) => e.error_code(),
            ApiError::Storage(_) => "STORAGE_ERROR",
            ApiError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            success: false,
            code: self.error_code().to_string(),
            message: self.to_string(),
            error: self.detail(),
            details: self.details(),
        }
    }

    fn detail(&self) -> Option<String> {
        match self {
            ApiError::Storage(StorageError::Failed { message, .. }) => Some(message.clone()),
            ApiError::Validation(
                ValidationError::InvalidJson { message }
                | ValidationError::InvalidQuery { message },
            ) => Some(message.clone()),
            ApiError::Auth(AuthError::Token(message) | AuthError::Hashing(message)) => {
                Some(message.clone())
            }
            ApiError::Internal(message) => Some(message.clone()),
            _ => None,
        }
    }

    fn details(&self) -> Option<Map<String, Value>> {
        let value = match self {
            ApiError::Validation(ValidationError::MissingFields(fields)) => {
                json!({ "missingFields": fields })
            }
            ApiError::Validation(ValidationError::FieldErrors(errors)) => {
                json!({ "errors": errors })
            }
            ApiError::Validation(ValidationError::InvalidStatus { allowed, .. }) => {
                json!({ "allowed": allowed })
            }
            _ => return None,
        };

        match value {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(code = self.error_code(), error = ?self, "request failed");
        } else {
            tracing::warn!(code = self.error_code(), error = %self, "request rejected");
        }

        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

// =============================================================================
// Entity Errors
// =============================================================================

/// Errors raised when an identifier does not resolve
#[derive(Debug)]
pub enum EntityError {
    /// The targeted document does not exist (or the id is malformed)
    NotFound { entity: &'static str, id: String },

    /// A document referenced by the payload does not exist
    ReferenceNotFound { entity: &'static str, id: String },
}

impl EntityError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        EntityError::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn reference_not_found(entity: &'static str, id: impl ToString) -> Self {
        EntityError::ReferenceNotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            EntityError::NotFound { .. } => "ENTITY_NOT_FOUND",
            EntityError::ReferenceNotFound { .. } => "REFERENCE_NOT_FOUND",
        }
    }
}

impl fmt::Display for EntityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityError::NotFound { entity, .. } => write!(f, "{} not found", entity),
            EntityError::ReferenceNotFound { entity, .. } => write!(f, "{} not found", entity),
        }
    }
}

impl std::error::Error for EntityError {}

impl From<EntityError> for ApiError {
    fn from(err: EntityError) -> Self {
        ApiError::Entity(err)
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Errors related to input validation
#[derive(Debug)]
pub enum ValidationError {
    /// One or more fields failed their rules
    FieldErrors(Vec<FieldValidationError>),

    /// Required fields are absent or blank
    MissingFields(Vec<String>),

    /// A form that requires every field was submitted incomplete
    Incomplete { message: &'static str },

    /// Status value outside the entity's declared set
    InvalidStatus {
        value: String,
        allowed: &'static [&'static str],
    },

    /// The discriminator asks for a reference id that was not supplied
    MissingReference {
        label: &'static str,
        kind: &'static str,
    },

    /// Body could not be parsed into the expected shape
    InvalidJson { message: String },

    /// Query string could not be parsed
    InvalidQuery { message: String },
}

/// A single field validation error
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldValidationError {
    pub field: String,
    pub message: String,
}

impl FieldValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl ValidationError {
    pub fn error_code(&self) -> &'static str {
        match self {
            ValidationError::FieldErrors(_) => "VALIDATION_ERROR",
            ValidationError::MissingFields(_) => "MISSING_FIELDS",
            ValidationError::Incomplete { .. } => "MISSING_FIELDS",
            ValidationError::InvalidStatus { .. } => "INVALID_STATUS",
            ValidationError::MissingReference { .. } => "MISSING_REFERENCE",
            ValidationError::InvalidJson { .. } => "INVALID_JSON",
            ValidationError::InvalidQuery { .. } => "INVALID_QUERY",
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::FieldErrors(errors) => {
                let msgs: Vec<String> = errors
                    .iter()
                    .map(|e| format!("{}: {}", e.field, e.message))
                    .collect();
                write!(f, "Validation failed: {}", msgs.join(", "))
            }
            ValidationError::MissingFields(_) => write!(f, "Missing required fields"),
            ValidationError::Incomplete { message } => write!(f, "{}", message),
            ValidationError::InvalidStatus { allowed, .. } => {
                write!(
                    f,
                    "Invalid status value. Must be one of: {}",
                    allowed.join(", ")
                )
            }
            ValidationError::MissingReference { label, kind } => {
                write!(f, "{} is required for {} registration", label, kind)
            }
            ValidationError::InvalidJson { .. } => write!(f, "Invalid request body"),
            ValidationError::InvalidQuery { .. } => write!(f, "Invalid query parameters"),
        }
    }
}

impl std::error::Error for ValidationError {}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::Validation(err)
    }
}

// =============================================================================
// Auth Errors
// =============================================================================

/// Errors raised by sign-in, sign-up and token handling
///
/// Credential problems answer 400 rather than 401/409, which is what the
/// existing frontend expects.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Please fill all fields")]
    MissingCredentials,

    #[error("Please fill all required fields")]
    MissingSignupFields,

    #[error("User does not exist")]
    UnknownUser,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("User with this email already exists")]
    DuplicateEmail,

    #[error("JWT_SECRET not configured")]
    SigningKeyMissing,

    #[error("Failed to issue token")]
    Token(String),

    #[error("Failed to hash password")]
    Hashing(String),
}

impl AuthError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::MissingCredentials
            | AuthError::MissingSignupFields
            | AuthError::UnknownUser
            | AuthError::InvalidCredentials
            | AuthError::DuplicateEmail => StatusCode::BAD_REQUEST,
            AuthError::SigningKeyMissing | AuthError::Token(_) | AuthError::Hashing(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::MissingCredentials | AuthError::MissingSignupFields => "MISSING_FIELDS",
            AuthError::UnknownUser | AuthError::InvalidCredentials => "UNAUTHORIZED",
            AuthError::DuplicateEmail => "DUPLICATE_EMAIL",
            AuthError::SigningKeyMissing => "SIGNING_KEY_MISSING",
            AuthError::Token(_) => "TOKEN_ERROR",
            AuthError::Hashing(_) => "HASHING_ERROR",
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        ApiError::Auth(err)
    }
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Errors reported by a storage backend
#[derive(Debug)]
pub enum StorageError {
    /// An operation on a collection failed
    Failed {
        operation: &'static str,
        entity: String,
        message: String,
    },
}

impl StorageError {
    /// Wrap a backend error with the operation that was being attempted
    ///
    /// `operation` is a gerund ("creating", "fetching", ...) and `entity` the
    /// lower-case entity label, so the message reads "Error creating booking".
    pub fn failed(operation: &'static str, entity: &str, err: anyhow::Error) -> Self {
        StorageError::Failed {
            operation,
            entity: entity.to_lowercase(),
            message: err.to_string(),
        }
    }
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Failed {
                operation, entity, ..
            } => write!(f, "Error {} {}", operation, entity),
        }
    }
}

impl std::error::Error for StorageError {}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        ApiError::Storage(err)
    }
}

// =============================================================================
// Conversions from external errors
// =============================================================================

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Validation(ValidationError::InvalidJson {
            message: err.to_string(),
        })
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::Internal(err.to_string())
    }
}

// =============================================================================
// Result type alias
// =============================================================================

/// A specialized Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;
