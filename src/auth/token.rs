//! Bearer tokens (HS256)

use crate::core::error::AuthError;
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Token lifetime unless configured otherwise
pub const DEFAULT_TTL_HOURS: i64 = 168;

/// Token payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// User id, as the frontend reads it
    pub id: Uuid,
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

/// Signs tokens with the configured secret
///
/// Without a secret nothing is ever signed: every call fails with
/// [`AuthError::SigningKeyMissing`].
#[derive(Clone)]
pub struct TokenIssuer {
    secret: Option<String>,
    ttl: Duration,
}

impl TokenIssuer {
    pub fn new(secret: Option<String>) -> Self {
        Self {
            secret: secret.filter(|s| !s.trim().is_empty()),
            ttl: Duration::hours(DEFAULT_TTL_HOURS),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.secret.is_some()
    }

    fn secret(&self) -> Result<&[u8], AuthError> {
        self.secret
            .as_deref()
            .map(str::as_bytes)
            .ok_or(AuthError::SigningKeyMissing)
    }

    pub fn issue(&self, user_id: Uuid) -> Result<String, AuthError> {
        let secret = self.secret()?;
        let now = Utc::now();
        let claims = Claims {
            id: user_id,
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(secret),
        )
        .map_err(|e| AuthError::Token(e.to_string()))
    }
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("configured", &self.is_configured())
            .field("ttl", &self.ttl)
            .finish()
    }
}
