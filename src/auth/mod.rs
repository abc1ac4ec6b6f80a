//! Credential handling for staff sign-in
//!
//! - [`PasswordHasher`]: bcrypt with the configured cost
//! - [`TokenIssuer`]: signed bearer tokens, refusing to sign without a secret

pub mod password;
pub mod token;

pub use password::PasswordHasher;
pub use token::{Claims, TokenIssuer};

use crate::config::AppConfig;

/// Everything the sign-in and sign-up handlers need
#[derive(Debug, Clone)]
pub struct Authenticator {
    pub hasher: PasswordHasher,
    pub tokens: TokenIssuer,
}

impl Authenticator {
    pub fn new(hasher: PasswordHasher, tokens: TokenIssuer) -> Self {
        Self { hasher, tokens }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            PasswordHasher::new(config.bcrypt_cost),
            TokenIssuer::new(config.jwt_secret.clone()),
        )
    }
}
