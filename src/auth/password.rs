//! Password hashing
//!
//! bcrypt is CPU-bound, so both directions run on the blocking pool.

use crate::core::error::AuthError;

#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub async fn hash(&self, plain: &str) -> Result<String, AuthError> {
        let plain = plain.to_string();
        let cost = self.cost;
        tokio::task::spawn_blocking(move || bcrypt::hash(plain, cost))
            .await
            .map_err(|e| AuthError::Hashing(e.to_string()))?
            .map_err(|e| AuthError::Hashing(e.to_string()))
    }

    /// `false` for a wrong password, `Err` only when the stored hash is unusable
    pub async fn verify(&self, plain: &str, hash: &str) -> Result<bool, AuthError> {
        let plain = plain.to_string();
        let hash = hash.to_string();
        tokio::task::spawn_blocking(move || bcrypt::verify(plain, &hash))
            .await
            .map_err(|e| AuthError::Hashing(e.to_string()))?
            .map_err(|e| AuthError::Hashing(e.to_string()))
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new(bcrypt::DEFAULT_COST)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_hash_then_verify() {
        let hasher = PasswordHasher::new(4);
        let hash = hasher.hash("s3cret-pass").await.unwrap();

        assert_ne!(hash, "s3cret-pass");
        assert!(hasher.verify("s3cret-pass", &hash).await.unwrap());
        assert!(!hasher.verify("wrong", &hash).await.unwrap());
    }

    #[tokio::test]
    async fn test_garbage_hash_is_an_error() {
        let hasher = PasswordHasher::new(4);
        assert!(matches!(
            hasher.verify("x", "not-a-bcrypt-hash").await,
            Err(AuthError::Hashing(_))
        ));
    }
}
