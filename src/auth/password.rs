// Password hashing and verification

use thiserror::Error;

/// bcrypt only reads the first 72 bytes of its input
pub const MAX_PASSWORD_BYTES: usize = 72;

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("Password must not be empty")]
    Empty,

    #[error("Password must be at most 72 bytes")]
    TooLong,

    #[error("Password hashing failed: {0}")]
    Hashing(String),
}

/// bcrypt hasher with a configurable cost factor.
///
/// Both operations run on the blocking thread pool so a slow hash never
/// stalls other requests on the async runtime.
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Hash a plaintext password. The result embeds salt and cost.
    pub async fn hash(&self, plaintext: &str) -> Result<String, CredentialError> {
        check_plaintext(plaintext)?;
        let plaintext = plaintext.to_string();
        let cost = self.cost;

        tokio::task::spawn_blocking(move || {
            bcrypt::hash(plaintext, cost).map_err(|e| CredentialError::Hashing(e.to_string()))
        })
        .await
        .map_err(|e| CredentialError::Hashing(format!("Task join error: {}", e)))?
    }

    /// Check a plaintext password against a stored hash.
    ///
    /// A malformed stored hash is an error, never a plaintext comparison.
    pub async fn verify(&self, plaintext: &str, hash: &str) -> Result<bool, CredentialError> {
        if plaintext.is_empty() {
            return Ok(false);
        }
        let plaintext = plaintext.to_string();
        let hash = hash.to_string();

        tokio::task::spawn_blocking(move || {
            bcrypt::verify(plaintext, &hash).map_err(|e| CredentialError::Hashing(e.to_string()))
        })
        .await
        .map_err(|e| CredentialError::Hashing(format!("Task join error: {}", e)))?
    }
}

fn check_plaintext(plaintext: &str) -> Result<(), CredentialError> {
    if plaintext.is_empty() {
        return Err(CredentialError::Empty);
    }
    if plaintext.len() > MAX_PASSWORD_BYTES {
        return Err(CredentialError::TooLong);
    }
    Ok(())
}
