use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::role::Role;
use crate::config::{ConfigError, SecurityConfig, MAX_JWT_EXPIRY_HOURS};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub id: i64,
    pub email: String,
    pub role: Role,
    pub iat: i64,
    pub exp: i64,
}

/// Why a token was refused. Callers report each kind differently.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("Token expired")]
    Expired,

    #[error("Invalid token")]
    Malformed(String),

    #[error("Invalid token signature")]
    BadSignature,

    #[error("Token generation failed: {0}")]
    Encoding(String),
}

#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Issues and verifies HS256 identity tokens.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    lifetime: Duration,
}

impl TokenService {
    pub fn new(security: &SecurityConfig) -> Result<Self, ConfigError> {
        let secret = security.jwt_secret.as_str();
        if secret.trim().is_empty() {
            return Err(ConfigError::MissingJwtSecret);
        }
        let hours = security.jwt_expiry_hours;
        if !(1..=MAX_JWT_EXPIRY_HOURS).contains(&hours) {
            return Err(ConfigError::InvalidValue {
                name: "JWT_EXPIRY_HOURS",
                value: hours.to_string(),
            });
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_exp = true;

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            lifetime: Duration::hours(hours as i64),
        })
    }

    pub fn issue(&self, id: i64, email: &str, role: Role) -> Result<IssuedToken, TokenError> {
        self.issue_at(id, email, role, Utc::now())
    }

    pub(crate) fn issue_at(
        &self,
        id: i64,
        email: &str,
        role: Role,
        now: DateTime<Utc>,
    ) -> Result<IssuedToken, TokenError> {
        let expires_at = now
            .checked_add_signed(self.lifetime)
            .ok_or_else(|| TokenError::Encoding("token expiry out of range".to_string()))?;
        let claims = Claims {
            id,
            email: email.to_string(),
            role,
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Encoding(e.to_string()))?;

        Ok(IssuedToken { token, expires_at })
    }

    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                ErrorKind::InvalidSignature => TokenError::BadSignature,
                _ => TokenError::Malformed(e.to_string()),
            })
    }
}
