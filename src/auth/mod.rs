use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::task::{spawn_blocking, JoinError};

use crate::config::SecurityConfig;

pub const TOKEN_ISSUER: &str = "follooow-api";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// User id (hex ObjectId)
    pub sub: String,
    pub username: String,
    pub exp: i64,
    pub iat: i64,
    pub iss: String,
}

impl Claims {
    pub fn new(user_id: String, username: String, expiry_hours: u64) -> Self {
        let now = Utc::now();
        let exp = (now + Duration::hours(expiry_hours as i64)).timestamp();

        Self {
            sub: user_id,
            username,
            exp,
            iat: now.timestamp(),
            iss: TOKEN_ISSUER.to_string(),
        }
    }
}

#[derive(Debug)]
pub enum JwtError {
    TokenGeneration(String),
    TokenValidation(String),
    InvalidSecret,
}

impl std::fmt::Display for JwtError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JwtError::TokenGeneration(msg) => write!(f, "JWT generation error: {}", msg),
            JwtError::TokenValidation(msg) => write!(f, "JWT validation error: {}", msg),
            JwtError::InvalidSecret => write!(f, "Invalid JWT secret"),
        }
    }
}

impl std::error::Error for JwtError {}

pub fn generate_jwt(claims: &Claims, secret: &str) -> Result<String, JwtError> {
    if secret.is_empty() {
        return Err(JwtError::InvalidSecret);
    }

    let encoding_key = EncodingKey::from_secret(secret.as_bytes());
    encode(&Header::default(), claims, &encoding_key).map_err(|e| JwtError::TokenGeneration(e.to_string()))
}

#[cfg(test)]
pub fn verify_jwt(token: &str, secret: &str) -> Result<Claims, JwtError> {
    use jsonwebtoken::{decode, DecodingKey, Validation};

    if secret.is_empty() {
        return Err(JwtError::InvalidSecret);
    }

    let mut validation = Validation::default();
    validation.set_issuer(&[TOKEN_ISSUER]);

    decode::<Claims>(token, &DecodingKey::from_secret(secret.as_bytes()), &validation)
        .map(|data| data.claims)
        .map_err(|e| JwtError::TokenValidation(e.to_string()))
}

/// Session token for a freshly authenticated user, or `None` when no
/// signing secret is configured.
pub fn issue_token(security: &SecurityConfig, user_id: &str, username: &str) -> Result<Option<String>, JwtError> {
    let Some(secret) = security.jwt_secret.as_deref() else {
        return Ok(None);
    };

    let claims = Claims::new(user_id.to_string(), username.to_string(), security.jwt_expiry_hours);
    generate_jwt(&claims, secret).map(Some)
}

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("bcrypt error: {0}")]
    Bcrypt(#[from] bcrypt::BcryptError),

    #[error("password worker failed: {0}")]
    Worker(#[from] JoinError),
}

/// bcrypt runs on the blocking pool so request workers keep serving.
pub async fn hash_password(password: &str, cost: u32) -> Result<String, PasswordError> {
    let password = password.to_string();
    Ok(spawn_blocking(move || bcrypt::hash(password, cost)).await??)
}

/// A malformed stored hash counts as a mismatch.
pub async fn verify_password(password: &str, hash: &str) -> Result<bool, PasswordError> {
    let (password, hash) = (password.to_string(), hash.to_string());
    Ok(spawn_blocking(move || bcrypt::verify(password, &hash).unwrap_or(false)).await?)
}
