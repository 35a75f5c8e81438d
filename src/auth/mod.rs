pub mod token;

use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde::{Deserialize, Serialize};

pub use token::{AuthError, JwtTokenManager, TokenManager};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    /// Identity providers commonly emit this as a custom attribute
    #[serde(alias = "custom:tenant-id")]
    pub tenant_id: String,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn new(
        sub: impl Into<String>,
        tenant_id: impl Into<String>,
        expiry_hours: u64,
    ) -> Result<Self, JwtError> {
        let now = Utc::now();
        let exp = i64::try_from(expiry_hours)
            .ok()
            .and_then(Duration::try_hours)
            .and_then(|ttl| now.checked_add_signed(ttl))
            .ok_or(JwtError::InvalidExpiry(expiry_hours))?;

        Ok(Self {
            sub: sub.into(),
            tenant_id: tenant_id.into(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    #[error("JWT generation error: {0}")]
    TokenGeneration(String),
    #[error("Invalid JWT secret")]
    InvalidSecret,
    #[error("Token expiry of {0} hours is out of range")]
    InvalidExpiry(u64),
}

pub fn generate_jwt(claims: &Claims, secret: &str) -> Result<String, JwtError> {
    if secret.is_empty() {
        return Err(JwtError::InvalidSecret);
    }

    let encoding_key = EncodingKey::from_secret(secret.as_bytes());
    let header = Header::default();

    encode(&header, claims, &encoding_key).map_err(|e| JwtError::TokenGeneration(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expiry_is_hours_from_now() {
        let claims = Claims::new("alice", "acme", 2).unwrap();
        assert_eq!(claims.exp - claims.iat, 2 * 3600);
    }

    #[test]
    fn out_of_range_expiry_is_rejected() {
        assert!(matches!(
            Claims::new("alice", "acme", u64::MAX),
            Err(JwtError::InvalidExpiry(u64::MAX))
        ));
        assert!(matches!(
            Claims::new("alice", "acme", i64::MAX as u64),
            Err(JwtError::InvalidExpiry(_))
        ));
    }
}
