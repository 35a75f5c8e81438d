use axum::http::HeaderMap;
use jsonwebtoken::{decode, DecodingKey, Validation};

use super::Claims;
use crate::types::TenantId;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Missing Authorization header")]
    MissingToken,
    #[error("Authorization header must use Bearer token format")]
    InvalidScheme,
    #[error("Invalid JWT token: {0}")]
    InvalidToken(String),
    #[error("Token carries no tenant id")]
    MissingTenant,
    #[error("JWT secret not configured")]
    NotConfigured,
}

/// Resolves the calling tenant from request credentials
pub trait TokenManager: Send + Sync {
    fn tenant_id(&self, headers: &HeaderMap) -> Result<TenantId, AuthError>;
}

/// HS256 bearer tokens carrying a `tenant_id` claim
pub struct JwtTokenManager {
    secret: String,
}

impl JwtTokenManager {
    pub fn new(secret: impl Into<String>) -> Self {
        Self { secret: secret.into() }
    }

    /// Validate JWT token and extract claims
    pub fn validate(&self, token: &str) -> Result<Claims, AuthError> {
        if self.secret.is_empty() {
            return Err(AuthError::NotConfigured);
        }

        let decoding_key = DecodingKey::from_secret(self.secret.as_bytes());
        let validation = Validation::default();

        let token_data = decode::<Claims>(token, &decoding_key, &validation)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))?;

        Ok(token_data.claims)
    }
}

impl TokenManager for JwtTokenManager {
    fn tenant_id(&self, headers: &HeaderMap) -> Result<TenantId, AuthError> {
        let token = extract_bearer(headers)?;
        let claims = self.validate(token)?;

        if claims.tenant_id.trim().is_empty() {
            return Err(AuthError::MissingTenant);
        }
        Ok(TenantId::new(claims.tenant_id))
    }
}

/// Extract JWT token from Authorization header
fn extract_bearer(headers: &HeaderMap) -> Result<&str, AuthError> {
    let auth_str = headers
        .get(axum::http::header::AUTHORIZATION)
        .ok_or(AuthError::MissingToken)?
        .to_str()
        .map_err(|_| AuthError::InvalidScheme)?;

    let token = auth_str.strip_prefix("Bearer ").ok_or(AuthError::InvalidScheme)?;
    if token.trim().is_empty() {
        return Err(AuthError::MissingToken);
    }
    Ok(token.trim())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{generate_jwt, Claims};
    use axum::http::HeaderValue;

    const SECRET: &str = "test-secret";

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn resolves_tenant_from_valid_token() {
        let token = generate_jwt(&Claims::new("alice", "acme", 1).unwrap(), SECRET).unwrap();
        let manager = JwtTokenManager::new(SECRET);
        let tenant = manager.tenant_id(&headers_with(&format!("Bearer {}", token))).unwrap();
        assert_eq!(tenant.as_str(), "acme");
    }

    #[test]
    fn rejects_missing_and_malformed_headers() {
        let manager = JwtTokenManager::new(SECRET);
        assert_eq!(manager.tenant_id(&HeaderMap::new()), Err(AuthError::MissingToken));
        assert_eq!(manager.tenant_id(&headers_with("Basic abc")), Err(AuthError::InvalidScheme));
        assert_eq!(manager.tenant_id(&headers_with("Bearer  ")), Err(AuthError::MissingToken));
        assert!(matches!(
            manager.tenant_id(&headers_with("Bearer not-a-jwt")),
            Err(AuthError::InvalidToken(_))
        ));
    }

    #[test]
    fn rejects_token_signed_with_other_secret() {
        let token = generate_jwt(&Claims::new("alice", "acme", 1).unwrap(), "other").unwrap();
        let manager = JwtTokenManager::new(SECRET);
        assert!(matches!(
            manager.tenant_id(&headers_with(&format!("Bearer {}", token))),
            Err(AuthError::InvalidToken(_))
        ));
    }

    #[test]
    fn rejects_expired_token() {
        let mut claims = Claims::new("alice", "acme", 1).unwrap();
        claims.exp = chrono::Utc::now().timestamp() - 3600;
        let token = generate_jwt(&claims, SECRET).unwrap();
        let manager = JwtTokenManager::new(SECRET);
        assert!(matches!(
            manager.tenant_id(&headers_with(&format!("Bearer {}", token))),
            Err(AuthError::InvalidToken(_))
        ));
    }

    #[test]
    fn empty_tenant_claim_is_rejected() {
        let token = generate_jwt(&Claims::new("alice", "", 1).unwrap(), SECRET).unwrap();
        let manager = JwtTokenManager::new(SECRET);
        assert_eq!(
            manager.tenant_id(&headers_with(&format!("Bearer {}", token))),
            Err(AuthError::MissingTenant)
        );
    }
}
