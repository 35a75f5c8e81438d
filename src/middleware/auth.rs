use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use crate::app::AppState;
use crate::error::ApiError;
use crate::types::TenantId;

/// Tenant of the calling request, resolved from its token before any handler body runs
#[derive(Clone, Debug)]
pub struct TenantContext(pub TenantId);

#[async_trait]
impl FromRequestParts<AppState> for TenantContext {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        match state.token_manager.tenant_id(&parts.headers) {
            Ok(tenant) => Ok(TenantContext(tenant)),
            Err(e) => {
                tracing::warn!("Tenant resolution failed for {} {}: {}", parts.method, parts.uri.path(), e);
                Err(e.into())
            }
        }
    }
}
