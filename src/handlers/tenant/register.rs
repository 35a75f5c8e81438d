use axum::{extract::State, Json};

use crate::app::AppState;
use crate::database::models::TenantDetails;
use crate::error::ApiError;

/// ANY /register - onboard a new tenant, answering with a plain-text result
pub async fn register_tenant(
    State(state): State<AppState>,
    Json(details): Json<TenantDetails>,
) -> Result<String, ApiError> {
    let company = details.company_name.clone();
    let registration = state.registration.register(details).await.map_err(|e| {
        tracing::error!("Registering tenant for '{}' failed: {}", company, e);
        ApiError::from(e)
    })?;

    Ok(format!(
        "Tenant {} registered successfully",
        registration.tenant_id
    ))
}
