use axum::{
    extract::{Path, State},
    Json,
};

use crate::app::AppState;
use crate::database::models::Artifact;
use crate::error::ApiError;
use crate::middleware::TenantContext;

/// GET /:company/artifact/api/artifacts - all artifacts of the caller's tenant
pub async fn artifacts_list(
    State(state): State<AppState>,
    Path(company): Path<String>,
    TenantContext(tenant): TenantContext,
) -> Result<Json<Vec<Artifact>>, ApiError> {
    tracing::info!("Return artifacts for tenant {} ({})", tenant, company);

    let artifacts = state.artifacts.get_artifacts(&tenant).await?;
    Ok(Json(artifacts))
}
