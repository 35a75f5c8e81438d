use axum::{
    extract::{Path, State},
    http::StatusCode,
};

use crate::app::AppState;
use crate::database::models::Artifact;
use crate::error::ApiError;
use crate::middleware::TenantContext;

/// DELETE /:company/artifact/api/artifact/:artifact_id
pub async fn artifact_delete(
    State(state): State<AppState>,
    Path((_company, artifact_id)): Path<(String, String)>,
    TenantContext(tenant): TenantContext,
) -> Result<StatusCode, ApiError> {
    state.artifacts.delete(&Artifact::new(artifact_id), &tenant).await?;
    Ok(StatusCode::NO_CONTENT)
}
