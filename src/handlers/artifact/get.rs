use axum::{
    extract::{Path, State},
    Json,
};

use crate::app::AppState;
use crate::database::models::Artifact;
use crate::database::repository::ArtifactError;
use crate::error::ApiError;
use crate::middleware::TenantContext;

/// GET /:company/artifact/api/artifact/:artifact_id - single artifact lookup
pub async fn artifact_get(
    State(state): State<AppState>,
    Path((_company, artifact_id)): Path<(String, String)>,
    TenantContext(tenant): TenantContext,
) -> Result<Json<Artifact>, ApiError> {
    match state.artifacts.get_artifact_by_id(&artifact_id, &tenant).await? {
        Some(artifact) => Ok(Json(artifact)),
        None => {
            tracing::debug!("TenantId: {} - artifact {} not found", tenant, artifact_id);
            Err(ArtifactError::NotFound { id: artifact_id }.into())
        }
    }
}
