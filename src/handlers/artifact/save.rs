use axum::{
    extract::{Path, State},
    Json,
};

use crate::app::AppState;
use crate::database::models::Artifact;
use crate::database::ArtifactError;
use crate::error::ApiError;
use crate::middleware::TenantContext;

/// POST /:company/artifact/api/artifact - upsert, echoing the stored artifact.
/// In legacy mode a failed write still echoes the submitted artifact.
pub async fn artifact_save(
    State(state): State<AppState>,
    Path(_company): Path<String>,
    TenantContext(tenant): TenantContext,
    Json(artifact): Json<Artifact>,
) -> Result<Json<Artifact>, ApiError> {
    let submitted = state.config.api.legacy_null_responses.then(|| artifact.clone());

    match (state.artifacts.save(artifact, &tenant).await, submitted) {
        (Ok(saved), _) => {
            tracing::info!("TenantId: {} - saved artifact {}", tenant, saved.id);
            Ok(Json(saved))
        }
        (Err(ArtifactError::Store { .. }), Some(submitted)) => Ok(Json(submitted)),
        (Err(e), _) => Err(e.into()),
    }
}
