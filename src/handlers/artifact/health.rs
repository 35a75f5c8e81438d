use axum::Json;

pub const ARTIFACT_HEALTH_MESSAGE: &str = "Artifact service is up!";

/// ANY /:company/artifact/health/artifact - liveness only, touches nothing
pub async fn artifact_health() -> Json<&'static str> {
    Json(ARTIFACT_HEALTH_MESSAGE)
}
