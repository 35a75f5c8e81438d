use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Json, Response},
};
use serde_json::Value;

use crate::app::AppState;

/// When legacy responses are enabled, every failed artifact API call answers
/// `200 null` instead of its error status.
pub async fn legacy_null_responses(State(state): State<AppState>, request: Request, next: Next) -> Response {
    if !state.config.api.legacy_null_responses {
        return next.run(request).await;
    }

    let path = request.uri().path().to_string();
    let response = next.run(request).await;
    if response.status().is_success() {
        return response;
    }

    tracing::debug!("Collapsing {} response for {} to null", response.status(), path);
    (StatusCode::OK, Json(Value::Null)).into_response()
}
