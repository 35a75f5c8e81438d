use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    middleware,
    routing::{any, get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::auth::{JwtTokenManager, TokenManager};
use crate::config::AppConfig;
use crate::database::{ArtifactRepository, StoreBackend, TableResolver, TableStoreFactory, TenantStoreFactory};
use crate::handlers;
use crate::middleware::legacy_null_responses;
use crate::services::{ArtifactService, ArtifactServiceImpl, TenantRegistrationService};

/// Shared, immutable per-process state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub token_manager: Arc<dyn TokenManager>,
    pub artifacts: Arc<dyn ArtifactService>,
    pub registration: Arc<TenantRegistrationService>,
    pub backend: Arc<dyn StoreBackend>,
}

impl AppState {
    /// Wire the default collaborators around a storage engine
    pub fn new(config: AppConfig, backend: Arc<dyn StoreBackend>) -> Self {
        let stores: Arc<dyn TenantStoreFactory> = Arc::new(TableStoreFactory::new(
            TableResolver::new(config.store.table_prefix.clone()),
            backend.clone(),
        ));
        let repository = Arc::new(ArtifactRepository::new(stores.clone(), config.store.scan_page_size));
        let token_manager = Arc::new(JwtTokenManager::new(config.security.jwt_secret.clone()));

        Self {
            config: Arc::new(config),
            token_manager,
            artifacts: Arc::new(ArtifactServiceImpl::new(repository)),
            registration: Arc::new(TenantRegistrationService::new(stores)),
            backend,
        }
    }
}

pub fn app(state: AppState) -> Router {
    let max_body = state.config.api.max_request_size_bytes;
    let cors = cors_layer(&state.config);

    let router = Router::new()
        .route("/health", get(handlers::health))
        .merge(artifact_routes(state.clone()))
        .merge(registration_routes())
        .layer(DefaultBodyLimit::max(max_body));

    let router = match cors {
        Some(cors) => router.layer(cors),
        None => router,
    };

    router.layer(TraceLayer::new_for_http()).with_state(state)
}

fn artifact_routes(state: AppState) -> Router<AppState> {
    use handlers::artifact;

    let api = Router::new()
        .route("/:company/artifact/api/artifacts", get(artifact::artifacts_list))
        .route("/:company/artifact/api/artifact", post(artifact::artifact_save))
        .route(
            "/:company/artifact/api/artifact/:artifact_id",
            get(artifact::artifact_get).delete(artifact::artifact_delete),
        )
        .route_layer(middleware::from_fn_with_state(state, legacy_null_responses));

    Router::new()
        .route("/:company/artifact/health/artifact", any(artifact::artifact_health))
        .merge(api)
}

fn registration_routes() -> Router<AppState> {
    use handlers::tenant;

    Router::new()
        .route("/register", any(tenant::register_tenant))
        .route("/amIUp", get(tenant::am_i_up))
}

fn cors_layer(config: &AppConfig) -> Option<CorsLayer> {
    let security = &config.security;
    if !security.enable_cors {
        return None;
    }
    if security.cors_origins.is_empty() || security.cors_origins.iter().any(|o| o == "*") {
        return Some(CorsLayer::permissive());
    }

    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin '{}'", origin);
                None
            }
        })
        .collect();

    Some(
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(tower_http::cors::Any)
            .allow_headers(tower_http::cors::Any),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wildcard_origin_is_permissive() {
        let config = AppConfig::development();
        assert!(cors_layer(&config).is_some());
    }

    #[test]
    fn cors_can_be_disabled() {
        let mut config = AppConfig::development();
        config.security.enable_cors = false;
        assert!(cors_layer(&config).is_none());
    }
}
