//! Route configuration and setup.
//!
//! API routes live here; health checks in [health](health).

mod health;

use crate::auth::middleware::{auth_middleware, AuthState};
use crate::handlers;
use crate::state::AppState;
use axum::{
    http::{HeaderValue, Method},
    routing::{get, post},
    Json, Router,
};
use shutter_core::Config;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Setup all application routes
pub async fn setup_routes(
    config: &Config,
    state: Arc<AppState>,
) -> Result<Router<()>, anyhow::Error> {
    let cors = setup_cors(config)?;

    let public_routes = public_routes();
    let mut api_routes = api_routes();

    // The CORS layer sits outside the auth layer and answers preflight
    // requests itself, so OPTIONS never needs a token.
    if config.auth_enabled() {
        let auth_state = setup_auth_state(&state)?;
        api_routes = api_routes.layer(axum::middleware::from_fn_with_state(
            Arc::new(auth_state),
            auth_middleware,
        ));
    }

    let app = public_routes
        .merge(api_routes)
        .nest(
            "/docs",
            utoipa_rapidoc::RapiDoc::new("/api/openapi.json")
                .path("/docs")
                .into(),
        )
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    Ok(app)
}

fn setup_cors(config: &Config) -> Result<CorsLayer, anyhow::Error> {
    let cors = if config.cors_origins().contains(&"*".to_string()) {
        tracing::warn!("CORS configured to allow all origins - not recommended for production");
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers(Any)
    } else {
        let origins: Result<Vec<HeaderValue>, _> =
            config.cors_origins().iter().map(|o| o.parse()).collect();
        CorsLayer::new()
            .allow_origin(origins.unwrap_or_default())
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers(Any)
    };
    Ok(cors)
}

fn setup_auth_state(state: &Arc<AppState>) -> Result<AuthState, anyhow::Error> {
    let jwt = state
        .jwt
        .clone()
        .ok_or_else(|| anyhow::anyhow!("Auth enabled but no JWT validator configured"))?;
    Ok(AuthState { jwt })
}

/// Health checks and docs: always reachable, even with auth enabled.
fn public_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/live", get(health::liveness_check))
        .route(
            "/api/openapi.json",
            get(|| async { Json(crate::api_doc::get_openapi_spec()) }),
        )
}

fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/uploads/init", post(handlers::upload_init::init_upload))
        .route(
            "/api/images/{image_id}",
            get(handlers::image_status::get_image_status),
        )
}
