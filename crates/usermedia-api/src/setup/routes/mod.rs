//! Route configuration and setup.
//!
//! Domain route groups live in [domains](domains); health checks in [health](health).

mod domains;
mod health;

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderValue, Method};
use axum::routing::get;
use axum::Router;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use usermedia_core::Config;
use usermedia_infra::{request_id_middleware, security_headers_middleware};

use crate::auth::middleware::{auth_middleware, AuthState};
use crate::constants::{MAX_CONCURRENT_REQUESTS, MULTIPART_OVERHEAD_BYTES};
use crate::state::AppState;

/// Setup all application routes
pub fn setup_routes(config: &Config, state: Arc<AppState>) -> Result<Router<()>, anyhow::Error> {
    let cors = setup_cors(config)?;
    let auth_state = setup_auth_state(config)?;

    let public_routes = public_routes(state.clone());
    let protected_routes = protected_routes(state.clone()).layer(
        axum::middleware::from_fn_with_state(Arc::new(auth_state), auth_middleware),
    );

    // The body limit leaves headroom over the file cap for multipart framing;
    // oversized files inside it are still rejected by validation.
    let app = public_routes
        .merge(protected_routes)
        .layer(ConcurrencyLimitLayer::new(MAX_CONCURRENT_REQUESTS))
        .layer(RequestBodyLimitLayer::new(
            config.max_file_size_bytes() + MULTIPART_OVERHEAD_BYTES,
        ))
        .layer(DefaultBodyLimit::disable())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(axum::middleware::from_fn(request_id_middleware))
        .layer(axum::middleware::from_fn(security_headers_middleware))
        .with_state(state);

    Ok(app)
}

fn setup_cors(config: &Config) -> Result<CorsLayer, anyhow::Error> {
    let cors = if config.cors_origins().contains(&"*".to_string()) {
        tracing::warn!("CORS configured to allow all origins - not recommended for production");
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
            .allow_headers(Any)
    } else {
        let origins: Result<Vec<HeaderValue>, _> =
            config.cors_origins().iter().map(|o| o.parse()).collect();
        CorsLayer::new()
            .allow_origin(origins.unwrap_or_default())
            .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
            .allow_headers(Any)
    };
    Ok(cors)
}

fn setup_auth_state(config: &Config) -> Result<AuthState, anyhow::Error> {
    let service_api_key = config.service_api_key().to_string();

    if service_api_key.len() < 32 {
        return Err(anyhow::anyhow!(
            "SERVICE_API_KEY must be at least 32 characters long"
        ));
    }

    Ok(AuthState { service_api_key })
}

fn public_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/health",
            get({
                let state = state.clone();
                move || {
                    let state = state.clone();
                    async { health::health_check(state).await }
                }
            }),
        )
        .with_state(state)
}

fn protected_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .merge(domains::image_routes(state.clone()))
        .merge(domains::upload_routes(state.clone()))
        .merge(domains::admin_routes(state.clone()))
        .merge(domains::gallery_routes(state.clone()))
        .with_state(state)
}
