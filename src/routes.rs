//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `POST /register` - Register a long URL
//! - `GET  /healthz`  - Health check
//! - `GET  /{code}`   - Short code redirect
//!
//! Static segments take precedence over the `/{code}` capture, so every
//! static path is longer than a short code and never shadows one.

use crate::api;
use crate::api::handlers::redirect_handler;
use crate::api::middleware::tracing;
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and tracing.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/{code}", get(redirect_handler))
        .merge(api::routes::public_routes())
        .with_state(state)
        .layer(tracing::layer())
}

/// Wraps [`app_router`] so `/abc123/` and `/abc123` reach the same handler.
pub fn normalized_router(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(app_router(state))
}
