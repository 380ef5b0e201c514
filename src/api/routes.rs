//! API route configuration.

use crate::api::handlers::{health_handler, register_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Public API routes. No authentication is applied.
///
/// # Endpoints
///
/// - `POST /register` - Register a long URL and return its short code
/// - `GET  /healthz`  - Store reachability check
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register_handler))
        .route("/healthz", get(health_handler))
}
