//! Handler for the registration endpoint.

use axum::{Json, body::Bytes, extract::State};

use crate::api::dto::register::{RegisterRequest, RegisterResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Registers a long URL and returns its short code.
///
/// # Endpoint
///
/// `POST /register`
///
/// # Request Body
///
/// ```json
/// { "long": "https://www.google.com" }
/// ```
///
/// The body is decoded as JSON whatever `Content-Type` the client sends.
///
/// # Response
///
/// ```json
/// { "short": "ESWP9x" }
/// ```
///
/// Registering the same URL again returns the same code without writing.
///
/// # Errors
///
/// Returns 400 Bad Request if the body is not a JSON object with a `long` string.
/// Returns 500 Internal Server Error if the store fails.
pub async fn register_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<RegisterResponse>, AppError> {
    let request: RegisterRequest = serde_json::from_slice(&body)?;

    let short = state.url_service.register(&request.long).await?;

    Ok(Json(RegisterResponse { short }))
}
