//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use percent_encoding::{CONTROLS, utf8_percent_encode};

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its long URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// Answers `303 See Other`, so the client follows up with a plain GET
/// whatever method the incoming request used.
///
/// # Errors
///
/// Returns 404 Not Found with
/// `{ "error": "no long url associated to this short url" }` if the code is unknown.
/// Returns 500 Internal Server Error if the store fails.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let long = state.url_service.resolve(&code).await?;

    let location = location_header(&long)?;

    Ok((StatusCode::SEE_OTHER, [(header::LOCATION, location)]).into_response())
}

/// Builds the `Location` value for `long`.
///
/// Stored text is sent verbatim when it is a valid header value. Otherwise
/// control characters are percent-encoded.
fn location_header(long: &str) -> Result<HeaderValue, AppError> {
    if let Ok(value) = HeaderValue::from_str(long) {
        return Ok(value);
    }

    let escaped = utf8_percent_encode(long, CONTROLS).to_string();
    HeaderValue::from_str(&escaped).map_err(|e| AppError::InvalidTarget(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_location_is_verbatim() {
        let value = location_header("https://例え.jp/パス?q=1").unwrap();
        assert_eq!(value.as_bytes(), "https://例え.jp/パス?q=1".as_bytes());
    }

    #[test]
    fn test_control_characters_are_escaped() {
        let value = location_header("https://a.example/x\ny\r\u{7f}").unwrap();
        assert_eq!(value, "https://a.example/x%0Ay%0D%7F");
    }
}
