//! DTOs for the registration endpoint.

use serde::{Deserialize, Serialize};

/// Request to register a long URL.
///
/// `long` is stored verbatim; it is not checked for being a well-formed URL.
#[derive(Debug, Deserialize, Serialize)]
pub struct RegisterRequest {
    pub long: String,
}

/// Response carrying the short code assigned to the long URL.
#[derive(Debug, Deserialize, Serialize)]
pub struct RegisterResponse {
    pub short: String,
}
