//! Application layer services implementing business logic.
//!
//! Services consume the store trait and a shortening strategy and provide a
//! clean API for HTTP handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::url_service::UrlService`] - Short code registration and resolution

pub mod services;
