//! Shared application state injected into handlers.

use std::sync::Arc;

use crate::application::services::UrlService;
use crate::domain::repositories::UrlStore;

/// State cloned into every request handler.
#[derive(Clone)]
pub struct AppState {
    pub url_service: Arc<UrlService>,
}

impl AppState {
    /// Builds state around `store` with the default SHA-256 shortener.
    pub fn new(store: Arc<dyn UrlStore>) -> Self {
        Self {
            url_service: Arc::new(UrlService::with_default_shortener(store)),
        }
    }

    /// Builds state around an already configured service.
    pub fn from_service(url_service: Arc<UrlService>) -> Self {
        Self { url_service }
    }
}
