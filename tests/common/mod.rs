#![allow(dead_code)]

use digestlink::application::services::UrlService;
use digestlink::domain::repositories::UrlStore;
use digestlink::infrastructure::persistence::MemoryUrlStore;
use digestlink::state::AppState;
use std::sync::Arc;

/// State over a fresh in-memory store with the default shortener.
pub fn create_test_state() -> (AppState, Arc<MemoryUrlStore>) {
    let store = Arc::new(MemoryUrlStore::new());
    let state = AppState::new(store.clone());
    (state, store)
}

/// State whose shortener upper-cases the long URL, making codes predictable.
pub fn create_uppercase_state() -> (AppState, Arc<MemoryUrlStore>) {
    let store = Arc::new(MemoryUrlStore::new());
    let service = UrlService::new(
        store.clone() as Arc<dyn UrlStore>,
        Arc::new(|long: &str| long.to_uppercase()),
    );
    (AppState::from_service(Arc::new(service)), store)
}
