//! Registration and resolution of short codes.

use std::sync::Arc;
use tracing::debug;

use crate::domain::repositories::UrlStore;
use crate::error::{AppError, StoreError};
use crate::utils::code_generator::{Sha256Base62Shortener, Shortener};

/// Service composing a [`Shortener`] with a [`UrlStore`].
///
/// Holds no state of its own; all mappings live in the store.
pub struct UrlService {
    store: Arc<dyn UrlStore>,
    shortener: Arc<dyn Shortener>,
}

impl UrlService {
    /// Creates a service with an explicit shortening strategy.
    pub fn new(store: Arc<dyn UrlStore>, shortener: Arc<dyn Shortener>) -> Self {
        Self { store, shortener }
    }

    /// Creates a service using [`Sha256Base62Shortener`].
    pub fn with_default_shortener(store: Arc<dyn UrlStore>) -> Self {
        Self::new(store, Arc::new(Sha256Base62Shortener))
    }

    /// Registers `long` and returns its short code.
    ///
    /// Repeated calls with the same `long` return the same code and write at
    /// most once. Only the code's presence is checked: if another URL already
    /// owns the code, that earlier mapping is kept and its code is returned.
    ///
    /// A concurrent registration may insert the code between the existence
    /// check and the write; the resulting [`StoreError::Conflict`] is treated
    /// as success.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] if the store fails.
    pub async fn register(&self, long: &str) -> Result<String, AppError> {
        let code = self.shortener.shorten(long);

        if self.store.exists(&code).await? {
            debug!(%code, "short code already registered");
            return Ok(code);
        }

        match self.store.save(&code, long).await {
            Ok(()) => {
                debug!(%code, "registered new short code");
                Ok(code)
            }
            Err(StoreError::Conflict { .. }) => {
                debug!(%code, "short code registered concurrently");
                Ok(code)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Resolves `code` to its long URL.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the code was never registered.
    /// Returns [`AppError::Storage`] if the store fails.
    pub async fn resolve(&self, code: &str) -> Result<String, AppError> {
        Ok(self.store.lookup(code).await?)
    }

    /// Returns the code `long` would be registered under, without storing it.
    pub fn shorten(&self, long: &str) -> String {
        self.shortener.shorten(long)
    }

    /// Reports whether the backing store is reachable.
    pub async fn health_check(&self) -> bool {
        self.store.health_check().await
    }

    /// Closes the backing store. Later calls fail with [`AppError::Storage`].
    pub async fn close(&self) -> Result<(), AppError> {
        Ok(self.store.close().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockUrlStore;
    use crate::error::NOT_FOUND_MESSAGE;
    use crate::infrastructure::persistence::MemoryUrlStore;
    use crate::utils::code_generator::CODE_LENGTH;

    fn uppercase() -> Arc<dyn Shortener> {
        Arc::new(|long: &str| long.to_uppercase())
    }

    fn memory_service() -> (UrlService, Arc<MemoryUrlStore>) {
        let store = Arc::new(MemoryUrlStore::new());
        let service = UrlService::with_default_shortener(store.clone());
        (service, store)
    }

    #[tokio::test]
    async fn test_register_saves_new_code() {
        let mut mock_store = MockUrlStore::new();

        mock_store
            .expect_exists()
            .withf(|code| code == "FOO")
            .times(1)
            .returning(|_| Ok(false));

        mock_store
            .expect_save()
            .withf(|code, long| code == "FOO" && long == "foo")
            .times(1)
            .returning(|_, _| Ok(()));

        let service = UrlService::new(Arc::new(mock_store), uppercase());

        let code = service.register("foo").await.unwrap();
        assert_eq!(code, "FOO");
    }

    #[tokio::test]
    async fn test_register_existing_code_skips_write() {
        let mut mock_store = MockUrlStore::new();

        mock_store.expect_exists().times(1).returning(|_| Ok(true));
        mock_store.expect_save().times(0);

        let service = UrlService::new(Arc::new(mock_store), uppercase());

        let code = service.register("foo").await.unwrap();
        assert_eq!(code, "FOO");
    }

    #[tokio::test]
    async fn test_register_treats_conflict_as_success() {
        let mut mock_store = MockUrlStore::new();

        mock_store.expect_exists().times(1).returning(|_| Ok(false));
        mock_store.expect_save().times(1).returning(|code, _| {
            Err(StoreError::Conflict {
                code: code.to_string(),
            })
        });

        let service = UrlService::new(Arc::new(mock_store), uppercase());

        let code = service.register("foo").await.unwrap();
        assert_eq!(code, "FOO");
    }

    #[tokio::test]
    async fn test_register_propagates_storage_failure() {
        let mut mock_store = MockUrlStore::new();

        mock_store
            .expect_exists()
            .times(1)
            .returning(|_| Err(StoreError::Timeout { operation: "exists" }));
        mock_store.expect_save().times(0);

        let service = UrlService::new(Arc::new(mock_store), uppercase());

        let err = service.register("foo").await.unwrap_err();
        assert!(matches!(
            err,
            AppError::Storage(StoreError::Timeout { .. })
        ));
    }

    #[tokio::test]
    async fn test_register_propagates_save_failure() {
        let mut mock_store = MockUrlStore::new();

        mock_store.expect_exists().times(1).returning(|_| Ok(false));
        mock_store
            .expect_save()
            .times(1)
            .returning(|_, _| Err(StoreError::Closed));

        let service = UrlService::new(Arc::new(mock_store), uppercase());

        let err = service.register("foo").await.unwrap_err();
        assert!(matches!(err, AppError::Storage(StoreError::Closed)));
    }

    #[tokio::test]
    async fn test_resolve_not_found() {
        let mut mock_store = MockUrlStore::new();

        mock_store
            .expect_lookup()
            .withf(|code| code == "foobar")
            .times(1)
            .returning(|_| Err(StoreError::NotFound));

        let service = UrlService::new(Arc::new(mock_store), uppercase());

        let err = service.resolve("foobar").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound));
        assert_eq!(err.to_string(), NOT_FOUND_MESSAGE);
    }

    #[tokio::test]
    async fn test_register_then_resolve_round_trip() {
        let (service, _store) = memory_service();

        for long in ["foo", "https://www.google.com", "", "https://例え.jp/パス"] {
            let code = service.register(long).await.unwrap();
            assert_eq!(code.len(), CODE_LENGTH);
            assert_eq!(service.resolve(&code).await.unwrap(), long);
        }
    }

    #[tokio::test]
    async fn test_register_is_idempotent() {
        let (service, store) = memory_service();

        let first = service.register("foo").await.unwrap();
        let second = service.register("foo").await.unwrap();

        assert_eq!(first, second);
        assert_eq!(first, service.shorten("foo"));
        assert_eq!(store.len(), 1);
        assert_eq!(service.resolve(&first).await.unwrap(), "foo");
    }

    #[tokio::test]
    async fn test_resolve_unregistered_code() {
        let (service, _store) = memory_service();

        let err = service.resolve("foobar").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound));
    }

    #[tokio::test]
    async fn test_colliding_code_keeps_first_url() {
        let store = Arc::new(MemoryUrlStore::new());
        let constant: Arc<dyn Shortener> = Arc::new(|_: &str| "AAAAAA".to_string());
        let service = UrlService::new(store.clone(), constant);

        let first = service.register("https://first.example").await.unwrap();
        let second = service.register("https://second.example").await.unwrap();

        assert_eq!(first, second);
        assert_eq!(
            service.resolve(&first).await.unwrap(),
            "https://first.example"
        );
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_close_releases_store() {
        let (service, store) = memory_service();
        let code = service.register("foo").await.unwrap();

        service.close().await.unwrap();

        assert!(!service.health_check().await);
        assert!(store.is_empty());
        assert!(matches!(
            service.resolve(&code).await,
            Err(AppError::Storage(StoreError::Closed))
        ));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_register_converges() {
        let store = Arc::new(MemoryUrlStore::new());
        let service = Arc::new(UrlService::with_default_shortener(store.clone()));

        let handles: Vec<_> = (0..50)
            .map(|_| {
                let service = Arc::clone(&service);
                tokio::spawn(async move { service.register("https://race.example").await })
            })
            .collect();

        let mut codes = Vec::with_capacity(handles.len());
        for handle in handles {
            codes.push(handle.await.unwrap().unwrap());
        }

        assert!(codes.windows(2).all(|w| w[0] == w[1]));
        assert_eq!(store.len(), 1);
        assert_eq!(
            service.resolve(&codes[0]).await.unwrap(),
            "https://race.example"
        );
    }
}
