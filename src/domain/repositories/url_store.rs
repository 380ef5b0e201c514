//! Storage contract for short code → long URL mappings.

use crate::error::StoreError;
use async_trait::async_trait;

/// Persistence capability over short code → long URL mappings.
///
/// A store is an unordered map keyed by code. Mappings are immutable: once a
/// code is stored its long URL is never replaced or removed through this
/// trait. All methods must be safe to call concurrently from any number of
/// tasks.
///
/// Dropping a returned future cancels the operation. Deadlines are applied by
/// wrapping a store in [`crate::infrastructure::persistence::TimeoutUrlStore`].
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::MemoryUrlStore`] - process-local map
/// - [`crate::infrastructure::persistence::PgUrlStore`] - PostgreSQL `urls` table
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlStore: Send + Sync {
    /// Persists a new mapping.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Conflict`] if `code` is already stored; the
    /// existing mapping is left untouched.
    /// Returns [`StoreError::Closed`] after [`UrlStore::close`].
    async fn save(&self, code: &str, long: &str) -> Result<(), StoreError>;

    /// Returns the long URL stored for `code`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no mapping exists.
    async fn lookup(&self, code: &str) -> Result<String, StoreError>;

    /// Reports whether a mapping exists for `code` without fetching it.
    async fn exists(&self, code: &str) -> Result<bool, StoreError>;

    /// Releases underlying resources. Calling it more than once is a no-op.
    async fn close(&self) -> Result<(), StoreError>;

    /// Returns `true` if the store can currently serve requests.
    async fn health_check(&self) -> bool;
}
