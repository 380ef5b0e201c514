//! Deadline enforcement for any URL store.

use async_trait::async_trait;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

use crate::domain::repositories::UrlStore;
use crate::error::StoreError;

/// Wraps a store and bounds every operation by a fixed deadline.
///
/// When the deadline elapses the inner future is dropped, which aborts the
/// in-flight I/O, and [`StoreError::Timeout`] is returned. No retry is made.
pub struct TimeoutUrlStore {
    inner: Arc<dyn UrlStore>,
    timeout: Duration,
}

impl TimeoutUrlStore {
    pub fn new(inner: Arc<dyn UrlStore>, timeout: Duration) -> Self {
        Self { inner, timeout }
    }

    async fn run<T, F>(&self, operation: &'static str, code: &str, fut: F) -> Result<T, StoreError>
    where
        F: Future<Output = Result<T, StoreError>> + Send,
    {
        match tokio::time::timeout(self.timeout, fut).await {
            Ok(result) => result,
            Err(_) => {
                warn!(
                    operation,
                    code,
                    timeout_ms = self.timeout.as_millis() as u64,
                    "store operation timed out"
                );
                Err(StoreError::Timeout { operation })
            }
        }
    }
}

#[async_trait]
impl UrlStore for TimeoutUrlStore {
    async fn save(&self, code: &str, long: &str) -> Result<(), StoreError> {
        self.run("save", code, self.inner.save(code, long)).await
    }

    async fn lookup(&self, code: &str) -> Result<String, StoreError> {
        self.run("lookup", code, self.inner.lookup(code)).await
    }

    async fn exists(&self, code: &str) -> Result<bool, StoreError> {
        self.run("exists", code, self.inner.exists(code)).await
    }

    async fn close(&self) -> Result<(), StoreError> {
        self.run("close", "", self.inner.close()).await
    }

    async fn health_check(&self) -> bool {
        tokio::time::timeout(self.timeout, self.inner.health_check())
            .await
            .unwrap_or(false)
    }
}
