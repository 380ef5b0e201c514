//! PostgreSQL implementation of the URL store.

use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

use crate::domain::repositories::UrlStore;
use crate::error::StoreError;
use crate::utils::db_error::{is_unique_violation_on_short, map_sqlx_error};

/// Connection pool tuning for [`PgUrlStore::connect`].
#[derive(Debug, Clone)]
pub struct PoolSettings {
    pub max_connections: u32,
    pub acquire_timeout: Duration,
    pub idle_timeout: Duration,
    pub max_lifetime: Duration,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            max_connections: 10,
            acquire_timeout: Duration::from_secs(30),
            idle_timeout: Duration::from_secs(600),
            max_lifetime: Duration::from_secs(1800),
        }
    }
}

/// Durable URL store over the `urls` table.
///
/// `urls.short` is the primary key, so concurrent inserts of the same code
/// leave exactly one row; the losing insert surfaces as
/// [`StoreError::Conflict`]. Missing rows are detected from an empty result
/// set, never from driver error text.
pub struct PgUrlStore {
    pool: Arc<PgPool>,
}

impl PgUrlStore {
    /// Creates a store over an existing connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    /// Opens a connection pool for `database_url`.
    ///
    /// The connection string is handed to SQLx as-is.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Connect`] if the pool cannot be established.
    pub async fn connect(database_url: &str, settings: PoolSettings) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(settings.max_connections)
            .acquire_timeout(settings.acquire_timeout)
            .idle_timeout(settings.idle_timeout)
            .max_lifetime(settings.max_lifetime)
            .connect(database_url)
            .await
            .map_err(StoreError::Connect)?;

        info!(
            max_connections = settings.max_connections,
            "Connected to database"
        );

        Ok(Self::new(Arc::new(pool)))
    }

    /// Applies the embedded schema migrations.
    pub async fn migrate(&self) -> Result<(), StoreError> {
        sqlx::migrate!("./migrations").run(self.pool.as_ref()).await?;
        debug!("Database migrations applied");
        Ok(())
    }

    /// Counts stored mappings.
    pub async fn count(&self) -> Result<i64, StoreError> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM urls")
            .fetch_one(self.pool.as_ref())
            .await
            .map_err(|e| map_sqlx_error("count", "", e))
    }

    /// Returns a reference to the underlying pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl UrlStore for PgUrlStore {
    async fn save(&self, code: &str, long: &str) -> Result<(), StoreError> {
        let result = sqlx::query("INSERT INTO urls (short, long) VALUES ($1, $2)")
            .bind(code)
            .bind(long)
            .execute(self.pool.as_ref())
            .await;

        match result {
            Ok(_) => Ok(()),
            Err(e) if is_unique_violation_on_short(&e) => Err(StoreError::Conflict {
                code: code.to_owned(),
            }),
            Err(e) => Err(map_sqlx_error("save", code, e)),
        }
    }

    async fn lookup(&self, code: &str) -> Result<String, StoreError> {
        sqlx::query_scalar::<_, String>("SELECT long FROM urls WHERE short = $1")
            .bind(code)
            .fetch_optional(self.pool.as_ref())
            .await
            .map_err(|e| map_sqlx_error("lookup", code, e))?
            .ok_or(StoreError::NotFound)
    }

    async fn exists(&self, code: &str) -> Result<bool, StoreError> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM urls WHERE short = $1)")
            .bind(code)
            .fetch_one(self.pool.as_ref())
            .await
            .map_err(|e| map_sqlx_error("exists", code, e))
    }

    async fn close(&self) -> Result<(), StoreError> {
        if !self.pool.is_closed() {
            self.pool.close().await;
            info!("Database pool closed");
        }
        Ok(())
    }

    async fn health_check(&self) -> bool {
        if self.pool.is_closed() {
            return false;
        }

        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(self.pool.as_ref())
            .await
            .is_ok()
    }
}
