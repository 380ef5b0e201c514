//! URL store implementations.
//!
//! - [`MemoryUrlStore`] - Volatile, process-local concurrent map
//! - [`PgUrlStore`] - Durable PostgreSQL table via SQLx
//! - [`TimeoutUrlStore`] - Per-operation deadline around any store

pub mod memory_url_store;
pub mod pg_url_store;
pub mod timeout_url_store;

pub use memory_url_store::MemoryUrlStore;
pub use pg_url_store::{PgUrlStore, PoolSettings};
pub use timeout_url_store::TimeoutUrlStore;
