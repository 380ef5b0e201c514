//! Repository trait definitions for the domain layer.
//!
//! The store contract is implemented by the in-memory and PostgreSQL
//! backends in `crate::infrastructure::persistence`. Mock implementations are
//! generated via `mockall` for unit tests.

pub mod url_store;

pub use url_store::UrlStore;

#[cfg(test)]
pub use url_store::MockUrlStore;
