//! Domain layer: the storage contract the rest of the crate is written against.
//!
//! A mapping is a pair `(code, long)`. `code` is derived from `long` by a
//! [`crate::utils::code_generator::Shortener`], is unique within a store and
//! never changes once written. The domain layer has no dependency on HTTP or
//! on a particular database.

pub mod repositories;
