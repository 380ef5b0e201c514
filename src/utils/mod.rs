//! Utility functions for code derivation and database error handling.
//!
//! - [`code_generator`] - Content-addressed short code derivation
//! - [`db_error`] - SQLx error classification

pub mod code_generator;
pub mod db_error;
