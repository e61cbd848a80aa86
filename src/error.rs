//! Error types for the Arbor library.
//!
//! All fallible operations return [`Result`], whose error type is the
//! [`ArborError`] enum. Configuration problems (bad rule tables, malformed
//! scope patterns) are surfaced when the tables are built, before any sentence
//! is processed; contract violations on input trees get their own variant so
//! callers can tell them apart from configuration mistakes.
//!
//! # Examples
//!
//! ```
//! use arbor::error::{ArborError, Result};
//!
//! fn check(categories: &[String]) -> Result<()> {
//!     if categories.is_empty() {
//!         return Err(ArborError::config("empty candidate category list"));
//!     }
//!     Ok(())
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for Arbor operations.
#[derive(Error, Debug)]
pub enum ArborError {
    /// I/O errors (reading tree files, writing output)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Rule-table or registry configuration errors, fatal at build time
    #[error("Configuration error: {0}")]
    Config(String),

    /// No head rule covers a category and no default is configured
    #[error("Head rule error: {0}")]
    HeadRule(String),

    /// Input tree violates the structural contract (e.g. childless interior node)
    #[error("Tree contract error: {0}")]
    TreeContract(String),

    /// Malformed bracketed tree text
    #[error("Tree syntax error: {0}")]
    TreeSyntax(String),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for operations that may fail with [`ArborError`].
pub type Result<T> = std::result::Result<T, ArborError>;

impl ArborError {
    /// Create a new configuration error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        ArborError::Config(msg.into())
    }

    /// Create a new head-rule error.
    pub fn head_rule<S: Into<String>>(msg: S) -> Self {
        ArborError::HeadRule(msg.into())
    }

    /// Create a new tree-contract error.
    pub fn tree_contract<S: Into<String>>(msg: S) -> Self {
        ArborError::TreeContract(msg.into())
    }

    /// Create a new tree-syntax error.
    pub fn tree_syntax<S: Into<String>>(msg: S) -> Self {
        ArborError::TreeSyntax(msg.into())
    }
}
