//! Error types for PageDB
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using PageDbError
pub type Result<T> = std::result::Result<T, PageDbError>;

/// Unified error type for PageDB operations
#[derive(Debug, Error)]
pub enum PageDbError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Storage Errors
    // -------------------------------------------------------------------------
    #[error("Table full")]
    TableFull,

    #[error("Page {page} is out of bounds (max pages: {max_pages})")]
    CapacityExceeded { page: usize, max_pages: usize },

    // -------------------------------------------------------------------------
    // Statement Errors
    // -------------------------------------------------------------------------
    #[error("Syntax error: {0}")]
    Syntax(String),

    #[error("ID must be positive")]
    NegativeId,

    #[error("String is too long: {field} exceeds {max} bytes")]
    StringTooLong { field: &'static str, max: usize },

    #[error("Unrecognized keyword at start of '{0}'")]
    UnrecognizedStatement(String),

    #[error("Unrecognized command '{0}'")]
    UnrecognizedMetaCommand(String),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl PageDbError {
    /// Whether the error leaves the table in a state that must not be used further.
    ///
    /// I/O failures and capacity breaches are fatal; everything else is a
    /// user-facing condition the shell reports before reading the next line.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            PageDbError::Io(_) | PageDbError::CapacityExceeded { .. } | PageDbError::Config(_)
        )
    }
}
