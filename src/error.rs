//! Custom error types for the expense dashboard
//!
//! Two kinds matter to callers of the core: `Validation` (the input broke an
//! entity invariant and nothing was changed) and `Storage` (the ledger could
//! not be read or written). The rest cover ambient concerns such as settings,
//! the audit trail and export writers.

use thiserror::Error;

/// The main error type for dashboard operations
#[derive(Error, Debug)]
pub enum DashboardError {
    /// Caller-supplied input violates an entity invariant
    #[error("Validation error: {0}")]
    Validation(String),

    /// Underlying persistence failure (I/O, corruption, poisoned lock)
    #[error("Storage error: {0}")]
    Storage(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors outside the ledger itself
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),
}

impl DashboardError {
    /// Build a validation error for a named field
    pub fn invalid_field(field: &str, reason: impl std::fmt::Display) -> Self {
        Self::Validation(format!("{}: {}", field, reason))
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is a storage error
    pub fn is_storage(&self) -> bool {
        matches!(self, Self::Storage(_))
    }
}

impl From<std::io::Error> for DashboardError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for DashboardError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<crate::models::ExpenseValidationError> for DashboardError {
    fn from(err: crate::models::ExpenseValidationError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<crate::models::GoalValidationError> for DashboardError {
    fn from(err: crate::models::GoalValidationError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<csv::Error> for DashboardError {
    fn from(err: csv::Error) -> Self {
        if err.is_io_error() {
            Self::Io(err.to_string())
        } else {
            Self::Validation(format!("malformed CSV: {}", err))
        }
    }
}

/// Result type alias for dashboard operations
pub type DashboardResult<T> = Result<T, DashboardError>;
