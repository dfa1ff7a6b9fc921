//! Error types for the herdload import pipeline.
//!
//! Two tiers mirror the runtime behaviour:
//!
//! - [`CsvError`] and [`StoreError`] - run-level failures that abort the
//!   import (unreadable file, broken connection, failed table clear).
//! - Row-level problems are *not* errors: they are [`crate::models::SkipReason`]
//!   values, logged and skipped while the run continues.
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries.

use thiserror::Error;

// =============================================================================
// CSV Loading Errors
// =============================================================================

/// Errors while reading the input CSV file.
#[derive(Debug, Error)]
pub enum CsvError {
    /// Failed to read file.
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    /// Malformed CSV content.
    #[error("Invalid CSV format: {0}")]
    ParseError(#[from] csv::Error),

    /// Empty file.
    #[error("CSV file is empty")]
    EmptyFile,
}

// =============================================================================
// Store Errors
// =============================================================================

/// Errors from the Postgres store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Could not connect to the database.
    #[error("Failed to connect to database: {0}")]
    Connect(#[source] sqlx::Error),

    /// Schema migration failed.
    #[error("Migration failed: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    /// Query execution failed.
    #[error("Database error: {0}")]
    Query(#[from] sqlx::Error),
}

// =============================================================================
// Import Errors (top-level)
// =============================================================================

/// Top-level import orchestration errors.
///
/// This is the main error type returned by [`crate::import::run`]. Anything
/// surfacing here is fatal: the run stops and the process exits non-zero.
#[derive(Debug, Error)]
pub enum ImportError {
    /// CSV loading error.
    #[error("CSV error: {0}")]
    Csv(#[from] CsvError),

    /// Store error on the run-level path (connect, clear, count).
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for CSV loading.
pub type CsvResult<T> = Result<T, CsvError>;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Result type for the import pipeline.
pub type ImportResult<T> = Result<T, ImportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_conversion_chain() {
        // CsvError -> ImportError
        let csv_err = CsvError::EmptyFile;
        let import_err: ImportError = csv_err.into();
        assert!(import_err.to_string().contains("empty"));

        // io::Error -> CsvError -> ImportError
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let import_err: ImportError = ImportError::Csv(io_err.into());
        assert!(import_err.to_string().contains("no such file"));
    }
}
