//! # Herdload - unicorn-company CSV to Postgres importer
//!
//! Herdload loads rows from a fixed-schema `unicorns.csv` file into a
//! Postgres `unicorns` table, clearing prior contents first.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   CSV File  │────▶│   Parser    │────▶│  Normalize  │────▶│    Store    │
//! │ (unicorns)  │     │ (fixed map) │     │ (validate)  │     │ (Postgres)  │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! One pass, fully sequential. Rows that fail validation or insertion are
//! logged and skipped; the run only aborts on file or connection failures.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use herdload::{run, ImportOptions, PgUnicornStore};
//! use std::path::Path;
//!
//! #[tokio::main]
//! async fn main() {
//!     let store = PgUnicornStore::connect("postgres://localhost/unicorns")
//!         .await
//!         .unwrap();
//!     let report = run(&store, Path::new("unicorns.csv"), ImportOptions::default())
//!         .await
//!         .unwrap();
//!     store.close().await;
//!     println!("Imported {} companies", report.inserted);
//! }
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Hierarchical error types
//! - [`models`] - Domain models (RawRow, CompanyRecord, SkipReason)
//! - [`parser`] - CSV loading with the fixed column mapping
//! - [`normalize`] - Date parsing, valuation cleanup, validation
//! - [`store`] - Postgres store behind the UnicornStore trait
//! - [`import`] - Pipeline orchestration

// Core modules
pub mod error;
pub mod models;

// Parsing
pub mod parser;

// Normalization
pub mod normalize;

// Persistence
pub mod store;

// Pipeline
pub mod import;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{CsvError, CsvResult, ImportError, ImportResult, StoreError, StoreResult};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use models::{CompanyRecord, RawRow, SkipReason, UNKNOWN};

// =============================================================================
// Re-exports - CSV Parsing
// =============================================================================

pub use parser::{detect_encoding, load_rows, parse_rows, COLUMNS};

// =============================================================================
// Re-exports - Normalization
// =============================================================================

pub use normalize::{parse_date, validate_and_normalize};

// =============================================================================
// Re-exports - Store
// =============================================================================

pub use store::{NullStore, PgUnicornStore, UnicornStore};

// =============================================================================
// Re-exports - Pipeline
// =============================================================================

pub use import::{run, run_and_close, ImportOptions, ImportReport};
