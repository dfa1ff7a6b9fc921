//! High-level import pipeline.
//!
//! Combines all steps: load the CSV, clear the table, validate and insert
//! each row, then report the final count. One pass, fully sequential.
//!
//! # Example
//!
//! ```rust,ignore
//! use herdload::{run, ImportOptions, PgUnicornStore};
//! use std::path::Path;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = PgUnicornStore::connect("postgres://localhost/unicorns").await?;
//!     let report = run(&store, Path::new("unicorns.csv"), ImportOptions::default()).await?;
//!     store.close().await;
//!     println!("Imported {} companies", report.inserted);
//!     Ok(())
//! }
//! ```

use std::path::Path;

use serde::Serialize;
use tracing::{error, info, warn};

use crate::error::ImportResult;
use crate::normalize::validate_and_normalize;
use crate::parser::load_rows;
use crate::store::UnicornStore;

/// Options for the import pipeline.
#[derive(Debug, Clone, Default)]
pub struct ImportOptions {
    /// Validate and report only; never touch the store.
    pub dry_run: bool,
}

/// Result of a complete import run.
#[derive(Debug, Clone, Serialize)]
pub struct ImportReport {
    /// Rows read from the CSV file.
    pub parsed: usize,

    /// Records inserted (or, on a dry run, records that would be).
    pub inserted: usize,

    /// Rows rejected during validation.
    pub skipped: usize,

    /// Per-row insert failures (logged and continued).
    pub insert_errors: usize,

    /// Row count reported by the store after the run. None on a dry run.
    pub total_in_store: Option<i64>,
}

/// Run the import: clear the table, load the CSV, then insert every valid
/// row.
///
/// The table is cleared before the file is opened, so an unreadable CSV
/// still leaves an emptied table behind. Row-level problems (missing
/// company, unparsable valuation, failed insert) are logged and skipped.
/// Run-level failures (unreadable file, failed clear or count) abort with an
/// error. The caller owns the store connection and releases it after the
/// run, on success and failure alike (see [`run_and_close`]).
pub async fn run<S: UnicornStore>(
    store: &S,
    path: &Path,
    options: ImportOptions,
) -> ImportResult<ImportReport> {
    if !options.dry_run {
        let cleared = store.clear().await?;
        info!("Cleared \"unicorns\" table ({} rows)", cleared);
    }

    info!("Reading CSV: {}", path.display());
    let rows = load_rows(path)?;
    info!("Read {} rows", rows.len());

    let mut report = ImportReport {
        parsed: rows.len(),
        inserted: 0,
        skipped: 0,
        insert_errors: 0,
        total_in_store: None,
    };

    for row in &rows {
        let record = match validate_and_normalize(row) {
            Ok(record) => record,
            Err(reason) => {
                warn!("{}. Skipping this record.", reason);
                report.skipped += 1;
                continue;
            }
        };

        if options.dry_run {
            report.inserted += 1;
            continue;
        }

        match store.insert(&record).await {
            Ok(()) => {
                info!("Inserted company: {}", record.company);
                report.inserted += 1;
            }
            Err(e) => {
                error!("Error inserting company {}: {}", record.company, e);
                report.insert_errors += 1;
            }
        }
    }

    if !options.dry_run {
        let total = store.count().await?;
        info!("Total number of companies: {}", total);
        report.total_in_store = Some(total);
    }

    Ok(report)
}

/// Run the import and release the store connection afterwards, on success
/// and failure alike.
pub async fn run_and_close<S: UnicornStore>(
    store: &S,
    path: &Path,
    options: ImportOptions,
) -> ImportResult<ImportReport> {
    let result = run(store, path, options).await;
    store.close().await;
    result
}
