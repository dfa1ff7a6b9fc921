//! Domain models for the herdload import pipeline.
//!
//! This module contains the data structures used throughout the pipeline:
//!
//! - [`RawRow`] - one CSV line mapped to the fixed column names, still text
//! - [`CompanyRecord`] - a validated, normalized row ready for persistence
//! - [`SkipReason`] - why a row was rejected during validation

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Default applied to the free-text fields when the CSV cell is empty.
pub const UNKNOWN: &str = "Unknown";

// =============================================================================
// Raw Row
// =============================================================================

/// One CSV line mapped to the fixed unicorns schema, all columns as text.
///
/// Field order matches the input file:
/// `Company, Valuation ($B), Date Joined, Country, City, Industry,
/// Select Investors`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RawRow {
    /// 1-based line number in the source file, for warning context.
    pub line: usize,
    pub company: String,
    pub valuation: String,
    pub date_joined: String,
    pub country: String,
    pub city: String,
    pub industry: String,
    pub select_investors: String,
}

// =============================================================================
// Skip Reason
// =============================================================================

/// Row-level rejection. Logged and skipped; never aborts the run.
#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    /// The `Company` column is empty.
    MissingCompany { line: usize },
    /// The valuation did not parse as a number after stripping `$` and `,`.
    InvalidValuation { line: usize, company: String, value: String },
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::MissingCompany { line } => {
                write!(f, "Line {}: company name is missing", line)
            }
            SkipReason::InvalidValuation { line, company, value } => {
                write!(
                    f,
                    "Line {}: invalid valuation '{}' for company '{}'",
                    line, value, company
                )
            }
        }
    }
}

// =============================================================================
// Company Record
// =============================================================================

/// A validated, normalized unicorn company, ready for persistence.
///
/// Records are independent of each other; the store assigns the primary key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CompanyRecord {
    /// Company name (never empty).
    pub company: String,
    /// Valuation in billions of dollars.
    pub valuation: f64,
    /// Date the company joined the list. None when the CSV value was
    /// empty or unparsable.
    pub date_joined: Option<NaiveDate>,
    pub country: String,
    pub city: String,
    pub industry: String,
    pub select_investors: String,
}
