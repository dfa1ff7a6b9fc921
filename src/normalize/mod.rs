//! Row validation and normalization.
//!
//! Turns a [`RawRow`] of untyped CSV text into a typed [`CompanyRecord`],
//! or a [`SkipReason`] when the row cannot be used. Two cleanups carry the
//! interesting logic:
//!
//! - [`parse_date`] - ad-hoc `M/D/Y` parsing with a two-digit-year heuristic
//! - valuation cleanup - strip currency formatting (`$`, `,`) before parsing
//!
//! Rejection here is row-level by design: the caller logs the reason and
//! moves on to the next row.

use chrono::NaiveDate;
use tracing::warn;

use crate::models::{CompanyRecord, RawRow, SkipReason, UNKNOWN};

// =============================================================================
// Date Parsing
// =============================================================================

/// Parse a date in `M/D/Y` or `M/D/YY` form.
///
/// Two-digit years are assumed to be in the 21st century (`21` -> `2021`).
/// Returns `None` (after logging a warning) when the string is empty, is not
/// three slash-separated parts, contains non-numeric parts, or does not form
/// a valid calendar date. Never fails.
///
/// # Example
/// ```
/// use chrono::NaiveDate;
/// use herdload::parse_date;
///
/// assert_eq!(parse_date("4/7/21"), NaiveDate::from_ymd_opt(2021, 4, 7));
/// assert_eq!(parse_date("4/7/2021"), NaiveDate::from_ymd_opt(2021, 4, 7));
/// assert_eq!(parse_date(""), None);
/// assert_eq!(parse_date("not-a-date"), None);
/// ```
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        warn!("Date string is empty");
        return None;
    }

    let parts: Vec<&str> = s.split('/').collect();
    if parts.len() == 3 {
        let month = parts[0].trim().parse::<u32>().ok();
        let day = parts[1].trim().parse::<u32>().ok();
        let year_str = parts[2].trim();
        let year = if year_str.len() == 2 {
            // Two-digit years are 20xx. Documented heuristic, not a bug.
            format!("20{}", year_str).parse::<i32>().ok()
        } else {
            year_str.parse::<i32>().ok()
        };

        if let (Some(month), Some(day), Some(year)) = (month, day, year) {
            if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
                return Some(date);
            }
        }
    }

    warn!("Could not parse date: {}", s);
    None
}

// =============================================================================
// Valuation Cleanup
// =============================================================================

/// Strip currency formatting (`$` and `,`) and parse as a float.
fn parse_valuation(s: &str) -> Option<f64> {
    let cleaned: String = s.trim().chars().filter(|c| *c != '$' && *c != ',').collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok()
}

// =============================================================================
// Validation
// =============================================================================

/// Return the trimmed value, or `"Unknown"` when empty.
fn or_unknown(s: &str) -> String {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        UNKNOWN.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Validate and normalize one raw CSV row.
///
/// Rules, in order:
/// 1. `Company` must be non-empty, otherwise [`SkipReason::MissingCompany`].
/// 2. The valuation must parse as a float after stripping `$` and `,`,
///    otherwise [`SkipReason::InvalidValuation`].
/// 3. The joined date is parsed with [`parse_date`]; `None` is accepted.
/// 4. Country, city, industry and investors default to `"Unknown"` when
///    empty.
pub fn validate_and_normalize(row: &RawRow) -> Result<CompanyRecord, SkipReason> {
    let company = row.company.trim();
    if company.is_empty() {
        return Err(SkipReason::MissingCompany { line: row.line });
    }

    let valuation = parse_valuation(&row.valuation).ok_or_else(|| {
        SkipReason::InvalidValuation {
            line: row.line,
            company: company.to_string(),
            value: row.valuation.clone(),
        }
    })?;

    Ok(CompanyRecord {
        company: company.to_string(),
        valuation,
        date_joined: parse_date(&row.date_joined),
        country: or_unknown(&row.country),
        city: or_unknown(&row.city),
        industry: or_unknown(&row.industry),
        select_investors: or_unknown(&row.select_investors),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(company: &str, valuation: &str, date: &str) -> RawRow {
        RawRow {
            line: 2,
            company: company.into(),
            valuation: valuation.into(),
            date_joined: date.into(),
            country: "USA".into(),
            city: String::new(),
            industry: String::new(),
            select_investors: String::new(),
        }
    }

    #[test]
    fn test_parse_date_short_year() {
        assert_eq!(parse_date("4/7/21"), NaiveDate::from_ymd_opt(2021, 4, 7));
    }

    #[test]
    fn test_parse_date_full_year() {
        assert_eq!(parse_date("4/7/2021"), NaiveDate::from_ymd_opt(2021, 4, 7));
        assert_eq!(parse_date("12/31/2019"), NaiveDate::from_ymd_opt(2019, 12, 31));
    }

    #[test]
    fn test_parse_date_empty() {
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("   "), None);
    }

    #[test]
    fn test_parse_date_garbage() {
        assert_eq!(parse_date("not-a-date"), None);
        assert_eq!(parse_date("4/7"), None);
        assert_eq!(parse_date("4/7/21/9"), None);
        assert_eq!(parse_date("a/b/c"), None);
    }

    #[test]
    fn test_parse_date_invalid_calendar_day() {
        assert_eq!(parse_date("2/30/21"), None);
        assert_eq!(parse_date("13/1/21"), None);
    }

    #[test]
    fn test_valid_row_with_defaults() {
        let record = validate_and_normalize(&raw("Acme", "$1.50", "4/7/21")).unwrap();
        assert_eq!(record.company, "Acme");
        assert_eq!(record.valuation, 1.5);
        assert_eq!(record.date_joined, NaiveDate::from_ymd_opt(2021, 4, 7));
        assert_eq!(record.country, "USA");
        assert_eq!(record.city, "Unknown");
        assert_eq!(record.industry, "Unknown");
        assert_eq!(record.select_investors, "Unknown");
    }

    #[test]
    fn test_missing_company() {
        let result = validate_and_normalize(&raw("", "$1.50", "4/7/21"));
        assert_eq!(result, Err(SkipReason::MissingCompany { line: 2 }));

        let result = validate_and_normalize(&raw("   ", "$1.50", "4/7/21"));
        assert!(matches!(result, Err(SkipReason::MissingCompany { .. })));
    }

    #[test]
    fn test_invalid_valuation() {
        for bad in ["", "abc", "$", "1.2.3"] {
            let result = validate_and_normalize(&raw("Acme", bad, ""));
            assert!(
                matches!(result, Err(SkipReason::InvalidValuation { .. })),
                "expected rejection for {:?}",
                bad
            );
        }
    }

    #[test]
    fn test_valuation_thousands_separator() {
        let record = validate_and_normalize(&raw("Acme", "$1,250.75", "")).unwrap();
        assert_eq!(record.valuation, 1250.75);
    }

    #[test]
    fn test_unparsable_date_is_accepted_as_null() {
        let record = validate_and_normalize(&raw("Acme", "2", "soon")).unwrap();
        assert_eq!(record.date_joined, None);
    }

    #[test]
    fn test_zero_valuation_accepted() {
        let record = validate_and_normalize(&raw("Acme", "$0", "")).unwrap();
        assert_eq!(record.valuation, 0.0);
    }
}
