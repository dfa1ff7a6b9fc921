//! CSV loading with the fixed unicorns column mapping.
//!
//! Reads the whole file into memory, detects the encoding, and maps each row
//! positionally onto the seven known columns. There is no header-name
//! dependency: the mapping is supplied explicitly, and a leading literal
//! header row is recognized and dropped.

use std::path::Path;

use csv::ReaderBuilder;
use tracing::debug;

use crate::error::{CsvError, CsvResult};
use crate::models::RawRow;

/// The fixed column mapping, in file order.
pub const COLUMNS: [&str; 7] = [
    "Company",
    "Valuation ($B)",
    "Date Joined",
    "Country",
    "City",
    "Industry",
    "Select Investors",
];

/// Detect the encoding of raw bytes using chardet.
pub fn detect_encoding(bytes: &[u8]) -> String {
    let (charset, _, _) = chardet::detect(bytes);

    // Normalize charset names
    match charset.to_lowercase().as_str() {
        "ascii" | "utf-8" | "utf8" => "utf-8".to_string(),
        "iso-8859-1" | "iso-8859-15" | "latin-1" | "latin1" => "iso-8859-1".to_string(),
        "windows-1252" | "cp1252" => "windows-1252".to_string(),
        _ => charset,
    }
}

/// Decode bytes to a string using the detected encoding.
///
/// Unknown encodings fall back to lossy UTF-8 so a stray byte never aborts
/// the whole import.
pub fn decode_content(bytes: &[u8], encoding: &str) -> String {
    match encoding.to_lowercase().as_str() {
        "iso-8859-1" | "latin-1" | "latin1" | "windows-1252" | "cp1252" => {
            encoding_rs::WINDOWS_1252.decode(bytes).0.to_string()
        }
        _ => String::from_utf8_lossy(bytes).to_string(),
    }
}

/// Read the CSV at `path` and produce one [`RawRow`] per data row.
///
/// The file is read fully into memory. Rows are mapped positionally onto
/// [`COLUMNS`]; missing trailing cells become empty strings and extra cells
/// are ignored. Returns [`CsvError::EmptyFile`] for an empty file.
pub fn load_rows<P: AsRef<Path>>(path: P) -> CsvResult<Vec<RawRow>> {
    let bytes = std::fs::read(path.as_ref())?;
    if bytes.is_empty() {
        return Err(CsvError::EmptyFile);
    }

    let encoding = detect_encoding(&bytes);
    debug!("Detected encoding: {}", encoding);
    let content = decode_content(&bytes, &encoding);

    parse_rows(&content)
}

/// Parse CSV content into raw rows.
///
/// Exposed separately so tests and the `parse` command can work from
/// in-memory strings.
pub fn parse_rows(content: &str) -> CsvResult<Vec<RawRow>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let mut rows = Vec::new();

    for (idx, result) in reader.records().enumerate() {
        let record = result?;
        let line = record
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(idx + 1);

        let field = |i: usize| record.get(i).unwrap_or("").to_string();

        // The mapping is positional; a literal header row carries no data.
        if idx == 0 && record.get(0).map(str::trim) == Some(COLUMNS[0]) {
            debug!("Skipping header row");
            continue;
        }

        if record.iter().all(|f| f.trim().is_empty()) {
            continue;
        }

        rows.push(RawRow {
            line,
            company: field(0),
            valuation: field(1),
            date_joined: field(2),
            country: field(3),
            city: field(4),
            industry: field(5),
            select_investors: field(6),
        });
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_fixed_mapping() {
        let csv = "Acme,$1.50,4/7/21,USA,San Francisco,Fintech,Sequoia";
        let rows = parse_rows(csv).unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].company, "Acme");
        assert_eq!(rows[0].valuation, "$1.50");
        assert_eq!(rows[0].date_joined, "4/7/21");
        assert_eq!(rows[0].country, "USA");
        assert_eq!(rows[0].city, "San Francisco");
        assert_eq!(rows[0].industry, "Fintech");
        assert_eq!(rows[0].select_investors, "Sequoia");
    }

    #[test]
    fn test_header_row_dropped() {
        let csv = "Company,Valuation ($B),Date Joined,Country,City,Industry,Select Investors\n\
                   Acme,$1.50,4/7/21,USA,,,";
        let rows = parse_rows(csv).unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].company, "Acme");
    }

    #[test]
    fn test_rows_without_header_kept() {
        let csv = "Acme,$1.50,4/7/21,USA,,,\nGlobex,$2,5/1/19,Germany,,,";
        let rows = parse_rows(csv).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].company, "Globex");
    }

    #[test]
    fn test_missing_trailing_cells() {
        let rows = parse_rows("Acme,$1.50").unwrap();
        assert_eq!(rows[0].valuation, "$1.50");
        assert_eq!(rows[0].country, "");
        assert_eq!(rows[0].select_investors, "");
    }

    #[test]
    fn test_extra_cells_ignored() {
        let rows = parse_rows("Acme,$1,,USA,SF,Fintech,Sequoia,extra,extra").unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].select_investors, "Sequoia");
    }

    #[test]
    fn test_blank_rows_skipped() {
        let rows = parse_rows("Acme,$1,,,,,\n,,,,,,\nGlobex,$2,,,,,").unwrap();
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn test_quoted_investors_with_commas() {
        let csv = "Acme,$1.50,4/7/21,USA,SF,Fintech,\"Sequoia, Andreessen Horowitz\"";
        let rows = parse_rows(csv).unwrap();
        assert_eq!(rows[0].select_investors, "Sequoia, Andreessen Horowitz");
    }

    #[test]
    fn test_line_numbers() {
        let csv = "Company,Valuation ($B),Date Joined,Country,City,Industry,Select Investors\n\
                   Acme,$1,,,,,\n\
                   Globex,$2,,,,,";
        let rows = parse_rows(csv).unwrap();
        assert_eq!(rows[0].line, 2);
        assert_eq!(rows[1].line, 3);
    }

    #[test]
    fn test_load_rows_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Acme,$1.50,4/7/21,USA,,,").unwrap();

        let rows = load_rows(file.path()).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].company, "Acme");
    }

    #[test]
    fn test_load_rows_missing_file() {
        let result = load_rows("/nonexistent/unicorns.csv");
        assert!(matches!(result, Err(CsvError::IoError(_))));
    }

    #[test]
    fn test_load_rows_empty_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let result = load_rows(file.path());
        assert!(matches!(result, Err(CsvError::EmptyFile)));
    }

    #[test]
    fn test_latin1_decoding() {
        // "Société" in ISO-8859-1
        let bytes: &[u8] = &[0x53, 0x6F, 0x63, 0x69, 0xE9, 0x74, 0xE9];
        let decoded = decode_content(bytes, "iso-8859-1");
        assert_eq!(decoded, "Société");
    }

    #[test]
    fn test_detect_encoding_utf8() {
        assert_eq!(detect_encoding("Company,Valuation".as_bytes()), "utf-8");
    }
}
