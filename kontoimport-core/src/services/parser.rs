//! Header-locating parser for bank CSV exports
//!
//! Exports start with a block of metadata lines ("Umsatzanzeige", "IBAN",
//! "Zeitraum", ...) of varying length. The real table begins at the first
//! line starting with [`HEADER_MARKER`].

use std::path::Path;

use encoding_rs::WINDOWS_1252;
use tracing::{debug, info};

use crate::domain::result::{Error, Result};
use crate::services::truncate;

/// First column of the table header
pub const HEADER_MARKER: &str = "Buchung";

/// Field separator of the export
pub const DELIMITER: u8 = b';';

/// One table row, with columns in their original left-to-right order.
///
/// Duplicate column names are kept, so positional lookups among them work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRecord {
    /// 0-based position among emitted records (blank rows never count)
    pub row_index: usize,
    pub fields: Vec<(String, String)>,
}

impl ParsedRecord {
    /// Value of the first column named exactly `name`
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(column, _)| column == name)
            .map(|(_, value)| value.as_str())
    }

    /// Values of every column whose name contains `fragment`, in column order
    pub fn values_containing(&self, fragment: &str) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|(column, _)| column.contains(fragment))
            .map(|(_, value)| value.as_str())
            .collect()
    }

    fn is_blank(&self) -> bool {
        self.fields.iter().all(|(_, value)| value.trim().is_empty())
    }
}

/// Parsed table of one export file
#[derive(Debug, Clone)]
pub struct ParsedTable {
    /// Line number (0-based) of the header within the decoded file
    pub header_line: usize,
    pub columns: Vec<String>,
    pub records: Vec<ParsedRecord>,
}

/// Decode a legacy single-byte export. Never fails.
pub fn decode(bytes: &[u8]) -> String {
    let (text, had_errors) = WINDOWS_1252.decode_without_bom_handling(bytes);
    if had_errors {
        debug!("Replaced undecodable bytes while decoding export");
    }
    text.into_owned()
}

/// Index of the first line that starts with the header marker
pub fn find_header<'a, I>(lines: I) -> Option<usize>
where
    I: IntoIterator<Item = &'a str>,
{
    lines.into_iter().position(|line| {
        let line = line.trim();
        line.starts_with(HEADER_MARKER)
            || line
                .strip_prefix('"')
                .is_some_and(|rest| rest.starts_with(HEADER_MARKER))
    })
}

/// Read, decode and parse an export file
pub fn parse_file(path: &Path) -> Result<ParsedTable> {
    let bytes = std::fs::read(path)?;
    parse_text(&decode(&bytes))
}

/// Parse decoded export text into records
pub fn parse_text(text: &str) -> Result<ParsedTable> {
    let lines: Vec<&str> = text.lines().collect();
    let header_line = find_header(lines.iter().copied()).ok_or_else(|| Error::HeaderNotFound {
        marker: HEADER_MARKER.to_string(),
    })?;
    info!(
        line = header_line,
        header = %truncate(lines[header_line].trim(), 80),
        "Found table header"
    );

    let table = lines[header_line..].join("\n");
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(DELIMITER)
        .has_headers(true)
        .flexible(true)
        .from_reader(table.as_bytes());

    let columns: Vec<String> = reader
        .headers()?
        .iter()
        .map(|name| name.trim().to_string())
        .collect();

    let mut records = Vec::new();
    for result in reader.records() {
        let row = result?;
        let fields = columns
            .iter()
            .enumerate()
            .map(|(i, column)| (column.clone(), row.get(i).unwrap_or("").to_string()))
            .collect();

        let record = ParsedRecord {
            row_index: records.len(),
            fields,
        };
        if record.is_blank() {
            continue;
        }
        records.push(record);
    }

    info!(rows = records.len(), "Parsed data rows");
    Ok(ParsedTable {
        header_line,
        columns,
        records,
    })
}
