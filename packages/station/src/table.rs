//! Delimited station table reading.
//!
//! The export is `;`-separated UTF-8, sometimes with a byte-order mark.
//! Every row is kept as raw text; interpretation happens in
//! [`crate::normalize`].

use std::path::Path;

use crate::StationError;

/// UTF-8 byte-order mark.
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// A table of raw text cells with a header row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    /// Trimmed header names in file order.
    pub headers: Vec<String>,
    /// Trimmed cell values. Short rows are not padded.
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Returns the cell at `column` of `row`, or `None` when the column is
    /// unresolved, the row is short, or the cell is empty.
    #[must_use]
    pub fn cell(&self, row: usize, column: Option<usize>) -> Option<&str> {
        let value = self.rows.get(row)?.get(column?)?;
        if value.is_empty() {
            None
        } else {
            Some(value.as_str())
        }
    }
}

/// Decodes file bytes, first as UTF-8 with a byte-order mark, then as
/// plain UTF-8.
///
/// # Errors
///
/// Returns [`StationError::Encoding`] if neither decoding succeeds.
pub fn decode_utf8(bytes: Vec<u8>) -> Result<String, StationError> {
    if let Some(body) = bytes.strip_prefix(UTF8_BOM) {
        match std::str::from_utf8(body) {
            Ok(text) => return Ok(text.to_owned()),
            Err(e) => log::debug!("UTF-8 with BOM decoding failed ({e}), retrying as plain UTF-8"),
        }
    }

    Ok(String::from_utf8(bytes)?)
}

/// Parses a delimited table from raw bytes.
///
/// # Errors
///
/// Returns [`StationError`] if the bytes cannot be decoded, the CSV is
/// malformed, or there is no header row.
pub fn read_table(bytes: Vec<u8>, delimiter: u8) -> Result<RawTable, StationError> {
    let text = decode_utf8(bytes)?;

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_owned())
        .collect();

    if headers.iter().all(String::is_empty) {
        return Err(StationError::MissingHeader);
    }

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        rows.push(record.iter().map(|v| v.trim().to_owned()).collect());
    }

    log::debug!("Parsed {} rows with {} columns", rows.len(), headers.len());

    Ok(RawTable { headers, rows })
}

/// Reads and parses the station file at `path`.
///
/// # Errors
///
/// Returns [`StationError::Io`] if the file cannot be read, or any error
/// from [`read_table`].
pub fn load_table(path: &Path, delimiter: u8) -> Result<RawTable, StationError> {
    let bytes = std::fs::read(path).map_err(|source| StationError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    log::info!("Read {} bytes from {}", bytes.len(), path.display());

    read_table(bytes, delimiter)
}
