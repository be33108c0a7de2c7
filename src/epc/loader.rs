//! EPC file loading
//!
//! Supported inputs:
//!
//! - `.txt` / `.csv`: one EPC per line, blank lines ignored
//! - `.xlsx`: first column of the first worksheet, no header row
//!
//! Invalid entries are skipped and logged with their line/row number. A file
//! with no valid entry at all is an error.

use super::Epc;
use crate::error::EpcError;
use calamine::{open_workbook, Data, Range, Reader, Xlsx};
use log::{info, warn};
use std::fs;
use std::path::Path;

/// A file format that yields EPCs.
pub trait EpcSource {
    /// Short name used in log output
    fn format_name(&self) -> &'static str;

    /// Read every valid EPC in file order, skipping invalid entries.
    fn read_epcs(&self, path: &Path) -> Result<Vec<Epc>, EpcError>;
}

/// Plain text or single-column CSV.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextSource;

impl TextSource {
    /// Parse EPCs out of already-loaded text.
    pub fn parse_text(content: &str) -> Vec<Epc> {
        Self::parse_bytes(content.as_bytes())
    }

    /// Parse EPCs out of raw file bytes.
    ///
    /// Lines are split on `\n` before decoding, so a line that is not valid
    /// UTF-8 is skipped like any other bad entry instead of failing the file.
    pub fn parse_bytes(content: &[u8]) -> Vec<Epc> {
        let mut epcs = Vec::new();
        for (idx, raw) in content.split(|&b| b == b'\n').enumerate() {
            let location = format!("line {}", idx + 1);
            let line = match std::str::from_utf8(raw) {
                Ok(line) => line,
                Err(_) => {
                    warn!(
                        "Skipping {}",
                        EpcError::InvalidEntry {
                            location,
                            value: String::from_utf8_lossy(raw).trim().to_string(),
                        }
                    );
                    continue;
                }
            };
            let entry = line.trim();
            if entry.is_empty() {
                continue;
            }
            match parse_entry(entry, location) {
                Ok(epc) => epcs.push(epc),
                Err(e) => warn!("Skipping {e}"),
            }
        }
        epcs
    }
}

impl EpcSource for TextSource {
    fn format_name(&self) -> &'static str {
        "text"
    }

    fn read_epcs(&self, path: &Path) -> Result<Vec<Epc>, EpcError> {
        let content = fs::read(path)?;
        Ok(Self::parse_bytes(&content))
    }
}

/// Excel workbook, first column of the first sheet.
#[derive(Debug, Default, Clone, Copy)]
pub struct XlsxSource;

impl EpcSource for XlsxSource {
    fn format_name(&self) -> &'static str {
        "xlsx"
    }

    fn read_epcs(&self, path: &Path) -> Result<Vec<Epc>, EpcError> {
        let mut workbook: Xlsx<_> =
            open_workbook(path).map_err(|e| EpcError::Spreadsheet(format!("{e}")))?;
        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| EpcError::Spreadsheet("workbook has no worksheet".to_string()))?
            .map_err(|e| EpcError::Spreadsheet(format!("{e}")))?;

        let mut epcs = Vec::new();
        for (row, cell) in first_column_entries(&range) {
            match parse_entry(cell.trim(), format!("row {row}")) {
                Ok(epc) => epcs.push(epc),
                Err(e) => warn!("Skipping {e}"),
            }
        }
        Ok(epcs)
    }
}

/// Column A of every used row, keyed by 1-based sheet row number.
///
/// calamine trims the range to the used cells, so row and column are taken
/// from absolute positions. Rows where column A is outside the used range
/// yield an empty cell.
fn first_column_entries(range: &Range<Data>) -> Vec<(u32, String)> {
    let (Some((first_row, _)), Some((last_row, _))) = (range.start(), range.end()) else {
        return Vec::new();
    };
    (first_row..=last_row)
        .map(|row| {
            let cell = range
                .get_value((row, 0))
                .map(|c| c.to_string())
                .unwrap_or_default();
            (row + 1, cell)
        })
        .collect()
}

/// Pick the source for a path by its (case-insensitive) extension.
pub fn source_for_path(path: &Path) -> Result<Box<dyn EpcSource>, EpcError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "txt" | "csv" => Ok(Box::new(TextSource)),
        "xlsx" => Ok(Box::new(XlsxSource)),
        _ => Err(EpcError::UnsupportedFormat(format!(".{ext}"))),
    }
}

/// Load all valid EPCs from `path`.
///
/// # Errors
/// * `FileNotFound` - `path` does not exist
/// * `UnsupportedFormat` - extension is not .txt, .csv or .xlsx
/// * `NoValidEntries` - nothing valid in the file
pub fn load_epcs<P: AsRef<Path>>(path: P) -> Result<Vec<Epc>, EpcError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(EpcError::FileNotFound(path.to_path_buf()));
    }

    let source = source_for_path(path)?;
    let epcs = source.read_epcs(path)?;
    if epcs.is_empty() {
        return Err(EpcError::NoValidEntries);
    }

    info!(
        "Loaded {} valid EPCs from {} ({})",
        epcs.len(),
        path.file_name().and_then(|n| n.to_str()).unwrap_or_default(),
        source.format_name()
    );
    Ok(epcs)
}

fn parse_entry(entry: &str, location: String) -> Result<Epc, EpcError> {
    Epc::parse(entry).map_err(|_| EpcError::InvalidEntry {
        location,
        value: entry.to_string(),
    })
}
