//! Report rendering and persistence
//!
//! The report rows are passed in explicitly; nothing here keeps state between
//! an analysis and a save.

use super::grouping::{AnalysisSummary, GroupAnalysis};
use crate::constants::REPORT_COLUMNS;
use crate::error::EpcError;
use log::info;
use rust_xlsxwriter::{Format, Workbook, XlsxError};
use std::fmt::Write as _;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

/// Render the rows as a fixed-width text table with a header line.
pub fn render_table(rows: &[GroupAnalysis]) -> String {
    let cells: Vec<[String; 9]> = rows.iter().map(row_cells).collect();

    let mut widths = REPORT_COLUMNS.map(str::len);
    for row in &cells {
        for (w, cell) in widths.iter_mut().zip(row.iter()) {
            *w = (*w).max(cell.len());
        }
    }

    let mut out = String::new();
    let header: Vec<String> = REPORT_COLUMNS
        .iter()
        .zip(widths.iter())
        .map(|(h, &w)| format!("{h:>w$}"))
        .collect();
    out.push_str(&header.join(" "));

    for row in &cells {
        out.push('\n');
        let line: Vec<String> = row
            .iter()
            .zip(widths.iter())
            .map(|(c, &w)| format!("{c:>w$}"))
            .collect();
        out.push_str(&line.join(" "));
    }
    out
}

/// Render the totals block printed under the table.
pub fn render_summary(summary: &AnalysisSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Summary:");
    let _ = writeln!(
        out,
        "  Total EPCs: {} | Groups: {}",
        summary.total_epcs, summary.group_count
    );
    let _ = writeln!(
        out,
        "  Uncompressed: {}B | Compressed: {}B",
        summary.uncompressed_bytes, summary.compressed_bytes
    );
    let _ = write!(
        out,
        "  Savings: {}B ({:.1}%)",
        summary.savings_bytes, summary.savings_pct
    );
    out
}

/// Persist the rows to `path`.
///
/// `.xlsx` writes a workbook with a bold header row; `.json` writes an array
/// of objects keyed by column name.
///
/// # Errors
/// * `UnsupportedOutputFormat` - any other extension
/// * `OutputWriteFailure` - the file could not be written
pub fn save_results<P: AsRef<Path>>(rows: &[GroupAnalysis], path: P) -> Result<PathBuf, EpcError> {
    let path = path.as_ref();
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "xlsx" => write_xlsx(rows, path).map_err(|e| EpcError::OutputWriteFailure(e.to_string()))?,
        "json" => write_json(rows, path)?,
        _ => return Err(EpcError::UnsupportedOutputFormat(format!(".{ext}"))),
    }

    info!("Results saved to {}", path.display());
    Ok(path.to_path_buf())
}

fn write_xlsx(rows: &[GroupAnalysis], path: &Path) -> Result<(), XlsxError> {
    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();
    let sheet = workbook.add_worksheet();

    for (col, title) in REPORT_COLUMNS.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *title, &bold)?;
    }

    for (idx, r) in rows.iter().enumerate() {
        let row = idx as u32 + 1;
        sheet.write_number(row, 0, r.group_id as f64)?;
        sheet.write_string(row, 1, r.prefix.as_str())?;
        sheet.write_number(row, 2, r.prefix_bytes as f64)?;
        sheet.write_number(row, 3, r.suffix_bytes as f64)?;
        sheet.write_number(row, 4, r.suffix_count as f64)?;
        sheet.write_number(row, 5, r.total_payload_bytes as f64)?;
        sheet.write_number(row, 6, r.epcs_sf7_51b as f64)?;
        sheet.write_number(row, 7, r.epcs_sf12_11b as f64)?;
        sheet.write_number(row, 8, r.compression_pct)?;
    }

    workbook.save(path)
}

fn write_json(rows: &[GroupAnalysis], path: &Path) -> Result<(), EpcError> {
    let file = File::create(path).map_err(|e| EpcError::OutputWriteFailure(e.to_string()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), rows)
        .map_err(|e| EpcError::OutputWriteFailure(e.to_string()))
}

fn row_cells(r: &GroupAnalysis) -> [String; 9] {
    [
        r.group_id.to_string(),
        r.prefix.clone(),
        r.prefix_bytes.to_string(),
        r.suffix_bytes.to_string(),
        r.suffix_count.to_string(),
        r.total_payload_bytes.to_string(),
        r.epcs_sf7_51b.to_string(),
        r.epcs_sf12_11b.to_string(),
        format!("{:.1}", r.compression_pct),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_row() -> GroupAnalysis {
        GroupAnalysis {
            group_id: 1,
            prefix: "AAAAAA".to_string(),
            prefix_bytes: 3,
            suffix_bytes: 9,
            suffix_count: 3,
            total_payload_bytes: 32,
            epcs_sf7_51b: 5,
            epcs_sf12_11b: 0,
            compression_pct: 11.1,
        }
    }

    #[test]
    fn test_render_table_has_header_and_rows() {
        let table = render_table(&[sample_row()]);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("Group_ID"));
        assert!(lines[0].contains("Compression_%"));
        assert!(lines[1].contains("AAAAAA"));
        assert!(lines[1].ends_with("11.1"));
    }

    #[test]
    fn test_render_summary() {
        let summary = AnalysisSummary::from_rows(&[sample_row()]);
        let text = render_summary(&summary);
        assert!(text.contains("Total EPCs: 3 | Groups: 1"));
        assert!(text.contains("Uncompressed: 36B | Compressed: 32B"));
        assert!(text.contains("Savings: 4B (11.1%)"));
    }

    #[test]
    fn test_save_rejects_unknown_extension() {
        let err = save_results(&[sample_row()], "report.pdf").unwrap_err();
        assert!(matches!(err, EpcError::UnsupportedOutputFormat(ref ext) if ext == ".pdf"));
        assert!(err.to_string().ends_with("Use .xlsx or .json"));
    }
}
