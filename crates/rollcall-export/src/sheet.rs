// ── Spreadsheet export (.xlsx) ──

use rust_xlsxwriter::{Workbook, Worksheet};
use tracing::debug;

use rollcall_api::StudentRecord;
use rollcall_core::table;

use crate::error::ExportError;

/// Column indexes whose values are written as numbers (ID, Year).
/// Everything else is text, including the Yes/No graduating label.
const NUMERIC_COLUMNS: [usize; 2] = [0, 6];

/// Produce a single-sheet workbook: the fixed header row, then one row
/// per record in snapshot order.
///
/// Returns the finished `.xlsx` file as bytes; rejects an empty
/// snapshot so consumers never get a file with nothing but headers.
pub fn export_spreadsheet(snapshot: &[StudentRecord]) -> Result<Vec<u8>, ExportError> {
    if snapshot.is_empty() {
        return Err(ExportError::EmptySnapshot);
    }

    let mut workbook = Workbook::new();
    let mut worksheet = Worksheet::new();
    worksheet.set_name("Students")?;

    for (col, title) in table::HEADER.iter().enumerate() {
        worksheet.write_string(0, col as u16, *title)?;
    }

    for (row, record) in snapshot.iter().enumerate() {
        let row = (row + 1) as u32;
        let cells = table::cells(record);
        for (col, value) in cells.iter().enumerate() {
            if NUMERIC_COLUMNS.contains(&col) {
                // cells() stringifies id/year; parse back so spreadsheet
                // consumers get real numbers, not digit strings.
                let number: f64 = value.parse().map_err(|_| {
                    ExportError::Io(std::io::Error::other(format!(
                        "non-numeric value {value:?} in numeric column {col}"
                    )))
                })?;
                worksheet.write_number(row, col as u16, number)?;
            } else {
                worksheet.write_string(row, col as u16, value)?;
            }
        }
    }

    workbook.push_worksheet(worksheet);
    let buffer = workbook.save_to_buffer()?;
    debug!(
        rows = snapshot.len() + 1,
        bytes = buffer.len(),
        "spreadsheet export complete"
    );
    Ok(buffer)
}
