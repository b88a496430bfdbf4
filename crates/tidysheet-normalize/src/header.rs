//! Header row detection.
//!
//! Real-world exports routinely prepend title or metadata rows before the
//! actual header. A cell-density threshold is a cheap, explainable proxy for
//! "this row describes columns": the first row in the scan window where at
//! least half of the columns are populated wins.

use tidysheet_model::{CellValue, RawTable};
use tracing::debug;

/// Returns the zero-based index of the row most likely to be the header.
///
/// Scans rows `0..min(window, rows)` in order and picks the first row whose
/// non-empty-cell count reaches `max(1, ceil(columns / 2))`. When no row in
/// the window qualifies, returns 0: treating the first row as header always
/// yields some result, which an operator can inspect and correct.
pub fn locate_header_row(table: &RawTable, window: usize) -> usize {
    let columns = table.column_count();
    let threshold = 1.max(columns.div_ceil(2));
    for (index, row) in table.rows.iter().take(window).enumerate() {
        let populated = row.iter().filter(|cell| !cell.is_empty()).count();
        if populated >= threshold {
            debug!(index, populated, threshold, "header row located");
            return index;
        }
    }
    debug!(threshold, "no row met the density threshold, defaulting to 0");
    0
}

/// Splits the table at the header row: the header cells (stringified, one per
/// source column) and the data rows below it, each padded to the full column
/// count so ragged source rows line up.
pub fn split_at_header(table: &RawTable, header_row: usize) -> (Vec<String>, Vec<Vec<CellValue>>) {
    let columns = table.column_count();
    let headers = (0..columns)
        .map(|col| table.cell(header_row, col).as_display_text())
        .collect();
    let rows = table
        .rows
        .iter()
        .skip(header_row + 1)
        .map(|row| {
            let mut padded = row.clone();
            padded.resize(columns, CellValue::Missing);
            padded
        })
        .collect();
    (headers, rows)
}
