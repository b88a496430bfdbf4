//! Spreadsheet ingestion: reads a source file into a [`RawTable`] with no
//! header interpretation at all. Header detection belongs to the
//! normalization pipeline, not the readers.

mod csv;
mod error;
mod xlsx;

use std::path::Path;

use tidysheet_model::RawTable;

pub use crate::csv::read_csv;
pub use crate::error::{IngestError, Result};
pub use crate::xlsx::read_xlsx;

/// Reads a source file into a raw table, dispatching on the file extension.
/// `.xlsx`/`.xlsm` go through the XLSX reader; everything else is read as
/// delimited text.
pub fn read_table(path: &Path) -> Result<RawTable> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("xlsx" | "xlsm") => read_xlsx(path),
        _ => read_csv(path),
    }
}
