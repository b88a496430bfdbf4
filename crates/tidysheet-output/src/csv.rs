//! Delimited-text export: UTF-8 with a byte-order marker, so spreadsheet
//! applications on the source locale's machines pick the encoding up.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use csv::WriterBuilder;
use tidysheet_model::CleanedTable;
use tracing::debug;

use crate::error::{OutputError, Result};

const UTF8_BOM: &[u8] = b"\xef\xbb\xbf";

/// Writes the cleaned table as a BOM-prefixed CSV file.
pub fn write_csv(table: &CleanedTable, path: &Path) -> Result<()> {
    let mut file = File::create(path).map_err(|source| OutputError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    file.write_all(UTF8_BOM).map_err(|source| OutputError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut writer = WriterBuilder::new().from_writer(file);
    let csv_error = |source| OutputError::Csv {
        path: path.to_path_buf(),
        source,
    };
    writer.write_record(&table.columns).map_err(csv_error)?;
    for row in &table.rows {
        let record: Vec<String> = (0..table.columns.len())
            .map(|col| {
                row.get(col)
                    .map(|cell| cell.as_display_text())
                    .unwrap_or_default()
            })
            .collect();
        writer.write_record(&record).map_err(csv_error)?;
    }
    writer.flush().map_err(|source| OutputError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(rows = table.row_count(), path = %path.display(), "wrote csv");
    Ok(())
}
