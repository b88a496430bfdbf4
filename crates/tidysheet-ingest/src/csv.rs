//! Raw CSV reading: every row is data, no header row assumed.

use std::path::Path;

use csv::ReaderBuilder;
use tidysheet_model::{CellValue, RawTable};
use tracing::debug;

use crate::error::{IngestError, Result};

fn normalize_cell(raw: &str) -> CellValue {
    let trimmed = raw.trim_matches('\u{feff}').trim();
    if trimmed.is_empty() {
        CellValue::Missing
    } else {
        CellValue::Text(trimmed.to_string())
    }
}

/// Reads a CSV file into a raw table. Records are kept in source order,
/// including rows whose cells are all empty, so downstream row indexes
/// line up with the source file.
pub fn read_csv(path: &Path) -> Result<RawTable> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|source| match source.kind() {
            csv::ErrorKind::Io(_) => IngestError::Io {
                path: path.to_path_buf(),
                source: match source.into_kind() {
                    csv::ErrorKind::Io(io) => io,
                    _ => unreachable!("kind checked above"),
                },
            },
            _ => IngestError::Csv {
                path: path.to_path_buf(),
                source,
            },
        })?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|source| IngestError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
        rows.push(record.iter().map(normalize_cell).collect());
    }
    debug!(rows = rows.len(), path = %path.display(), "read csv");
    Ok(RawTable::new(rows))
}
