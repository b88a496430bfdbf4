//! Stage orchestration: raw table in, normalized table plus report out.
//!
//! Data flows strictly locate → split/slugify → map → coerce. Every stage is
//! a total function; the pipeline as a whole cannot fail once the raw table
//! is in memory.

use tidysheet_model::{CleanedTable, PipelineOptions, RawTable, RoleMap};
use tracing::{info, info_span};

use crate::coerce::{CoercionSummary, coerce_roles};
use crate::header::{locate_header_row, split_at_header};
use crate::mapper::map_schema;
use crate::slug::clean_columns;

/// Everything the normalization produced, for output writers and the
/// operator report.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizeReport {
    /// Row count of the raw table, header and title rows included.
    pub source_rows: usize,
    /// Column count of the raw table.
    pub source_columns: usize,
    /// Zero-based index of the detected header row.
    pub header_row: usize,
    /// The cleaned, coerced table.
    pub table: CleanedTable,
    /// Role-to-column mapping with match provenance.
    pub roles: RoleMap,
    /// Per-column coercion tallies.
    pub coercion: CoercionSummary,
}

/// Runs the whole normalization pipeline over a raw table.
pub fn normalize(raw: &RawTable, options: &PipelineOptions) -> NormalizeReport {
    let span = info_span!("normalize");
    let _guard = span.enter();

    let header_row = locate_header_row(raw, options.header_scan_window);
    let (headers, rows) = split_at_header(raw, header_row);
    let columns = clean_columns(&headers);
    let mut table = CleanedTable::new(columns, rows);

    let roles = map_schema(&table, options);
    let coercion = coerce_roles(&mut table, &roles);

    info!(
        source_rows = raw.row_count(),
        source_columns = raw.column_count(),
        header_row,
        data_rows = table.row_count(),
        roles = roles.bindings().len(),
        "normalization complete"
    );

    NormalizeReport {
        source_rows: raw.row_count(),
        source_columns: raw.column_count(),
        header_row,
        table,
        roles,
        coercion,
    }
}
