//! The normalization core: header detection, header slugification, semantic
//! schema mapping, and type coercion.
//!
//! All heuristics here are total functions with defined fallback outcomes.
//! Partial, inspectable results (nulls, unresolved roles) beat hard failures
//! for exploratory data cleaning; only I/O at the edges can fail.

mod coerce;
mod header;
mod mapper;
mod pipeline;
mod slug;

pub use coerce::{
    CellOutcome, CoerceFailure, CoercionSummary, ColumnCoercion, coerce_date_cell,
    coerce_rate_cell, coerce_roles, date_from_serial, parse_date, parse_rate,
};
pub use header::{locate_header_row, split_at_header};
pub use mapper::{is_plain_number, map_schema};
pub use pipeline::{NormalizeReport, normalize};
pub use slug::{clean_columns, slugify};
