//! Output writers for the normalized table.
//!
//! Both writers are best-effort, fatal-on-failure: there is no partial-write
//! recovery, and concurrent writers to the same path are the caller's
//! problem. Values are written typed where the format allows (numbers in
//! XLSX); dates are rendered as ISO `YYYY-MM-DD` strings in both formats.

mod csv;
mod error;
mod xlsx;

pub use crate::csv::write_csv;
pub use crate::error::{OutputError, Result};
pub use crate::xlsx::write_xlsx;
