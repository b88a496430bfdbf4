//! Data model for the spreadsheet normalization pipeline.
//!
//! Tables carry heterogeneous [`CellValue`]s; a [`RawTable`] is what a reader
//! produces (no header semantics), a [`CleanedTable`] is the data slice below
//! the detected header paired with cleaned column identifiers, and a
//! [`RoleMap`] records which column backs which [`SemanticRole`].

mod options;
mod role;
mod table;

pub use options::{KeywordSets, PipelineOptions};
pub use role::{MatchReason, RoleBinding, RoleMap, SemanticRole};
pub use table::{CellValue, CleanedTable, RawTable};
