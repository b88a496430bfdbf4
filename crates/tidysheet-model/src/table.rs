use chrono::NaiveDate;

/// A single spreadsheet cell value.
///
/// Readers only ever produce `Text`, `Number`, and `Missing`; `Date` appears
/// after coercion of columns bound to the availability roles.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum CellValue {
    Text(String),
    Number(f64),
    Date(NaiveDate),
    Missing,
}

impl CellValue {
    /// Returns true for `Missing` and for text that is empty after trimming.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Missing => true,
            Self::Text(text) => text.trim().is_empty(),
            Self::Number(_) | Self::Date(_) => false,
        }
    }

    /// Text content of the cell, stringifying numbers and dates.
    ///
    /// Missing cells yield an empty string. Numbers render without a
    /// trailing `.0` when they are whole, matching how spreadsheet
    /// applications display them.
    pub fn as_display_text(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Number(number) => {
                if number.fract() == 0.0 && number.abs() < 1e15 {
                    format!("{}", *number as i64)
                } else {
                    format!("{number}")
                }
            }
            Self::Date(date) => date.format("%Y-%m-%d").to_string(),
            Self::Missing => String::new(),
        }
    }
}

/// A raw table read straight from a source file: ordered rows of cells with
/// no header semantics attached. Rows may be ragged; `column_count` is the
/// widest row. Never mutated after loading.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RawTable {
    pub rows: Vec<Vec<CellValue>>,
}

impl RawTable {
    pub fn new(rows: Vec<Vec<CellValue>>) -> Self {
        Self { rows }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cell at `(row, col)`, treating positions beyond a ragged row as missing.
    pub fn cell(&self, row: usize, col: usize) -> &CellValue {
        const MISSING: CellValue = CellValue::Missing;
        self.rows
            .get(row)
            .and_then(|cells| cells.get(col))
            .unwrap_or(&MISSING)
    }
}

/// Data rows below the detected header, paired with one cleaned column
/// identifier per source column. Coercion rewrites rate/date cells in place;
/// everything else stays untouched.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CleanedTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

impl CleanedTable {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        Self { columns, rows }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Position of a column identifier, if present.
    pub fn column_index(&self, identifier: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == identifier)
    }

    /// Non-missing values of one column, in row order.
    pub fn column_values(&self, index: usize) -> impl Iterator<Item = &CellValue> {
        self.rows
            .iter()
            .filter_map(move |row| row.get(index))
            .filter(|cell| !cell.is_empty())
    }
}
