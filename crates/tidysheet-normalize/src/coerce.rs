//! Type coercion for role-bound columns.
//!
//! Coercion rewrites the cells of the rate and availability columns in
//! place. Failure is always per-cell: an unparseable value becomes a missing
//! cell and is counted, the rest of the column survives untouched.

use chrono::{Days, NaiveDate, NaiveDateTime};
use tidysheet_model::{CellValue, CleanedTable, RoleMap, SemanticRole};
use tracing::debug;

/// Why a single cell could not be coerced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoerceFailure {
    NotANumber(String),
    NotADate(String),
}

/// Per-cell outcome: the coerced value, or null with the reason.
pub type CellOutcome = Result<CellValue, CoerceFailure>;

/// Per-column coercion tally, surfaced in the operator report.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ColumnCoercion {
    pub role: SemanticRole,
    pub column: String,
    /// Cells successfully rewritten to a typed value.
    pub coerced: usize,
    /// Cells that failed to parse and were nulled.
    pub nulled: usize,
}

/// Summary of the whole coercion step.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CoercionSummary {
    pub columns: Vec<ColumnCoercion>,
}

/// Coerces the columns bound to `hourly_rate`, `available_from`, and
/// `available_to`. All other columns are untouched.
pub fn coerce_roles(table: &mut CleanedTable, roles: &RoleMap) -> CoercionSummary {
    let mut summary = CoercionSummary::default();
    let steps: [(SemanticRole, fn(&CellValue) -> CellOutcome); 3] = [
        (SemanticRole::HourlyRate, coerce_rate_cell),
        (SemanticRole::AvailableFrom, coerce_date_cell),
        (SemanticRole::AvailableTo, coerce_date_cell),
    ];
    for (role, coerce) in steps {
        let Some(column) = roles.column_for(role) else {
            continue;
        };
        let Some(index) = table.column_index(column) else {
            continue;
        };
        let mut tally = ColumnCoercion {
            role,
            column: column.to_string(),
            coerced: 0,
            nulled: 0,
        };
        for row in &mut table.rows {
            let Some(cell) = row.get_mut(index) else {
                continue;
            };
            if cell.is_empty() {
                continue;
            }
            match coerce(cell) {
                Ok(value) => {
                    *cell = value;
                    tally.coerced += 1;
                }
                Err(failure) => {
                    debug!(role = %role, ?failure, "cell nulled");
                    *cell = CellValue::Missing;
                    tally.nulled += 1;
                }
            }
        }
        summary.columns.push(tally);
    }
    summary
}

/// Coerces one rate cell: currency symbols and spacing are stripped, the
/// decimal comma becomes a dot, and the rest must parse as a decimal number.
pub fn coerce_rate_cell(cell: &CellValue) -> CellOutcome {
    match cell {
        CellValue::Number(number) => Ok(CellValue::Number(*number)),
        CellValue::Text(text) => parse_rate(text)
            .map(CellValue::Number)
            .ok_or_else(|| CoerceFailure::NotANumber(text.clone())),
        CellValue::Date(date) => Err(CoerceFailure::NotANumber(date.to_string())),
        CellValue::Missing => Ok(CellValue::Missing),
    }
}

/// Coerces one availability cell to a date.
pub fn coerce_date_cell(cell: &CellValue) -> CellOutcome {
    match cell {
        CellValue::Date(date) => Ok(CellValue::Date(*date)),
        CellValue::Number(serial) => date_from_serial(*serial)
            .map(CellValue::Date)
            .ok_or_else(|| CoerceFailure::NotADate(serial.to_string())),
        CellValue::Text(text) => parse_date(text)
            .map(CellValue::Date)
            .ok_or_else(|| CoerceFailure::NotADate(text.clone())),
        CellValue::Missing => Ok(CellValue::Missing),
    }
}

/// Parses a price-like string: keep `[0-9.,-]`, comma to dot, parse `f64`.
pub fn parse_rate(text: &str) -> Option<f64> {
    let cleaned: String = text
        .chars()
        .filter(|ch| ch.is_ascii_digit() || matches!(ch, '.' | ',' | '-'))
        .map(|ch| if ch == ',' { '.' } else { ch })
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse().ok()
}

const DATE_FORMATS: [&str; 5] = ["%Y-%m-%d", "%d.%m.%Y", "%d/%m/%Y", "%d.%m.%y", "%Y/%m/%d"];
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

/// Parses a date from text against a fixed, ordered format list: ISO first,
/// then the day-first European forms.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Some(date);
        }
    }
    for format in DATETIME_FORMATS {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(datetime.date());
        }
    }
    None
}

/// Converts an Excel 1900-epoch serial number to a date, skipping the
/// fictitious 1900-02-29 that the serial space reserves (Lotus leap bug).
pub fn date_from_serial(serial: f64) -> Option<NaiveDate> {
    let days = serial.trunc();
    if !(1.0..=2_958_465.0).contains(&days) {
        return None;
    }
    let mut days = days as u64;
    if days >= 60 {
        days -= 1;
    }
    NaiveDate::from_ymd_opt(1899, 12, 31)?.checked_add_days(Days::new(days))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tidysheet_model::{MatchReason, RoleMap};

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn parses_czech_price_formats() {
        assert_eq!(parse_rate("1 200,50"), Some(1200.50));
        assert_eq!(parse_rate("999"), Some(999.0));
        assert_eq!(parse_rate("350 Kč/hod"), Some(350.0));
        assert_eq!(parse_rate("-15.5"), Some(-15.5));
        assert_eq!(parse_rate("n/a"), None);
        assert_eq!(parse_rate("ABC"), None);
        assert_eq!(parse_rate("1.2.3"), None);
    }

    #[test]
    fn parses_dates_iso_and_day_first() {
        assert_eq!(parse_date("2024-02-01"), Some(date(2024, 2, 1)));
        assert_eq!(parse_date("01.02.2024"), Some(date(2024, 2, 1)));
        assert_eq!(parse_date("01/02/2024"), Some(date(2024, 2, 1)));
        assert_eq!(parse_date("2024-02-01T08:30:00"), Some(date(2024, 2, 1)));
        assert_eq!(parse_date("garbage"), None);
        assert_eq!(parse_date("32.13.2024"), None);
    }

    #[test]
    fn converts_excel_serials() {
        assert_eq!(date_from_serial(1.0), Some(date(1900, 1, 1)));
        assert_eq!(date_from_serial(59.0), Some(date(1900, 2, 28)));
        // Serial 60 is the fictitious 1900-02-29; it lands on March 1 like
        // serial 61 does.
        assert_eq!(date_from_serial(61.0), Some(date(1900, 3, 1)));
        assert_eq!(date_from_serial(45_323.0), Some(date(2024, 2, 1)));
        assert_eq!(date_from_serial(0.0), None);
        assert_eq!(date_from_serial(-3.0), None);
    }

    #[test]
    fn rate_column_degrades_to_null_per_cell() {
        let mut table = CleanedTable::new(
            vec!["cenahod".to_string()],
            vec![
                vec![CellValue::Text("1 200,50".into())],
                vec![CellValue::Text("999".into())],
                vec![CellValue::Text("n/a".into())],
                vec![CellValue::Missing],
            ],
        );
        let mut roles = RoleMap::new();
        roles.bind(
            SemanticRole::HourlyRate,
            "cenahod",
            MatchReason::Keyword("cena".into()),
        );
        let summary = coerce_roles(&mut table, &roles);
        assert_eq!(table.rows[0][0], CellValue::Number(1200.50));
        assert_eq!(table.rows[1][0], CellValue::Number(999.0));
        assert_eq!(table.rows[2][0], CellValue::Missing);
        assert_eq!(table.rows[3][0], CellValue::Missing);
        let tally = &summary.columns[0];
        assert_eq!((tally.coerced, tally.nulled), (2, 1));
    }

    #[test]
    fn date_column_accepts_text_and_serials() {
        let mut table = CleanedTable::new(
            vec!["dostupne_od".to_string()],
            vec![
                vec![CellValue::Text("01.02.2024".into())],
                vec![CellValue::Number(45_323.0)],
                vec![CellValue::Text("garbage".into())],
            ],
        );
        let mut roles = RoleMap::new();
        roles.bind(
            SemanticRole::AvailableFrom,
            "dostupne_od",
            MatchReason::Keyword("od".into()),
        );
        let summary = coerce_roles(&mut table, &roles);
        assert_eq!(table.rows[0][0], CellValue::Date(date(2024, 2, 1)));
        assert_eq!(table.rows[1][0], CellValue::Date(date(2024, 2, 1)));
        assert_eq!(table.rows[2][0], CellValue::Missing);
        assert_eq!(summary.columns[0].nulled, 1);
    }

    #[test]
    fn unbound_roles_touch_nothing() {
        let mut table = CleanedTable::new(
            vec!["nazev".to_string()],
            vec![vec![CellValue::Text("Bagr".into())]],
        );
        let summary = coerce_roles(&mut table, &RoleMap::new());
        assert!(summary.columns.is_empty());
        assert_eq!(table.rows[0][0], CellValue::Text("Bagr".into()));
    }
}
