//! End-to-end pipeline scenarios over in-memory tables.

use chrono::NaiveDate;
use tidysheet_model::{CellValue, PipelineOptions, RawTable, SemanticRole};
use tidysheet_normalize::normalize;

fn text(value: &str) -> CellValue {
    CellValue::Text(value.to_string())
}

#[test]
fn rental_catalog_with_title_row() {
    let raw = RawTable::new(vec![
        vec![text("Evidence"), CellValue::Missing, CellValue::Missing],
        vec![text("ID"), text("Název stroje"), text("Cena/hod")],
        vec![text("1"), text("Bagr"), text("350")],
        vec![text("2"), text("Vrtačka"), text("ABC")],
    ]);

    let report = normalize(&raw, &PipelineOptions::default());

    assert_eq!(report.header_row, 1);
    assert_eq!(report.source_rows, 4);
    assert_eq!(report.source_columns, 3);
    assert_eq!(
        report.table.columns,
        vec!["id", "nazev_stroje", "cenahod"]
    );

    let rate = report.roles.binding_for(SemanticRole::HourlyRate).unwrap();
    assert_eq!(rate.column, "cenahod");
    assert_eq!(
        report.roles.column_for(SemanticRole::Name),
        Some("nazev_stroje")
    );
    assert_eq!(report.roles.column_for(SemanticRole::Id), Some("id"));

    assert_eq!(report.table.rows[0][2], CellValue::Number(350.0));
    assert_eq!(report.table.rows[1][2], CellValue::Missing);
    // Untouched columns keep their text.
    assert_eq!(report.table.rows[1][1], text("Vrtačka"));
}

#[test]
fn availability_columns_become_dates() {
    let raw = RawTable::new(vec![
        vec![text("Produkt"), text("Dostupné od"), text("Dostupné do")],
        vec![text("Bagr"), text("01.02.2024"), text("2024-06-30")],
        vec![text("Jeřáb"), text("garbage"), CellValue::Missing],
    ]);

    let report = normalize(&raw, &PipelineOptions::default());

    assert_eq!(
        report.table.columns,
        vec!["produkt", "dostupne_od", "dostupne_do"]
    );
    assert_eq!(
        report.roles.column_for(SemanticRole::AvailableFrom),
        Some("dostupne_od")
    );
    assert_eq!(
        report.roles.column_for(SemanticRole::AvailableTo),
        Some("dostupne_do")
    );
    assert_eq!(
        report.table.rows[0][1],
        CellValue::Date(NaiveDate::from_ymd_opt(2024, 2, 1).unwrap())
    );
    assert_eq!(
        report.table.rows[0][2],
        CellValue::Date(NaiveDate::from_ymd_opt(2024, 6, 30).unwrap())
    );
    assert_eq!(report.table.rows[1][1], CellValue::Missing);
    assert_eq!(report.table.rows[1][2], CellValue::Missing);
}

#[test]
fn zero_row_table_produces_empty_result() {
    let report = normalize(&RawTable::default(), &PipelineOptions::default());
    assert_eq!(report.header_row, 0);
    assert!(report.table.columns.is_empty());
    assert!(report.table.rows.is_empty());
    assert!(report.roles.bindings().is_empty());
}

#[test]
fn headerless_sheet_treats_first_row_as_header() {
    // Every row is dense, so row 0 wins and the data slice starts at row 1.
    let raw = RawTable::new(vec![
        vec![text("Bagr"), text("350")],
        vec![text("Vrtačka"), text("125")],
    ]);
    let report = normalize(&raw, &PipelineOptions::default());
    assert_eq!(report.header_row, 0);
    assert_eq!(report.table.columns, vec!["bagr", "350"]);
    assert_eq!(report.table.row_count(), 1);
}
