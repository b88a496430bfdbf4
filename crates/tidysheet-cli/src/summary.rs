//! Human-readable run summary. Informational only, not a machine contract.

use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};

use tidysheet_model::SemanticRole;

use crate::commands::CleanResult;

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

pub fn print_summary(result: &CleanResult) {
    let report = &result.report;
    println!("Source: {}", result.input.display());
    println!(
        "Read {} rows x {} columns (no header assumed)",
        report.source_rows, report.source_columns
    );
    println!("Header row: index {} (zero-based)", report.header_row);

    println!("Cleaned columns:");
    for (index, column) in report.table.columns.iter().enumerate() {
        println!(" - {index:02}: {column}");
    }

    let mut table = Table::new();
    table.set_header(vec!["Role", "Column", "Matched by", "Nulled cells"]);
    apply_table_style(&mut table);
    if let Some(column) = table.column_mut(3) {
        column.set_cell_alignment(CellAlignment::Right);
    }
    for role in SemanticRole::PRIORITY {
        let (column, reason) = match report.roles.binding_for(role) {
            Some(binding) => (binding.column.clone(), binding.reason.to_string()),
            None => ("-".to_string(), "unresolved".to_string()),
        };
        let nulled = report
            .coercion
            .columns
            .iter()
            .find(|tally| tally.role == role)
            .map_or("-".to_string(), |tally| tally.nulled.to_string());
        table.add_row(vec![
            Cell::new(role.to_string()),
            Cell::new(column),
            Cell::new(reason),
            Cell::new(nulled),
        ]);
    }
    println!("{table}");

    match (&result.xlsx_path, &result.csv_path) {
        (None, None) => println!("Dry run: no files written."),
        (xlsx, csv) => {
            if let Some(path) = xlsx {
                println!("Wrote: {}", path.display());
            }
            if let Some(path) = csv {
                println!("Wrote: {}", path.display());
            }
        }
    }
}
