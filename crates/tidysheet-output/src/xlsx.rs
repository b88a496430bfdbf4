//! XLSX export via `rust_xlsxwriter`: one worksheet, bold header row, typed
//! number cells, dates as ISO strings.

use std::path::Path;

use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};
use tidysheet_model::{CellValue, CleanedTable};
use tracing::debug;

use crate::error::{OutputError, Result};

/// Writes the cleaned table as an XLSX workbook with a single sheet.
pub fn write_xlsx(table: &CleanedTable, path: &Path) -> Result<()> {
    let xlsx_error = |source| OutputError::Xlsx {
        path: path.to_path_buf(),
        source,
    };
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    write_sheet(worksheet, table).map_err(xlsx_error)?;
    workbook.save(path).map_err(xlsx_error)?;
    debug!(rows = table.row_count(), path = %path.display(), "wrote xlsx");
    Ok(())
}

fn write_sheet(worksheet: &mut Worksheet, table: &CleanedTable) -> std::result::Result<(), XlsxError> {
    let header_format = Format::new().set_bold();
    for (col, column) in table.columns.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, column, &header_format)?;
    }
    for (row_index, row) in table.rows.iter().enumerate() {
        let excel_row = (row_index + 1) as u32;
        for col in 0..table.columns.len() {
            let cell = row.get(col).unwrap_or(&CellValue::Missing);
            match cell {
                CellValue::Number(number) => {
                    worksheet.write_number(excel_row, col as u16, *number)?;
                }
                CellValue::Text(text) => {
                    worksheet.write_string(excel_row, col as u16, text)?;
                }
                CellValue::Date(date) => {
                    let iso = date.format("%Y-%m-%d").to_string();
                    worksheet.write_string(excel_row, col as u16, &iso)?;
                }
                CellValue::Missing => {}
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample_table() -> CleanedTable {
        CleanedTable::new(
            vec!["id".to_string(), "cenahod".to_string(), "dostupne_od".to_string()],
            vec![
                vec![
                    CellValue::Text("1".into()),
                    CellValue::Number(350.0),
                    CellValue::Date(NaiveDate::from_ymd_opt(2024, 2, 1).unwrap()),
                ],
                vec![
                    CellValue::Text("2".into()),
                    CellValue::Missing,
                    CellValue::Missing,
                ],
            ],
        )
    }

    #[test]
    fn writes_a_readable_workbook() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.xlsx");
        write_xlsx(&sample_table(), &path).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        // XLSX files are zip archives; check the magic.
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn unwritable_destination_is_fatal() {
        let error = write_xlsx(&sample_table(), Path::new("/nonexistent/dir/out.xlsx")).unwrap_err();
        assert!(matches!(error, OutputError::Xlsx { .. }));
    }
}
