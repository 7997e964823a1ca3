//! Table serialization to CSV and XLSX.

use rust_decimal::prelude::ToPrimitive;
use rust_xlsxwriter::{Format, Workbook, Worksheet};

use crate::error::{EngineError, EngineResult};

use super::tables::{Cell, Table};

fn export_error(err: impl std::fmt::Display) -> EngineError {
    EngineError::ExportError {
        message: err.to_string(),
    }
}

fn cell_text(cell: &Cell) -> String {
    match cell {
        Cell::Text(text) => text.clone(),
        Cell::Amount(amount) => amount.to_string(),
        Cell::Count(days) => days.to_string(),
        Cell::Empty => String::new(),
    }
}

/// Writes a table as comma-separated text with a header row.
pub fn write_csv(table: &Table) -> EngineResult<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(&table.headers).map_err(export_error)?;
    for row in &table.rows {
        writer
            .write_record(row.iter().map(cell_text))
            .map_err(export_error)?;
    }
    writer.into_inner().map_err(export_error)
}

/// Writes a table as a single-sheet XLSX workbook.
///
/// Headers are bold; amounts and counts are numeric cells.
pub fn write_xlsx(table: &Table) -> EngineResult<Vec<u8>> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    fill_worksheet(worksheet, table)?;
    workbook.save_to_buffer().map_err(export_error)
}

fn fill_worksheet(worksheet: &mut Worksheet, table: &Table) -> EngineResult<()> {
    worksheet.set_name(&table.sheet_name).map_err(export_error)?;

    let bold = Format::new().set_bold();
    for (col, header) in table.headers.iter().enumerate() {
        worksheet
            .write_string_with_format(0, col as u16, header, &bold)
            .map_err(export_error)?;
    }

    for (r, row) in table.rows.iter().enumerate() {
        let row_num = (r + 1) as u32;
        for (col, cell) in row.iter().enumerate() {
            let col = col as u16;
            match cell {
                Cell::Text(text) => {
                    worksheet
                        .write_string(row_num, col, text)
                        .map_err(export_error)?;
                }
                Cell::Amount(amount) => {
                    let value = amount
                        .to_f64()
                        .ok_or_else(|| export_error(format!("amount out of range: {}", amount)))?;
                    worksheet
                        .write_number(row_num, col, value)
                        .map_err(export_error)?;
                }
                Cell::Count(days) => {
                    worksheet
                        .write_number(row_num, col, f64::from(*days))
                        .map_err(export_error)?;
                }
                Cell::Empty => {}
            }
        }
    }

    Ok(())
}
