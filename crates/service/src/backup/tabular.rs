//! Spreadsheet export: one row per tracked item. There is no import path.

use mala_counter_core::{CounterRecord, TrackedItem};
use rust_xlsxwriter::{Format, Workbook};

use super::ExportError;

pub const WORKSHEET_NAME: &str = "Mala Counter Data";

pub const TABULAR_HEADER: [&str; 3] = ["Deity", "Completed Malas", "Total Recitations"];

/// Largest integer an XLSX number cell (an IEEE double) holds exactly.
pub const MAX_EXACT_CELL_INTEGER: u64 = 1 << 53;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabularRow {
    pub name: &'static str,
    pub completed_malas: u64,
    pub total_recitations: u64,
}

/// Data rows in the fixed item order, header excluded.
#[must_use]
pub fn tabular_rows(record: &CounterRecord) -> Vec<TabularRow> {
    TrackedItem::ALL
        .into_iter()
        .map(|item| {
            let tally = record.tally(item);
            TabularRow {
                name: item.name(),
                completed_malas: tally.completed_malas,
                total_recitations: tally.total_recitations,
            }
        })
        .collect()
}

/// XLSX workbook bytes: header row, then one row per item.
pub fn export_tabular(record: &CounterRecord) -> Result<Vec<u8>, ExportError> {
    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(WORKSHEET_NAME)?;

    for (col, title) in (0_u16..).zip(TABULAR_HEADER) {
        worksheet.write_string_with_format(0, col, title, &bold)?;
    }
    for (row, entry) in (1_u32..).zip(tabular_rows(record)) {
        worksheet.write_string(row, 0, entry.name)?;
        for (col, count) in [(1_u16, entry.completed_malas), (2, entry.total_recitations)] {
            match exact_cell_number(count) {
                Some(number) => worksheet.write_number(row, col, number)?,
                None => worksheet.write_string(row, col, count.to_string())?,
            };
        }
    }
    worksheet.set_column_width(0, 18.0)?;
    worksheet.set_column_width(1, 16.0)?;
    worksheet.set_column_width(2, 18.0)?;

    Ok(workbook.save_to_buffer()?)
}

/// `count` as a number cell, or `None` when a double would round it.
#[allow(clippy::cast_precision_loss, reason = "guarded by MAX_EXACT_CELL_INTEGER")]
fn exact_cell_number(count: u64) -> Option<f64> {
    (count <= MAX_EXACT_CELL_INTEGER).then(|| count as f64)
}
