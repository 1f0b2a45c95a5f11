//! CSV export
//!
//! Writes every expense in the bulk interchange layout the importer reads
//! back: `month, kind, category, description, amount, income`, with the
//! current income repeated on each row.

use std::io::Write;

use csv::Writer;

use crate::error::{DashboardError, DashboardResult};
use crate::services::IncomeService;
use crate::storage::Storage;

pub const CSV_HEADER: [&str; 6] = ["month", "kind", "category", "description", "amount", "income"];

fn export_error(err: impl std::fmt::Display) -> DashboardError {
    DashboardError::Export(err.to_string())
}

/// Export all expenses to CSV, returning the number of rows written
///
/// With no expenses only the header is written.
pub fn export_expenses_csv<W: Write>(storage: &Storage, writer: W) -> DashboardResult<usize> {
    let income = IncomeService::new(storage).income()?.to_string();
    let expenses = storage.all_expenses()?;

    let mut csv_writer = Writer::from_writer(writer);
    csv_writer.write_record(CSV_HEADER).map_err(export_error)?;

    for expense in &expenses {
        let amount = expense.amount.to_string();
        csv_writer
            .write_record([
                expense.month.label(),
                expense.kind.label(),
                expense.category.label(),
                expense.description.as_str(),
                amount.as_str(),
                income.as_str(),
            ])
            .map_err(export_error)?;
    }

    csv_writer.flush().map_err(export_error)?;
    Ok(expenses.len())
}
