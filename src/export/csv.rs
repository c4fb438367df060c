//! CSV Export functionality
//!
//! Exports transactions and budget definitions to CSV format.

use std::io::Write;

use crate::error::{FinanceError, FinanceResult};
use crate::models::{Budget, Transaction};

/// Export transactions to CSV, in the order given
pub fn export_transactions_csv<W: Write>(
    transactions: &[Transaction],
    writer: &mut W,
) -> FinanceResult<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(["ID", "Date", "Kind", "Category", "Description", "Amount"])?;

    for txn in transactions {
        csv.write_record([
            txn.id.to_string(),
            txn.date.to_string(),
            txn.kind.to_string(),
            txn.category.to_string(),
            txn.description.clone(),
            txn.amount.to_string(),
        ])?;
    }

    csv.flush().map_err(|e| FinanceError::Export(e.to_string()))?;
    Ok(())
}

/// Export budget definitions to CSV
pub fn export_budgets_csv<W: Write>(budgets: &[Budget], writer: &mut W) -> FinanceResult<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(["ID", "Category", "Period", "Start", "End", "Limit"])?;

    for budget in budgets {
        csv.write_record([
            budget.id.to_string(),
            budget.category.to_string(),
            budget.period.to_string(),
            budget.start_date.to_string(),
            budget.end_date.to_string(),
            budget.limit.to_string(),
        ])?;
    }

    csv.flush().map_err(|e| FinanceError::Export(e.to_string()))?;
    Ok(())
}
