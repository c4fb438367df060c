//! Transaction display formatting
//!
//! Register-style listings and a detail view for single transactions.

use crate::models::{Money, Transaction, TransactionKind};

/// Format a single transaction as a register row
pub fn format_transaction_row(txn: &Transaction, currency: &str) -> String {
    let signed = match txn.kind {
        TransactionKind::Expense => format!("-{}", txn.amount.format_with_symbol(currency)),
        TransactionKind::Income => format!("+{}", txn.amount.format_with_symbol(currency)),
    };

    format!(
        "{} {:<16} {} {:>13}",
        txn.date.format("%Y-%m-%d"),
        truncate(txn.category.name(), 16),
        truncate(&txn.description, 28),
        signed
    )
}

/// Format a list of transactions as a register with totals
pub fn format_transaction_register(transactions: &[Transaction], currency: &str) -> String {
    if transactions.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:10} {:<16} {:28} {:>13}\n",
        "Date", "Category", "Description", "Amount"
    ));
    output.push_str(&"-".repeat(70));
    output.push('\n');

    let mut income = Money::zero();
    let mut expense = Money::zero();
    for txn in transactions {
        output.push_str(&format_transaction_row(txn, currency));
        output.push('\n');
        match txn.kind {
            TransactionKind::Income => income += txn.amount,
            TransactionKind::Expense => expense += txn.amount,
        }
    }

    output.push_str(&"-".repeat(70));
    output.push('\n');
    output.push_str(&format!(
        "{} transaction(s)   income {}   expenses {}\n",
        transactions.len(),
        income.format_with_symbol(currency),
        expense.format_with_symbol(currency)
    ));

    output
}

/// Format transaction details for display
pub fn format_transaction_details(txn: &Transaction, currency: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Transaction: {}\n", txn.id));
    output.push_str(&format!("Date:        {}\n", txn.date.format("%Y-%m-%d")));
    output.push_str(&format!("Type:        {}\n", txn.kind));
    output.push_str(&format!(
        "Amount:      {}\n",
        txn.amount.format_with_symbol(currency)
    ));
    output.push_str(&format!("Category:    {}\n", txn.category));
    output.push_str(&format!("Description: {}\n", txn.description));

    output
}

/// Truncate to `max_len` characters, padding shorter strings
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        format!("{:width$}", s, width = max_len)
    } else {
        let head: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", head)
    }
}
