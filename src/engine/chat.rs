//! Local answers to spending questions
//!
//! Covers the questions that plain totals can answer: anything mentioning
//! "total" or "category". "total" wins when a question mentions both.

use super::insights::category_recommendations;
use super::totals::{category_totals, total_by_kind};
use crate::models::{ChatAnswer, Transaction, TransactionKind};

/// Answer `query` from the expenses in `transactions`
///
/// Returns `None` for questions outside the keyword rules. With no expenses
/// at all every question gets the same "nothing recorded" answer.
pub fn answer_locally(query: &str, transactions: &[Transaction], currency: &str) -> Option<ChatAnswer> {
    if !transactions.iter().any(|t| t.is_expense()) {
        return Some(ChatAnswer::message("No expenses found in your history."));
    }

    let query = query.to_lowercase();
    let totals = category_totals(transactions, TransactionKind::Expense);
    let breakdown: Vec<_> = totals.iter().map(|(c, m)| (c.clone(), m)).collect();

    if query.contains("total") {
        let total = total_by_kind(transactions, TransactionKind::Expense);
        return Some(ChatAnswer {
            message: format!(
                "Your total spending is {}.",
                total.format_with_symbol(currency)
            ),
            amount: Some(total),
            breakdown,
            recommendations: Vec::new(),
        });
    }

    if query.contains("category") {
        let parts: Vec<String> = breakdown
            .iter()
            .map(|(c, m)| format!("{} {}", c, m.format_with_symbol(currency)))
            .collect();
        return Some(ChatAnswer {
            message: format!("Category-wise spending: {}", parts.join(", ")),
            amount: Some(totals.total()),
            recommendations: category_recommendations(&totals)
                .iter()
                .map(|r| r.to_string())
                .collect(),
            breakdown,
        });
    }

    None
}
