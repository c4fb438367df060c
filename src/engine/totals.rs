//! Totals, per-category grouping and percentage breakdowns

use chrono::NaiveDate;

use crate::models::{Category, Money, Transaction, TransactionKind};

/// Per-category totals in first-appearance order
///
/// Ordering matters: ties in [`top_category`] resolve to the category that
/// appeared first, and reports list categories in the order they were seen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryTotals {
    entries: Vec<(Category, Money)>,
}

impl CategoryTotals {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `amount` to `category`, appending the category if it is new
    pub fn add(&mut self, category: &Category, amount: Money) {
        match self.entries.iter_mut().find(|(c, _)| c == category) {
            Some((_, total)) => *total += amount,
            None => self.entries.push((category.clone(), amount)),
        }
    }

    pub fn get(&self, category: &Category) -> Option<Money> {
        self.entries
            .iter()
            .find(|(c, _)| c == category)
            .map(|(_, total)| *total)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Category, Money)> {
        self.entries.iter().map(|(c, m)| (c, *m))
    }

    pub fn categories(&self) -> impl Iterator<Item = &Category> {
        self.entries.iter().map(|(c, _)| c)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of every category total
    pub fn total(&self) -> Money {
        self.entries.iter().map(|(_, m)| *m).sum()
    }

    /// Append a zero entry for each listed category not already present
    pub fn zero_filled<'a>(mut self, categories: impl IntoIterator<Item = &'a Category>) -> Self {
        for category in categories {
            if self.get(category).is_none() {
                self.entries.push((category.clone(), Money::zero()));
            }
        }
        self
    }

    /// Entries sorted by amount, largest first; equal amounts keep their order
    pub fn ranked(&self) -> Vec<(Category, Money)> {
        let mut ranked = self.entries.clone();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
    }
}

impl FromIterator<(Category, Money)> for CategoryTotals {
    fn from_iter<I: IntoIterator<Item = (Category, Money)>>(iter: I) -> Self {
        let mut totals = CategoryTotals::new();
        for (category, amount) in iter {
            totals.add(&category, amount);
        }
        totals
    }
}

/// Sum of `amount` over transactions of the given kind; zero for empty input
pub fn total_by_kind(transactions: &[Transaction], kind: TransactionKind) -> Money {
    transactions
        .iter()
        .filter(|t| t.kind == kind)
        .map(|t| t.amount)
        .sum()
}

/// Per-category sums for the given kind
///
/// Categories absent from the input never appear; use
/// [`CategoryTotals::zero_filled`] to list them explicitly.
pub fn category_totals(transactions: &[Transaction], kind: TransactionKind) -> CategoryTotals {
    let mut totals = CategoryTotals::new();
    for txn in transactions.iter().filter(|t| t.kind == kind) {
        totals.add(&txn.category, txn.amount);
    }
    totals
}

/// Each category's share of the grand total, in percent
///
/// When the grand total is zero every share is 0.
pub fn percentage_breakdown(totals: &CategoryTotals) -> Vec<(Category, f64)> {
    let grand_total = totals.total();
    totals
        .iter()
        .map(|(category, amount)| (category.clone(), amount.percent_of(grand_total)))
        .collect()
}

/// The category with the largest total; the earliest one wins a tie
pub fn top_category(totals: &CategoryTotals) -> Option<&Category> {
    let mut best: Option<(&Category, Money)> = None;
    for (category, amount) in totals.iter() {
        match best {
            Some((_, best_amount)) if amount <= best_amount => {}
            _ => best = Some((category, amount)),
        }
    }
    best.map(|(category, _)| category)
}

/// Transactions dated within `[start, end]`, both ends included
///
/// An inverted range yields nothing.
pub fn filter_by_period(
    transactions: &[Transaction],
    start: NaiveDate,
    end: NaiveDate,
) -> Vec<Transaction> {
    transactions
        .iter()
        .filter(|t| t.date >= start && t.date <= end)
        .cloned()
        .collect()
}

/// Income minus expenses; negative when spending exceeds income
pub fn net_savings(transactions: &[Transaction]) -> Money {
    total_by_kind(transactions, TransactionKind::Income)
        - total_by_kind(transactions, TransactionKind::Expense)
}

/// Expense total spread over the days between the first and last expense
///
/// A single day (or a single expense) counts as one day. Zero when there
/// are no expenses.
pub fn average_daily_spend(transactions: &[Transaction]) -> Money {
    let expenses = transactions.iter().filter(|t| t.is_expense());

    let mut total = Money::zero();
    let mut first: Option<NaiveDate> = None;
    let mut last: Option<NaiveDate> = None;
    for txn in expenses {
        total += txn.amount;
        first = Some(first.map_or(txn.date, |d| d.min(txn.date)));
        last = Some(last.map_or(txn.date, |d| d.max(txn.date)));
    }

    let (Some(first), Some(last)) = (first, last) else {
        return Money::zero();
    };

    let days = (last - first).num_days().max(1);
    Money::from_cents((total.cents() as f64 / days as f64).round() as i64)
}
