//! Budget status classification and per-budget aggregation rows

use serde::Serialize;
use std::fmt;

use crate::models::{Budget, BudgetId, Category, Money, Transaction, TransactionKind};

/// Share of the limit above which a budget is in the warning tier
pub const WARNING_THRESHOLD: f64 = 80.0;

/// Share of the limit above which a budget is over
pub const OVER_THRESHOLD: f64 = 100.0;

/// Health of a budget; each tier starts strictly above the previous threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetStatus {
    Good,
    Warning,
    Over,
}

impl BudgetStatus {
    /// Classify a usage percentage; exactly 80 is good, exactly 100 is a warning
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage > OVER_THRESHOLD {
            Self::Over
        } else if percentage > WARNING_THRESHOLD {
            Self::Warning
        } else {
            Self::Good
        }
    }

    /// One-character marker for terminal output
    pub fn glyph(&self) -> &'static str {
        match self {
            Self::Good => "✓",
            Self::Warning => "!",
            Self::Over => "⚠",
        }
    }
}

impl fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Good => write!(f, "good"),
            Self::Warning => write!(f, "warning"),
            Self::Over => write!(f, "over"),
        }
    }
}

/// Result of [`budget_status`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StatusSummary {
    pub percentage: f64,
    pub remaining: Money,
    pub status: BudgetStatus,
}

fn classify(limit: Money, spent: Money) -> StatusSummary {
    let percentage = spent.percent_of(limit);
    StatusSummary {
        percentage,
        remaining: limit - spent,
        status: BudgetStatus::from_percentage(percentage),
    }
}

/// Usage of `budget` given what was spent against it
///
/// A zero limit always reports 0% and good, whatever was spent.
pub fn budget_status(budget: &Budget, spent: Money) -> StatusSummary {
    classify(budget.limit, spent)
}

/// One row of the budget view
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregationResult {
    pub category: Category,

    /// The budget this row was built from; `None` for unbudgeted spending
    pub budget_id: Option<BudgetId>,

    pub spent: Money,

    /// Zero when no budget matched
    pub limit: Money,

    pub percentage: f64,

    pub remaining: Money,

    pub status: BudgetStatus,
}

impl AggregationResult {
    fn new(category: Category, budget_id: Option<BudgetId>, limit: Money, spent: Money) -> Self {
        let summary = classify(limit, spent);
        Self {
            category,
            budget_id,
            spent,
            limit,
            percentage: summary.percentage,
            remaining: summary.remaining,
            status: summary.status,
        }
    }

    pub fn is_budgeted(&self) -> bool {
        self.budget_id.is_some()
    }
}

/// Join expenses against budgets
///
/// Produces one row per budget, in budget order, counting only expenses of
/// the budget's category dated inside its window. Expense categories that
/// no budget names follow, in first-appearance order, with a zero limit.
pub fn aggregate(transactions: &[Transaction], budgets: &[Budget]) -> Vec<AggregationResult> {
    let expenses: Vec<&Transaction> = transactions
        .iter()
        .filter(|t| t.kind == TransactionKind::Expense)
        .collect();

    let mut rows: Vec<AggregationResult> = budgets
        .iter()
        .map(|budget| {
            let spent: Money = expenses
                .iter()
                .filter(|t| t.category == budget.category && budget.covers(t.date))
                .map(|t| t.amount)
                .sum();
            AggregationResult::new(
                budget.category.clone(),
                Some(budget.id.clone()),
                budget.limit,
                spent,
            )
        })
        .collect();

    let mut unbudgeted: Vec<(Category, Money)> = Vec::new();
    for txn in &expenses {
        if budgets.iter().any(|b| b.category == txn.category) {
            continue;
        }
        match unbudgeted.iter_mut().find(|(c, _)| *c == txn.category) {
            Some((_, spent)) => *spent += txn.amount,
            None => unbudgeted.push((txn.category.clone(), txn.amount)),
        }
    }

    rows.extend(
        unbudgeted
            .into_iter()
            .map(|(category, spent)| AggregationResult::new(category, None, Money::zero(), spent)),
    );
    rows
}

/// Totals across the budgeted rows
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BudgetTotals {
    pub limit: Money,
    pub spent: Money,
    pub remaining: Money,
    pub percentage: f64,
    pub status: BudgetStatus,
}

/// Sum limits and spending over budgeted rows; unbudgeted spending is left out
pub fn budget_totals(rows: &[AggregationResult]) -> BudgetTotals {
    let (limit, spent) = rows
        .iter()
        .filter(|r| r.is_budgeted())
        .fold((Money::zero(), Money::zero()), |(limit, spent), r| {
            (limit + r.limit, spent + r.spent)
        });
    let summary = classify(limit, spent);
    BudgetTotals {
        limit,
        spent,
        remaining: summary.remaining,
        percentage: summary.percentage,
        status: summary.status,
    }
}
