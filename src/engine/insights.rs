//! Rule-based budget insights and spending recommendations

use serde::Serialize;
use std::fmt;

use super::status::{AggregationResult, BudgetStatus, OVER_THRESHOLD};
use super::totals::{percentage_breakdown, CategoryTotals};
use crate::models::{Category, Money};

/// Budgets using at most this share of their limit earn praise
pub const PRAISE_THRESHOLD: f64 = 50.0;

/// Categories taking more than this share of spending get a recommendation
pub const HIGH_SHARE_THRESHOLD: f64 = 30.0;

/// Share a high-spending category is recommended to come down to
pub const TARGET_SHARE: f64 = 25.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightKind {
    Alert,
    Warning,
    Praise,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetInsight {
    pub kind: InsightKind,
    pub category: Category,
    pub percentage: f64,
    pub message: String,
}

impl fmt::Display for BudgetInsight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self.kind {
            InsightKind::Alert => "ALERT",
            InsightKind::Warning => "WARNING",
            InsightKind::Praise => "GOOD",
        };
        write!(f, "[{}] {}", label, self.message)
    }
}

/// One insight per budgeted row that is notable
///
/// Rows at or above 100% are alerts, other warning rows are warnings, and
/// rows at or below half their limit are praised. Unbudgeted rows are skipped.
pub fn budget_insights(rows: &[AggregationResult]) -> Vec<BudgetInsight> {
    rows.iter()
        .filter(|row| row.is_budgeted())
        .filter_map(|row| {
            let (kind, message) = if row.status == BudgetStatus::Over
                || row.percentage >= OVER_THRESHOLD
            {
                (
                    InsightKind::Alert,
                    format!(
                        "{} budget is at {:.0}% of its limit ({} spent of {})",
                        row.category, row.percentage, row.spent, row.limit
                    ),
                )
            } else if row.status == BudgetStatus::Warning {
                (
                    InsightKind::Warning,
                    format!(
                        "{} budget is at {:.0}%; {} left",
                        row.category, row.percentage, row.remaining
                    ),
                )
            } else if row.limit.is_positive() && row.percentage <= PRAISE_THRESHOLD {
                (
                    InsightKind::Praise,
                    format!(
                        "{} spending is well under budget ({:.0}% used)",
                        row.category, row.percentage
                    ),
                )
            } else {
                return None;
            };

            Some(BudgetInsight {
                kind,
                category: row.category.clone(),
                percentage: row.percentage,
                message,
            })
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub category: Category,
    pub current_share: f64,
    pub target_share: f64,
    /// Reduction that would bring the category to the target share
    pub potential_savings: Money,
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} takes {:.1}% of spending; cutting it to {:.0}% would save {}",
            self.category, self.current_share, self.target_share, self.potential_savings
        )
    }
}

/// Recommend trimming every category above the high-share threshold
pub fn category_recommendations(totals: &CategoryTotals) -> Vec<Recommendation> {
    let grand_total = totals.total();
    percentage_breakdown(totals)
        .into_iter()
        .filter(|(_, share)| *share > HIGH_SHARE_THRESHOLD)
        .map(|(category, share)| {
            let current = totals.get(&category).unwrap_or_default();
            let target = Money::from_cents(
                (grand_total.cents() as f64 * TARGET_SHARE / 100.0).round() as i64,
            );
            Recommendation {
                category,
                current_share: share,
                target_share: TARGET_SHARE,
                potential_savings: current - target,
            }
        })
        .collect()
}
