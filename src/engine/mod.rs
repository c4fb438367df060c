//! Aggregation engine
//!
//! Pure, synchronous functions over a snapshot of transactions and budgets.
//! Nothing here performs I/O, logs, or reads the clock; division by zero
//! resolves to a documented 0 rather than an error.

pub mod chat;
pub mod insights;
pub mod status;
pub mod suggest;
pub mod totals;
pub mod trend;

pub use chat::answer_locally;
pub use insights::{
    budget_insights, category_recommendations, BudgetInsight, InsightKind, Recommendation,
};
pub use status::{
    aggregate, budget_status, budget_totals, AggregationResult, BudgetStatus, BudgetTotals,
    StatusSummary,
};
pub use suggest::{review_suggestion, review_with_alternatives, LOW_CONFIDENCE_THRESHOLD};
pub use totals::{
    average_daily_spend, category_totals, filter_by_period, net_savings, percentage_breakdown,
    top_category, total_by_kind, CategoryTotals,
};
pub use trend::{
    month_over_month_change, monthly_summaries, period_comparison, savings_rate, MonthlySummary,
    PeriodComparison, PeriodTotals,
};
