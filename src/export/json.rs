//! JSON Export functionality
//!
//! Exports a snapshot, and the reports computed from it, with schema
//! versioning.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Write;

use crate::engine::{monthly_summaries, MonthlySummary};
use crate::error::FinanceResult;
use crate::models::{Budget, ReportPeriod, Transaction};
use crate::reports::{BudgetOverviewReport, DashboardReport};
use crate::services::Snapshot;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Full export structure
#[derive(Debug, Clone, Serialize)]
pub struct FullExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    pub exported_at: DateTime<Utc>,

    /// When the underlying snapshot was fetched
    pub fetched_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    /// Period the export is restricted to, if any
    pub period: Option<ReportPeriod>,

    pub transactions: Vec<Transaction>,

    pub budgets: Vec<Budget>,

    pub budget_overview: BudgetOverviewReport,

    /// Income, expense and savings per calendar month, oldest first
    pub monthly: Vec<MonthlySummary>,

    /// Only present when the export covers a period
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dashboard: Option<DashboardReport>,

    pub metadata: ExportMetadata,
}

/// Export metadata for reference
#[derive(Debug, Clone, Serialize)]
pub struct ExportMetadata {
    pub transaction_count: usize,
    pub budget_count: usize,
    pub earliest_transaction: Option<String>,
    pub latest_transaction: Option<String>,
}

impl FullExport {
    /// Build an export, optionally restricted to one period
    pub fn from_snapshot(snapshot: &Snapshot, period: Option<&ReportPeriod>) -> Self {
        let (transactions, budgets, budget_overview, dashboard) = match period {
            Some(period) => (
                snapshot.transactions_in(period),
                snapshot.budgets_overlapping(period),
                BudgetOverviewReport::generate_for(snapshot, period),
                Some(DashboardReport::generate(snapshot, period)),
            ),
            None => (
                snapshot.transactions.clone(),
                snapshot.budgets.clone(),
                BudgetOverviewReport::generate(snapshot),
                None,
            ),
        };

        let metadata = ExportMetadata {
            transaction_count: transactions.len(),
            budget_count: budgets.len(),
            earliest_transaction: transactions.iter().map(|t| t.date).min().map(|d| d.to_string()),
            latest_transaction: transactions.iter().map(|t| t.date).max().map(|d| d.to_string()),
        };

        let monthly = monthly_summaries(&transactions);

        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            fetched_at: snapshot.fetched_at,
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            period: period.cloned(),
            transactions,
            budgets,
            budget_overview,
            monthly,
            dashboard,
            metadata,
        }
    }
}

/// Export to pretty-printed JSON
pub fn export_full_json<W: Write>(
    snapshot: &Snapshot,
    period: Option<&ReportPeriod>,
    writer: &mut W,
) -> FinanceResult<()> {
    let export = FullExport::from_snapshot(snapshot, period);
    serde_json::to_writer_pretty(&mut *writer, &export)?;
    writeln!(writer)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BudgetCadence, Category, Money};
    use chrono::NaiveDate;

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, d).unwrap()
    }

    fn sample_snapshot() -> Snapshot {
        Snapshot::new(
            vec![
                Transaction::expense(Money::from_cents(1250), "Lunch", Category::Food, date(3, 5))
                    .unwrap(),
                Transaction::income(Money::from_units(2000, 0), "Pay", Category::Salary, date(2, 28))
                    .unwrap(),
            ],
            vec![Budget::for_period(
                Category::Food,
                Money::from_units(300, 0),
                BudgetCadence::Monthly,
                date(3, 1),
            )
            .unwrap()],
        )
    }

    #[test]
    fn test_json_export() {
        let mut output = Vec::new();
        export_full_json(&sample_snapshot(), None, &mut output).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(value["schema_version"], EXPORT_SCHEMA_VERSION);
        assert_eq!(value["metadata"]["transaction_count"], 2);
        assert_eq!(value["metadata"]["earliest_transaction"], "2024-02-28");
        assert_eq!(value["transactions"][0]["amount"], 1250);
        assert_eq!(value["transactions"][0]["category"], "Food");
        assert_eq!(value["transactions"][0]["kind"], "expense");
        assert!(value.get("dashboard").is_none());
        assert_eq!(value["monthly"][0]["month"], 2);
        assert_eq!(value["monthly"][1]["expense"], 1250);
    }

    #[test]
    fn test_json_export_for_period() {
        let march = ReportPeriod::monthly(2024, 3);
        let export = FullExport::from_snapshot(&sample_snapshot(), Some(&march));
        assert_eq!(export.transactions.len(), 1);
        assert_eq!(export.budgets.len(), 1);
        let dashboard = export.dashboard.as_ref().unwrap();
        assert_eq!(dashboard.expense, Money::from_cents(1250));
        assert_eq!(dashboard.comparison.previous.income, Money::from_units(2000, 0));
    }
}
