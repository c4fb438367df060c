//! Budget Overview Report
//!
//! Every budget with its spending, remaining amount and status, followed by
//! spending in categories that have no budget.

use std::io::Write;

use serde::Serialize;

use crate::engine::{aggregate, budget_totals, AggregationResult, BudgetStatus, BudgetTotals};
use crate::error::{FinanceError, FinanceResult};
use crate::models::ReportPeriod;
use crate::services::Snapshot;

/// Budget Overview Report
#[derive(Debug, Clone, Serialize)]
pub struct BudgetOverviewReport {
    /// Restricts the report when set; `None` covers the whole snapshot
    pub period: Option<ReportPeriod>,
    pub rows: Vec<AggregationResult>,
    pub totals: BudgetTotals,
}

impl BudgetOverviewReport {
    /// Generate over the whole snapshot
    pub fn generate(snapshot: &Snapshot) -> Self {
        let rows = aggregate(&snapshot.transactions, &snapshot.budgets);
        let totals = budget_totals(&rows);
        Self {
            period: None,
            rows,
            totals,
        }
    }

    /// Generate for budgets overlapping `period`; see [`period_rows`]
    pub fn generate_for(snapshot: &Snapshot, period: &ReportPeriod) -> Self {
        let rows = period_rows(snapshot, period);
        let totals = budget_totals(&rows);
        Self {
            period: Some(period.clone()),
            rows,
            totals,
        }
    }

    /// Label for the window budget figures cover
    fn window_note(&self) -> Option<&'static str> {
        self.period
            .as_ref()
            .map(|_| "Budgets are measured over their own window, which may extend past the period")
    }

    pub fn budgeted_rows(&self) -> impl Iterator<Item = &AggregationResult> {
        self.rows.iter().filter(|r| r.is_budgeted())
    }

    pub fn unbudgeted_rows(&self) -> impl Iterator<Item = &AggregationResult> {
        self.rows.iter().filter(|r| !r.is_budgeted())
    }

    /// Number of budgets in the given status
    pub fn count_with_status(&self, status: BudgetStatus) -> usize {
        self.budgeted_rows().filter(|r| r.status == status).count()
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();

        match &self.period {
            Some(period) => output.push_str(&format!("Budget Overview - {}\n", period)),
            None => output.push_str("Budget Overview\n"),
        }
        output.push_str(&"=".repeat(72));
        output.push('\n');
        if let Some(note) = self.window_note() {
            output.push_str(note);
            output.push('\n');
        }

        output.push_str(&format!(
            "  {:<24} {:>11} {:>11} {:>11} {:>8}\n",
            "Category", "Limit", "Spent", "Remaining", "Used"
        ));
        output.push_str(&"-".repeat(72));
        output.push('\n');

        if self.budgeted_rows().next().is_none() {
            output.push_str("  (no budgets)\n");
        }
        for row in self.budgeted_rows() {
            output.push_str(&format!(
                "{} {:<24} {:>11} {:>11} {:>11} {:>7.1}%\n",
                row.status.glyph(),
                row.category,
                row.limit,
                row.spent,
                row.remaining,
                row.percentage
            ));
        }

        let unbudgeted: Vec<_> = self.unbudgeted_rows().collect();
        if !unbudgeted.is_empty() {
            output.push_str("\nUNBUDGETED\n");
            for row in unbudgeted {
                output.push_str(&format!("  {:<24} {:>11} {:>11}\n", row.category, "-", row.spent));
            }
        }

        output.push_str(&"-".repeat(72));
        output.push('\n');
        output.push_str(&format!(
            "{} {:<24} {:>11} {:>11} {:>11} {:>7.1}%\n",
            self.totals.status.glyph(),
            "TOTAL",
            self.totals.limit,
            self.totals.spent,
            self.totals.remaining,
            self.totals.percentage
        ));

        output.push_str("\n✓ = on track   ! = above 80%   ⚠ = over budget\n");
        output
    }

    /// Export the report to CSV format
    pub fn export_csv<W: Write>(&self, writer: &mut W) -> FinanceResult<()> {
        let period = self
            .period
            .as_ref()
            .map(|p| p.to_string())
            .unwrap_or_else(|| "all".to_string());

        let mut csv = csv::Writer::from_writer(writer);
        csv.write_record([
            "period", "category", "budget_id", "limit", "spent", "remaining", "percentage", "status",
        ])?;
        for row in &self.rows {
            csv.write_record([
                period.clone(),
                row.category.to_string(),
                row.budget_id
                    .as_ref()
                    .map(|id| id.to_string())
                    .unwrap_or_default(),
                row.limit.to_string(),
                row.spent.to_string(),
                row.remaining.to_string(),
                format!("{:.2}", row.percentage),
                row.status.to_string(),
            ])?;
        }
        csv.write_record([
            period,
            "TOTAL".to_string(),
            String::new(),
            self.totals.limit.to_string(),
            self.totals.spent.to_string(),
            self.totals.remaining.to_string(),
            format!("{:.2}", self.totals.percentage),
            self.totals.status.to_string(),
        ])?;
        csv.flush().map_err(|e| FinanceError::Export(e.to_string()))?;
        Ok(())
    }
}

/// Aggregation rows for budgets overlapping `period`
///
/// Each budget is measured over its own window against its full limit, so a
/// yearly budget on a monthly view shows the year's spending. Unbudgeted
/// spending is restricted to `period`.
pub(crate) fn period_rows(snapshot: &Snapshot, period: &ReportPeriod) -> Vec<AggregationResult> {
    let budgets = snapshot.budgets_overlapping(period);
    let mut rows: Vec<AggregationResult> = aggregate(&snapshot.transactions, &budgets)
        .into_iter()
        .filter(|r| r.is_budgeted())
        .collect();
    rows.extend(
        aggregate(&snapshot.transactions_in(period), &budgets)
            .into_iter()
            .filter(|r| !r.is_budgeted()),
    );
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Budget, BudgetCadence, Category, Money, Transaction};
    use chrono::NaiveDate;

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, d).unwrap()
    }

    fn snapshot() -> Snapshot {
        let budgets = vec![
            Budget::for_period(Category::Food, Money::from_units(800, 0), BudgetCadence::Monthly, date(3, 1))
                .unwrap(),
            Budget::for_period(Category::Housing, Money::from_units(1000, 0), BudgetCadence::Monthly, date(3, 1))
                .unwrap(),
        ];
        let transactions = vec![
            Transaction::expense(Money::from_units(650, 0), "groceries", Category::Food, date(3, 4)).unwrap(),
            Transaction::expense(Money::from_units(1200, 0), "rent", Category::Housing, date(3, 1)).unwrap(),
            Transaction::expense(Money::from_units(30, 0), "movie", Category::Entertainment, date(3, 8)).unwrap(),
            Transaction::expense(Money::from_units(99, 0), "shoes", Category::Shopping, date(2, 8)).unwrap(),
        ];
        Snapshot::new(transactions, budgets)
    }

    #[test]
    fn test_generate_report() {
        let report = BudgetOverviewReport::generate(&snapshot());
        assert_eq!(report.rows.len(), 4);
        assert_eq!(report.count_with_status(BudgetStatus::Warning), 1);
        assert_eq!(report.count_with_status(BudgetStatus::Over), 1);
        assert_eq!(report.totals.limit, Money::from_units(1800, 0));
        assert_eq!(report.totals.spent, Money::from_units(1850, 0));
    }

    #[test]
    fn test_generate_for_period_excludes_other_months() {
        let report = BudgetOverviewReport::generate_for(&snapshot(), &ReportPeriod::monthly(2024, 3));
        let unbudgeted: Vec<_> = report.unbudgeted_rows().map(|r| r.category.clone()).collect();
        assert_eq!(unbudgeted, vec![Category::Entertainment]);
    }

    #[test]
    fn test_yearly_budget_in_monthly_view_uses_its_own_window() {
        let mut snapshot = snapshot();
        snapshot.budgets = vec![Budget::for_period(
            Category::Shopping,
            Money::from_units(1200, 0),
            BudgetCadence::Yearly,
            date(1, 1),
        )
        .unwrap()];

        let report = BudgetOverviewReport::generate_for(&snapshot, &ReportPeriod::monthly(2024, 3));
        let row = report.budgeted_rows().next().unwrap();
        // February's shoes count against the yearly limit
        assert_eq!(row.spent, Money::from_units(99, 0));
        assert_eq!(row.limit, Money::from_units(1200, 0));

        let unbudgeted: Vec<_> = report.unbudgeted_rows().map(|r| r.category.clone()).collect();
        assert_eq!(
            unbudgeted,
            vec![Category::Food, Category::Housing, Category::Entertainment]
        );
    }

    #[test]
    fn test_terminal_format() {
        let output = BudgetOverviewReport::generate_for(&snapshot(), &ReportPeriod::monthly(2024, 3))
            .format_terminal();
        assert!(output.contains("Budget Overview - 2024-03"));
        assert!(output.contains("measured over their own window"));
        assert!(output.contains("! Food"));
        assert!(output.contains("⚠ Housing"));
        assert!(output.contains("UNBUDGETED"));
        assert!(output.contains("TOTAL"));
    }

    #[test]
    fn test_csv_export() {
        let report = BudgetOverviewReport::generate(&snapshot());
        let mut out = Vec::new();
        report.export_csv(&mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(
            lines[0],
            "period,category,budget_id,limit,spent,remaining,percentage,status"
        );
        assert!(lines[1].starts_with("all,Food,"));
        assert!(lines[1].ends_with("800.00,650.00,150.00,81.25,warning"));
        assert!(lines.last().unwrap().starts_with("all,TOTAL,,1800.00"));
    }
}
