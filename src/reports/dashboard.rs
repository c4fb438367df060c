//! Dashboard Report
//!
//! The headline figures for one period: income, spending, savings, the
//! change since the previous period, where the money went, and what the
//! budgets say about it.

use std::io::Write;

use serde::Serialize;

use super::budget_overview::period_rows;
use crate::engine::{
    average_daily_spend, budget_insights, budget_totals, category_recommendations,
    category_totals, percentage_breakdown, period_comparison, top_category, BudgetInsight,
    BudgetTotals, PeriodComparison, Recommendation,
};
use crate::error::{FinanceError, FinanceResult};
use crate::models::{Category, Money, ReportPeriod, TransactionKind};
use crate::services::Snapshot;

/// One expense category's slice of the period
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryShare {
    pub category: Category,
    pub amount: Money,
    pub percentage: f64,
}

/// Dashboard Report
#[derive(Debug, Clone, Serialize)]
pub struct DashboardReport {
    pub period: ReportPeriod,
    pub income: Money,
    pub expense: Money,
    pub net_savings: Money,
    pub savings_rate: f64,
    pub comparison: PeriodComparison,
    /// Expense categories, largest first
    pub breakdown: Vec<CategoryShare>,
    pub top_category: Option<Category>,
    pub average_daily_spend: Money,
    /// Budgets overlapping the period, each over its own window
    pub budget_totals: BudgetTotals,
    pub insights: Vec<BudgetInsight>,
    pub recommendations: Vec<Recommendation>,
    pub transaction_count: usize,
}

impl DashboardReport {
    /// Generate the dashboard for `period`
    pub fn generate(snapshot: &Snapshot, period: &ReportPeriod) -> Self {
        let transactions = snapshot.transactions_in(period);

        let comparison = period_comparison(&snapshot.transactions, period);
        let current = comparison.current;

        let totals = category_totals(&transactions, TransactionKind::Expense);
        let shares = percentage_breakdown(&totals);
        let mut breakdown: Vec<CategoryShare> = totals
            .iter()
            .zip(shares)
            .map(|((category, amount), (_, percentage))| CategoryShare {
                category: category.clone(),
                amount,
                percentage,
            })
            .collect();
        breakdown.sort_by(|a, b| b.amount.cmp(&a.amount));

        let rows = period_rows(snapshot, period);

        Self {
            period: period.clone(),
            income: current.income,
            expense: current.expense,
            net_savings: current.savings,
            savings_rate: current.savings_rate(),
            top_category: top_category(&totals).cloned(),
            average_daily_spend: average_daily_spend(&transactions),
            budget_totals: budget_totals(&rows),
            insights: budget_insights(&rows),
            recommendations: category_recommendations(&totals),
            transaction_count: transactions.len(),
            breakdown,
            comparison,
        }
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, currency: &str) -> String {
        let money = |m: Money| m.format_with_symbol(currency);
        let mut output = String::new();

        output.push_str(&format!("Dashboard - {}\n", self.period));
        output.push_str(&"=".repeat(60));
        output.push('\n');

        output.push_str(&format!(
            "{:<22} {:>14}   {:>+7.1}% vs {}\n",
            "Income",
            money(self.income),
            self.comparison.income_change,
            self.comparison.previous_period
        ));
        output.push_str(&format!(
            "{:<22} {:>14}   {:>+7.1}% vs {}\n",
            "Expenses",
            money(self.expense),
            self.comparison.expense_change,
            self.comparison.previous_period
        ));
        output.push_str(&format!(
            "{:<22} {:>14}   {:>7.1}% of income\n",
            "Net savings",
            money(self.net_savings),
            self.savings_rate
        ));
        output.push_str(&format!(
            "{:<22} {:>14}\n",
            "Average daily spend",
            money(self.average_daily_spend)
        ));
        if let Some(top) = &self.top_category {
            output.push_str(&format!("{:<22} {:>14}\n", "Top category", top));
        }

        output.push_str("\nSPENDING BY CATEGORY\n");
        output.push_str(&"-".repeat(60));
        output.push('\n');
        if self.breakdown.is_empty() {
            output.push_str("  (no expenses in this period)\n");
        }
        for share in &self.breakdown {
            let bar_len = (share.percentage / 5.0).round() as usize;
            output.push_str(&format!(
                "  {:<20} {:>12} {:>6.1}% {}\n",
                share.category,
                money(share.amount),
                share.percentage,
                "█".repeat(bar_len)
            ));
        }

        if self.budget_totals.limit.is_positive() {
            output.push_str(&format!(
                "\nBudgets: {} of {} used ({:.1}%) {}\n",
                money(self.budget_totals.spent),
                money(self.budget_totals.limit),
                self.budget_totals.percentage,
                self.budget_totals.status.glyph()
            ));
            output.push_str("  (each budget measured over its own window)\n");
        }

        if !self.insights.is_empty() || !self.recommendations.is_empty() {
            output.push_str("\nINSIGHTS\n");
            output.push_str(&"-".repeat(60));
            output.push('\n');
            for insight in &self.insights {
                output.push_str(&format!("  {}\n", insight));
            }
            for rec in &self.recommendations {
                output.push_str(&format!("  [TIP] {}\n", rec));
            }
        }

        output
    }

    /// Export the category breakdown and headline figures to CSV
    pub fn export_csv<W: Write>(&self, writer: &mut W) -> FinanceResult<()> {
        let period = self.period.to_string();
        let mut csv = csv::Writer::from_writer(writer);
        csv.write_record(["period", "line", "amount", "percentage"])?;

        let headline = [
            ("income", self.income, self.comparison.income_change),
            ("expense", self.expense, self.comparison.expense_change),
            ("net_savings", self.net_savings, self.savings_rate),
        ];
        for (line, amount, percentage) in headline {
            csv.write_record([
                period.clone(),
                line.to_string(),
                amount.to_string(),
                format!("{:.2}", percentage),
            ])?;
        }
        for share in &self.breakdown {
            csv.write_record([
                period.clone(),
                format!("category:{}", share.category),
                share.amount.to_string(),
                format!("{:.2}", share.percentage),
            ])?;
        }
        csv.flush().map_err(|e| FinanceError::Export(e.to_string()))?;
        Ok(())
    }
}
