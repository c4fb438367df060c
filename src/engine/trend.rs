//! Period-over-period trends and savings figures

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use super::totals::{filter_by_period, total_by_kind};
use crate::models::{Money, ReportPeriod, Transaction, TransactionKind};

/// Percentage change from `previous` to `current`; 0 when `previous` is zero
pub fn month_over_month_change(current: Money, previous: Money) -> f64 {
    if previous.is_zero() {
        return 0.0;
    }
    ((current - previous).cents() as f64 * 100.0) / previous.cents() as f64
}

/// Share of income left after expenses, in percent; 0 when there is no income
pub fn savings_rate(income: Money, expense: Money) -> f64 {
    (income - expense).percent_of(income)
}

/// Income and expense totals for one span of time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct PeriodTotals {
    pub income: Money,
    pub expense: Money,
    pub savings: Money,
}

impl PeriodTotals {
    pub fn from_transactions(transactions: &[Transaction]) -> Self {
        let income = total_by_kind(transactions, TransactionKind::Income);
        let expense = total_by_kind(transactions, TransactionKind::Expense);
        Self {
            income,
            expense,
            savings: income - expense,
        }
    }

    pub fn savings_rate(&self) -> f64 {
        savings_rate(self.income, self.expense)
    }
}

/// Totals for one calendar month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthlySummary {
    pub year: i32,
    pub month: u32,
    #[serde(flatten)]
    pub totals: PeriodTotals,
}

impl MonthlySummary {
    pub fn period(&self) -> ReportPeriod {
        ReportPeriod::monthly(self.year, self.month)
    }
}

/// One summary per calendar month present in the input, oldest first
pub fn monthly_summaries(transactions: &[Transaction]) -> Vec<MonthlySummary> {
    let mut months: Vec<(i32, u32)> = transactions
        .iter()
        .map(|t| (t.date.year(), t.date.month()))
        .collect();
    months.sort_unstable();
    months.dedup();

    months
        .into_iter()
        .map(|(year, month)| {
            let in_month: Vec<Transaction> = transactions
                .iter()
                .filter(|t| t.date.year() == year && t.date.month() == month)
                .cloned()
                .collect();
            MonthlySummary {
                year,
                month,
                totals: PeriodTotals::from_transactions(&in_month),
            }
        })
        .collect()
}

/// A period's totals next to the period before it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodComparison {
    pub period: ReportPeriod,
    pub previous_period: ReportPeriod,
    pub current: PeriodTotals,
    pub previous: PeriodTotals,
    pub income_change: f64,
    pub expense_change: f64,
    pub savings_change: f64,
}

fn totals_within(transactions: &[Transaction], start: NaiveDate, end: NaiveDate) -> PeriodTotals {
    PeriodTotals::from_transactions(&filter_by_period(transactions, start, end))
}

/// Compare `period` with the one immediately before it
pub fn period_comparison(transactions: &[Transaction], period: &ReportPeriod) -> PeriodComparison {
    let previous_period = period.prev();
    let current = totals_within(transactions, period.start_date(), period.end_date());
    let previous = totals_within(
        transactions,
        previous_period.start_date(),
        previous_period.end_date(),
    );

    PeriodComparison {
        period: period.clone(),
        previous_period,
        current,
        previous,
        income_change: month_over_month_change(current.income, previous.income),
        expense_change: month_over_month_change(current.expense, previous.expense),
        savings_change: month_over_month_change(current.savings, previous.savings),
    }
}
