//! Budget model
//!
//! A spending limit for one category over a dated window. The category does
//! not have to match any transaction; such a budget simply sees zero spend.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::Category;
use super::ids::BudgetId;
use super::money::Money;
use super::period::{BudgetCadence, ReportPeriod};

/// A spending limit for a category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub id: BudgetId,

    pub category: Category,

    /// Spending limit; zero is allowed and means "no limit set"
    pub limit: Money,

    pub period: BudgetCadence,

    pub start_date: NaiveDate,

    /// Inclusive; never before `start_date`
    pub end_date: NaiveDate,
}

impl Budget {
    /// Build and validate a budget
    pub fn new(
        id: BudgetId,
        category: Category,
        limit: Money,
        period: BudgetCadence,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Self, BudgetValidationError> {
        let budget = Self {
            id,
            category,
            limit,
            period,
            start_date,
            end_date,
        };
        budget.validate()?;
        Ok(budget)
    }

    /// A budget covering exactly one period of the given cadence
    pub fn for_period(
        category: Category,
        limit: Money,
        cadence: BudgetCadence,
        anchor: NaiveDate,
    ) -> Result<Self, BudgetValidationError> {
        let window = ReportPeriod::containing(cadence, anchor);
        Self::new(
            BudgetId::generate(),
            category,
            limit,
            cadence,
            window.start_date(),
            window.end_date(),
        )
    }

    /// Check if a date falls within the budget window, both ends included
    pub fn covers(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }

    /// Validate the budget
    pub fn validate(&self) -> Result<(), BudgetValidationError> {
        if self.limit.is_negative() {
            return Err(BudgetValidationError::NegativeLimit(self.limit));
        }
        if self.end_date < self.start_date {
            return Err(BudgetValidationError::EndBeforeStart {
                start: self.start_date,
                end: self.end_date,
            });
        }
        Ok(())
    }
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} limit {} ({}..{})",
            self.category, self.period, self.limit, self.start_date, self.end_date
        )
    }
}

/// Validation errors for budgets
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BudgetValidationError {
    NegativeLimit(Money),
    EndBeforeStart { start: NaiveDate, end: NaiveDate },
}

impl fmt::Display for BudgetValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativeLimit(limit) => write!(f, "limit must not be negative (got {})", limit),
            Self::EndBeforeStart { start, end } => {
                write!(f, "end date {} is before start date {}", end, start)
            }
        }
    }
}

impl std::error::Error for BudgetValidationError {}
