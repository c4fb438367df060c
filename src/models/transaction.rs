//! Transaction model
//!
//! A dated money movement. The amount is always non-negative; whether it is
//! money in or money out is carried by [`TransactionKind`].

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::Category;
use super::ids::TransactionId;
use super::money::Money;

/// Direction of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    /// Parse the store's kind label ("income" / "expense", any case)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "income" => Some(Self::Income),
            "expense" => Some(Self::Expense),
            _ => None,
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Self::Income => "income",
            Self::Expense => "expense",
        })
    }
}

/// A financial transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,

    /// Non-negative amount in minor units
    pub amount: Money,

    pub description: String,

    pub category: Category,

    /// Calendar date; there is no time-of-day component
    pub date: NaiveDate,

    pub kind: TransactionKind,
}

impl Transaction {
    /// Build and validate a transaction
    pub fn new(
        id: TransactionId,
        amount: Money,
        description: impl Into<String>,
        category: Category,
        date: NaiveDate,
        kind: TransactionKind,
    ) -> Result<Self, TransactionValidationError> {
        let txn = Self {
            id,
            amount,
            description: description.into().trim().to_string(),
            category,
            date,
            kind,
        };
        txn.validate()?;
        Ok(txn)
    }

    /// Convenience constructor for an expense with a fresh local id
    pub fn expense(
        amount: Money,
        description: impl Into<String>,
        category: Category,
        date: NaiveDate,
    ) -> Result<Self, TransactionValidationError> {
        Self::new(
            TransactionId::generate(),
            amount,
            description,
            category,
            date,
            TransactionKind::Expense,
        )
    }

    /// Convenience constructor for income with a fresh local id
    pub fn income(
        amount: Money,
        description: impl Into<String>,
        category: Category,
        date: NaiveDate,
    ) -> Result<Self, TransactionValidationError> {
        Self::new(
            TransactionId::generate(),
            amount,
            description,
            category,
            date,
            TransactionKind::Income,
        )
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }

    /// Amount with the sign implied by the kind (expenses negative)
    pub fn signed_amount(&self) -> Money {
        match self.kind {
            TransactionKind::Income => self.amount,
            TransactionKind::Expense => -self.amount,
        }
    }

    /// Validate the transaction
    pub fn validate(&self) -> Result<(), TransactionValidationError> {
        if self.amount.is_negative() {
            return Err(TransactionValidationError::NegativeAmount(self.amount));
        }
        if self.description.trim().is_empty() {
            return Err(TransactionValidationError::EmptyDescription);
        }
        Ok(())
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} [{}] {}",
            self.date, self.kind, self.amount, self.category, self.description
        )
    }
}

/// Validation errors for transactions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionValidationError {
    NegativeAmount(Money),
    EmptyDescription,
}

impl fmt::Display for TransactionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativeAmount(amount) => {
                write!(f, "amount must not be negative (got {})", amount)
            }
            Self::EmptyDescription => write!(f, "description cannot be empty"),
        }
    }
}

impl std::error::Error for TransactionValidationError {}
