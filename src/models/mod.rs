//! Core data models for fintrack
//!
//! Immutable value records related only by category lookup: transactions,
//! budgets, category suggestions and chat answers, plus the money and period
//! types they are built from.

pub mod budget;
pub mod category;
pub mod chat;
pub mod ids;
pub mod money;
pub mod period;
pub mod suggestion;
pub mod transaction;

pub use budget::{Budget, BudgetValidationError};
pub use category::{Category, CategoryValidationError};
pub use chat::{ChatAnswer, ChatOutcome};
pub use ids::{BudgetId, TransactionId};
pub use money::{Money, MoneyParseError};
pub use period::{BudgetCadence, PeriodParseError, ReportPeriod};
pub use suggestion::{CategorySuggestion, ReviewedSuggestion, SuggestionOutcome};
pub use transaction::{Transaction, TransactionKind, TransactionValidationError};
