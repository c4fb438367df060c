//! Service layer for fintrack
//!
//! Async orchestration around the store: fetch a snapshot, manage expenses,
//! source category suggestions and answer spending questions. Computation is
//! left to the engine.

pub mod chat;
pub mod expense;
pub mod snapshot;
pub mod suggestion;

pub use chat::{ask, ChatResponder, LocalChat, RemoteChat};
pub use expense::{CreateExpenseInput, ExpenseFilter, ExpenseService, UpdateExpenseInput};
pub use snapshot::{Snapshot, SnapshotService};
pub use suggestion::{
    suggest_category, CategorySuggester, KeywordSuggester, RawSuggestion, RemoteSuggester,
};
