//! Reports module for fintrack
//!
//! Reports are built from a fetched snapshot and rendered either for the
//! terminal or as CSV.

pub mod budget_overview;
pub mod dashboard;

pub use budget_overview::BudgetOverviewReport;
pub use dashboard::{CategoryShare, DashboardReport};
