//! fintrack - personal finance tracking against a REST expense store
//!
//! The library fetches transactions and budgets from the store, turns them
//! into validated models, and computes summaries from one consistent
//! snapshot: category totals, budget status, trends, insights and category
//! suggestions.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (money, categories, transactions, budgets)
//! - `engine`: Pure aggregation over a snapshot
//! - `session`: Who is talking to which store
//! - `api`: HTTP client, wire records and ingestion
//! - `services`: Snapshot fetching, expense management, suggestions
//! - `reports`: Dashboard and budget overview
//! - `export`: CSV, JSON and YAML export
//! - `display`: Terminal formatting
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use fintrack::api::{ApiClient, IngestMode};
//! use fintrack::models::ReportPeriod;
//! use fintrack::reports::DashboardReport;
//! use fintrack::services::SnapshotService;
//!
//! let client = ApiClient::new(session, Duration::from_secs(10))?;
//! let snapshot = SnapshotService::new(&client).fetch(IngestMode::Strict).await?;
//! let report = DashboardReport::generate(&snapshot, &ReportPeriod::current_month());
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod display;
pub mod engine;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;
pub mod session;

pub use error::{FinanceError, FinanceResult};
