//! Boundary with the external REST store
//!
//! `client` speaks HTTP, `dto` holds the loosely-typed wire records, and
//! `ingest` turns those into validated models before anything else sees them.

pub mod client;
pub mod dto;
pub mod ingest;

pub use client::ApiClient;
pub use ingest::{ingest_budgets, ingest_transactions, parse_wire_date, IngestMode};
