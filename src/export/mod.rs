//! Export module for fintrack
//!
//! Writes a fetched snapshot out in several formats:
//! - CSV: transactions or budget definitions (spreadsheet-compatible)
//! - JSON: the full snapshot plus computed reports, machine-readable
//! - YAML: the same content, human-readable

pub mod csv;
pub mod json;
pub mod yaml;

pub use csv::{export_budgets_csv, export_transactions_csv};
pub use json::{export_full_json, ExportMetadata, FullExport, EXPORT_SCHEMA_VERSION};
pub use yaml::export_full_yaml;
