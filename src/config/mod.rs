//! Configuration module for fintrack
//!
//! - Platform path resolution for the settings file
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::FintrackPaths;
pub use settings::{Settings, SuggestionSource};
