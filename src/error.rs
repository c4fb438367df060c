//! Error types for fintrack
//!
//! Structural problems (malformed records, bad configuration, transport
//! failures) are errors. Numeric edge cases inside the aggregation engine are
//! not: those resolve to documented fallback values and never reach this type.

use thiserror::Error;

/// The main error type for fintrack operations
#[derive(Error, Debug)]
pub enum FinanceError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// A record was rejected before it could reach the engine
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// The REST store answered with a non-success status
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The REST store could not be reached or its body could not be read
    #[error("HTTP error: {0}")]
    Http(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),
}

impl FinanceError {
    /// Create a validation error for a single record field
    pub fn invalid_field(
        record: &'static str,
        id: impl AsRef<str>,
        field: &'static str,
        reason: impl AsRef<str>,
    ) -> Self {
        Self::Validation(format!(
            "{} '{}': {} {}",
            record,
            id.as_ref(),
            field,
            reason.as_ref()
        ))
    }

    /// Create a "not found" error for expenses
    pub fn expense_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Expense",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Transport failures and 5xx answers are worth retrying; everything else is not
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Http(_) => true,
            Self::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

impl From<std::io::Error> for FinanceError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for FinanceError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<serde_yaml::Error> for FinanceError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Export(err.to_string())
    }
}

impl From<csv::Error> for FinanceError {
    fn from(err: csv::Error) -> Self {
        Self::Export(err.to_string())
    }
}

impl From<reqwest::Error> for FinanceError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => Self::Api {
                status: status.as_u16(),
                message: err.to_string(),
            },
            None => Self::Http(err.to_string()),
        }
    }
}

/// Result type alias for fintrack operations
pub type FinanceResult<T> = Result<T, FinanceError>;
