//! Answers to free-form spending questions

use serde::Serialize;

use super::category::Category;
use super::money::Money;

/// What the assistant said
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatAnswer {
    pub message: String,

    /// The headline figure, when the question had one
    pub amount: Option<Money>,

    /// Per-category totals backing the answer, in first-appearance order
    pub breakdown: Vec<(Category, Money)>,

    pub recommendations: Vec<String>,
}

impl ChatAnswer {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            amount: None,
            breakdown: Vec::new(),
            recommendations: Vec::new(),
        }
    }
}

/// What a question produced
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ChatOutcome {
    Answered(ChatAnswer),
    /// The assistant could not answer; nothing else is affected
    Unavailable { reason: String },
}

impl ChatOutcome {
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable {
            reason: reason.into(),
        }
    }

    pub fn answer(&self) -> Option<&ChatAnswer> {
        match self {
            Self::Answered(answer) => Some(answer),
            Self::Unavailable { .. } => None,
        }
    }
}
