//! Category suggestions
//!
//! A suggestion is advisory: the caller still asks the user to confirm it,
//! and a low score never discards the suggested category.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::Category;

/// A confidence-scored guess at an expense's category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySuggestion {
    pub category: Category,
    /// Real number in [0, 1]
    pub confidence: f64,
}

impl CategorySuggestion {
    /// Create a suggestion, clamping the confidence into [0, 1]
    ///
    /// A NaN confidence becomes 0.
    pub fn new(category: Category, confidence: f64) -> Self {
        let confidence = if confidence.is_nan() {
            0.0
        } else {
            confidence.clamp(0.0, 1.0)
        };
        Self {
            category,
            confidence,
        }
    }
}

impl fmt::Display for CategorySuggestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.0}%)", self.category, self.confidence * 100.0)
    }
}

/// A suggestion after post-processing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewedSuggestion {
    pub suggestion: CategorySuggestion,

    /// Set when confidence is below the threshold; the category is still present
    pub low_confidence: bool,

    /// Other candidates, most confident first
    pub alternatives: Vec<CategorySuggestion>,
}

impl ReviewedSuggestion {
    pub fn category(&self) -> &Category {
        &self.suggestion.category
    }

    pub fn confidence(&self) -> f64 {
        self.suggestion.confidence
    }

    /// Whether the suggestion may be applied without asking the user again
    pub fn is_authoritative(&self) -> bool {
        !self.low_confidence
    }
}

/// What a suggestion request produced
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SuggestionOutcome {
    Suggested(ReviewedSuggestion),
    /// The source failed; the user must pick a category by hand
    Unavailable { reason: String },
}

impl SuggestionOutcome {
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable {
            reason: reason.into(),
        }
    }

    pub fn suggestion(&self) -> Option<&ReviewedSuggestion> {
        match self {
            Self::Suggested(reviewed) => Some(reviewed),
            Self::Unavailable { .. } => None,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Self::Suggested(_))
    }
}
