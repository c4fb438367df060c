//! Post-processing for category suggestions

use crate::models::{CategorySuggestion, ReviewedSuggestion};

/// Suggestions scoring below this are advisory only
pub const LOW_CONFIDENCE_THRESHOLD: f64 = 0.5;

/// Alternatives at or below this confidence are dropped
pub const MIN_ALTERNATIVE_CONFIDENCE: f64 = 0.1;

/// Flag a suggestion as low confidence when it scores below the threshold
///
/// The suggested category is always kept.
pub fn review_suggestion(suggestion: CategorySuggestion) -> ReviewedSuggestion {
    review_with_alternatives(suggestion, Vec::new())
}

/// Like [`review_suggestion`], also ranking the source's other candidates
///
/// Alternatives are sorted most confident first. Weak candidates and any
/// repeat of the primary category are removed.
pub fn review_with_alternatives(
    suggestion: CategorySuggestion,
    alternatives: Vec<CategorySuggestion>,
) -> ReviewedSuggestion {
    let suggestion = CategorySuggestion::new(suggestion.category, suggestion.confidence);

    let mut alternatives: Vec<CategorySuggestion> = alternatives
        .into_iter()
        .map(|alt| CategorySuggestion::new(alt.category, alt.confidence))
        .filter(|alt| alt.confidence > MIN_ALTERNATIVE_CONFIDENCE)
        .filter(|alt| alt.category != suggestion.category)
        .collect();
    alternatives.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));

    ReviewedSuggestion {
        low_confidence: suggestion.confidence < LOW_CONFIDENCE_THRESHOLD,
        suggestion,
        alternatives,
    }
}
