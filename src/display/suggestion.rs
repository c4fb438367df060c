//! Suggestion display formatting

use crate::models::SuggestionOutcome;

/// Format a suggestion outcome for the terminal
///
/// Low-confidence suggestions are still shown, flagged for confirmation.
pub fn format_suggestion(description: &str, outcome: &SuggestionOutcome) -> String {
    let mut output = String::new();
    output.push_str(&format!("Description: {}\n", description));

    match outcome {
        SuggestionOutcome::Suggested(reviewed) => {
            output.push_str(&format!("Suggested:   {}\n", reviewed.suggestion));
            if reviewed.low_confidence {
                output.push_str("             ! low confidence, please confirm the category\n");
            }
            if !reviewed.alternatives.is_empty() {
                let alternatives: Vec<String> =
                    reviewed.alternatives.iter().map(|a| a.to_string()).collect();
                output.push_str(&format!("Also:        {}\n", alternatives.join(", ")));
            }
        }
        SuggestionOutcome::Unavailable { reason } => {
            output.push_str("Suggested:   (unavailable, choose a category manually)\n");
            output.push_str(&format!("Reason:      {}\n", reason));
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::review_with_alternatives;
    use crate::models::{Category, CategorySuggestion};

    #[test]
    fn test_confident_suggestion() {
        let outcome = SuggestionOutcome::Suggested(review_with_alternatives(
            CategorySuggestion::new(Category::Transportation, 0.8),
            vec![CategorySuggestion::new(Category::Shopping, 0.15)],
        ));
        let text = format_suggestion("Uber to airport", &outcome);
        assert!(text.contains("Suggested:   Transportation (80%)"));
        assert!(text.contains("Also:        Shopping (15%)"));
        assert!(!text.contains("low confidence"));
    }

    #[test]
    fn test_low_confidence_is_flagged() {
        let outcome = SuggestionOutcome::Suggested(review_with_alternatives(
            CategorySuggestion::new(Category::Other, 0.3),
            Vec::new(),
        ));
        let text = format_suggestion("thing", &outcome);
        assert!(text.contains("Other (30%)"));
        assert!(text.contains("low confidence"));
    }

    #[test]
    fn test_unavailable() {
        let text = format_suggestion("thing", &SuggestionOutcome::unavailable("timed out"));
        assert!(text.contains("choose a category manually"));
        assert!(text.contains("Reason:      timed out"));
    }
}
