//! Category suggestion sources
//!
//! A [`CategorySuggester`] proposes a category for an expense description.
//! [`suggest_category`] wraps any source with the review step and turns
//! failures into [`SuggestionOutcome::Unavailable`]; a failed suggestion is
//! never an error for the caller.

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::api::dto::CategorizeRequest;
use crate::api::ApiClient;
use crate::engine::review_with_alternatives;
use crate::error::{FinanceError, FinanceResult};
use crate::models::{Category, CategorySuggestion, Money, SuggestionOutcome};

/// What a source proposes before review
#[derive(Debug, Clone, PartialEq)]
pub struct RawSuggestion {
    pub primary: CategorySuggestion,
    pub alternatives: Vec<CategorySuggestion>,
}

/// Anything that can guess a category from a description
#[async_trait]
pub trait CategorySuggester: Send + Sync {
    /// Short name for logs
    fn name(&self) -> &'static str;

    async fn suggest(&self, description: &str, amount: Option<Money>)
        -> FinanceResult<RawSuggestion>;
}

/// Ask `suggester` and review its answer
///
/// Low confidence is flagged but the category is kept. Any failure,
/// including an empty description, yields `Unavailable`.
pub async fn suggest_category(
    suggester: &dyn CategorySuggester,
    description: &str,
    amount: Option<Money>,
) -> SuggestionOutcome {
    let description = description.trim();
    if description.is_empty() {
        return SuggestionOutcome::unavailable("description is empty");
    }

    match suggester.suggest(description, amount).await {
        Ok(raw) => {
            let reviewed = review_with_alternatives(raw.primary, raw.alternatives);
            debug!(
                source = suggester.name(),
                category = %reviewed.category(),
                confidence = reviewed.confidence(),
                low_confidence = reviewed.low_confidence,
                "category suggested"
            );
            SuggestionOutcome::Suggested(reviewed)
        }
        Err(e) => {
            warn!(source = suggester.name(), error = %e, "category suggestion unavailable");
            SuggestionOutcome::unavailable(e.to_string())
        }
    }
}

/// Asks the store's categorisation endpoint
pub struct RemoteSuggester {
    client: ApiClient,
}

impl RemoteSuggester {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CategorySuggester for RemoteSuggester {
    fn name(&self) -> &'static str {
        "remote"
    }

    async fn suggest(
        &self,
        description: &str,
        amount: Option<Money>,
    ) -> FinanceResult<RawSuggestion> {
        let request = CategorizeRequest {
            description: description.to_string(),
            amount: amount.map(|a| a.to_major()),
        };
        let response = self.client.categorize(&request).await?;

        let category = Category::parse(&response.category).map_err(|e| {
            FinanceError::Validation(format!("Suggested category '{}': {}", response.category, e))
        })?;
        let alternatives = response
            .suggested_categories
            .into_iter()
            .filter_map(|alt| {
                Category::parse(&alt.category)
                    .ok()
                    .map(|c| CategorySuggestion::new(c, alt.confidence))
            })
            .collect();

        Ok(RawSuggestion {
            primary: CategorySuggestion::new(category, response.confidence),
            alternatives,
        })
    }
}

/// Confidence for a keyword hit
pub const KEYWORD_MATCH_CONFIDENCE: f64 = 0.8;

/// Confidence for the no-match fallback to `Other`
pub const KEYWORD_FALLBACK_CONFIDENCE: f64 = 0.5;

/// Checked in order; the first category with a matching keyword wins
const KEYWORD_RULES: &[(Category, &[&str])] = &[
    (
        Category::Food,
        &[
            "food", "restaurant", "pizza", "kfc", "mcdonalds", "grocery", "cafe", "subway",
            "lidl", "carrefour",
        ],
    ),
    (
        Category::Transportation,
        &["uber", "taxi", "bus", "train", "transport", "fuel", "gas station"],
    ),
    (
        Category::Shopping,
        &[
            "shopping", "store", "mall", "h&m", "zara", "amazon", "nike", "adidas", "ikea",
            "clothing",
        ],
    ),
    (
        Category::Entertainment,
        &["netflix", "spotify", "movie", "cinema", "theater", "concert", "disney+"],
    ),
    (
        Category::Utilities,
        &["bill", "utility", "electricity", "water", "gas", "internet", "phone"],
    ),
    (
        Category::Health,
        &["pharmacy", "doctor", "health", "medical", "medicine", "gym", "dental"],
    ),
    (Category::Housing, &["rent", "mortgage", "landlord"]),
];

/// Local keyword rules; works offline
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordSuggester;

impl KeywordSuggester {
    pub fn new() -> Self {
        Self
    }

    /// Synchronous core of the rules
    pub fn classify(&self, description: &str) -> CategorySuggestion {
        let lowered = description.to_lowercase();
        KEYWORD_RULES
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|k| lowered.contains(k)))
            .map(|(category, _)| CategorySuggestion::new(category.clone(), KEYWORD_MATCH_CONFIDENCE))
            .unwrap_or_else(|| CategorySuggestion::new(Category::Other, KEYWORD_FALLBACK_CONFIDENCE))
    }
}

#[async_trait]
impl CategorySuggester for KeywordSuggester {
    fn name(&self) -> &'static str {
        "keywords"
    }

    async fn suggest(
        &self,
        description: &str,
        _amount: Option<Money>,
    ) -> FinanceResult<RawSuggestion> {
        Ok(RawSuggestion {
            primary: self.classify(description),
            alternatives: Vec::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::client::stub;
    use crate::session::Session;
    use std::time::Duration;

    struct Fixed(f64);

    #[async_trait]
    impl CategorySuggester for Fixed {
        fn name(&self) -> &'static str {
            "fixed"
        }

        async fn suggest(&self, _: &str, _: Option<Money>) -> FinanceResult<RawSuggestion> {
            Ok(RawSuggestion {
                primary: CategorySuggestion::new(Category::Food, self.0),
                alternatives: Vec::new(),
            })
        }
    }

    fn remote(base: &str) -> RemoteSuggester {
        let session = Session::new(base, "u1", None).unwrap();
        RemoteSuggester::new(ApiClient::new(session, Duration::from_secs(2)).unwrap())
    }

    #[tokio::test]
    async fn test_low_confidence_still_populates_category() {
        let outcome = suggest_category(&Fixed(0.4), "lunch", None).await;
        let reviewed = outcome.suggestion().unwrap();
        assert_eq!(reviewed.category(), &Category::Food);
        assert!(reviewed.low_confidence);
    }

    #[tokio::test]
    async fn test_confident_suggestion_is_authoritative() {
        let outcome = suggest_category(&Fixed(0.9), "lunch", None).await;
        assert!(outcome.suggestion().unwrap().is_authoritative());
    }

    #[tokio::test]
    async fn test_empty_description_is_unavailable() {
        let outcome = suggest_category(&Fixed(0.9), "   ", None).await;
        assert!(!outcome.is_available());
    }

    #[test]
    fn test_keyword_rules() {
        let rules = KeywordSuggester::new();
        assert_eq!(rules.classify("Uber to airport").category, Category::Transportation);
        assert_eq!(rules.classify("Gas station fill-up").category, Category::Transportation);
        assert_eq!(rules.classify("Monthly electricity").category, Category::Utilities);
        assert_eq!(rules.classify("NETFLIX").confidence, KEYWORD_MATCH_CONFIDENCE);

        let fallback = rules.classify("something odd");
        assert_eq!(fallback.category, Category::Other);
        assert_eq!(fallback.confidence, KEYWORD_FALLBACK_CONFIDENCE);
    }

    #[tokio::test]
    async fn test_keyword_fallback_is_not_low_confidence() {
        let outcome = suggest_category(&KeywordSuggester::new(), "something odd", None).await;
        let reviewed = outcome.suggestion().unwrap();
        assert_eq!(reviewed.category(), &Category::Other);
        assert!(!reviewed.low_confidence);
    }

    #[tokio::test]
    async fn test_remote_suggestion_with_alternatives() {
        let (base, captured) = stub::serve(vec![(
            200,
            r#"{"category":"Transport","confidence":0.35,"ai_tagged":true,
                "suggested_categories":[{"category":"Transport","confidence":0.35},
                                        {"category":"Food","confidence":0.3},
                                        {"category":"Shopping","confidence":0.05}]}"#,
        )])
        .await;

        let outcome =
            suggest_category(&remote(&base), "bus pass", Some(Money::from_cents(2500))).await;
        let reviewed = outcome.suggestion().unwrap();
        assert_eq!(reviewed.category(), &Category::Transportation);
        assert!(reviewed.low_confidence);
        assert_eq!(reviewed.alternatives.len(), 1);
        assert_eq!(reviewed.alternatives[0].category, Category::Food);

        let requests = captured.await.unwrap();
        assert!(requests[0].head.starts_with("post /api/ai/categorize "));
        let body: serde_json::Value = serde_json::from_str(&requests[0].body).unwrap();
        assert_eq!(body["description"], "bus pass");
        assert_eq!(body["amount"], 25.0);
    }

    #[tokio::test]
    async fn test_remote_error_status_is_unavailable() {
        let (base, _captured) =
            stub::serve(vec![(404, r#"{"error":"Could not predict category"}"#)]).await;
        let outcome = suggest_category(&remote(&base), "mystery", None).await;
        match outcome {
            SuggestionOutcome::Unavailable { reason } => {
                assert!(reason.contains("Could not predict category"))
            }
            other => panic!("expected unavailable, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unreachable_service_is_unavailable() {
        let outcome = suggest_category(&remote("http://127.0.0.1:1"), "coffee", None).await;
        assert!(!outcome.is_available());
    }

    #[tokio::test]
    async fn test_malformed_body_is_unavailable() {
        let (base, _captured) = stub::serve(vec![(200, r#"{"unexpected":true}"#)]).await;
        let outcome = suggest_category(&remote(&base), "coffee", None).await;
        assert!(!outcome.is_available());
    }
}
