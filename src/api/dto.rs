//! Wire records exchanged with the REST store
//!
//! Every incoming field is optional; [`super::ingest`] decides which ones a
//! record cannot do without. Ids arrive as either numbers or strings.

use serde::{Deserialize, Deserializer, Serialize};

/// An id the store may send as a number or a string
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct WireId(pub String);

impl<'de> Deserialize<'de> for WireId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(i64),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(s) => WireId(s),
            Raw::Number(n) => WireId(n.to_string()),
        })
    }
}

impl std::fmt::Display for WireId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// An expense or income record as listed by the store
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TransactionRecord {
    #[serde(default)]
    pub id: Option<WireId>,
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default, alias = "type")]
    pub kind: Option<String>,
}

/// A budget record as listed by the store
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BudgetRecord {
    #[serde(default)]
    pub id: Option<WireId>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, alias = "amount")]
    pub limit: Option<f64>,
    #[serde(default)]
    pub period: Option<String>,
    #[serde(default, alias = "startDate")]
    pub start_date: Option<String>,
    #[serde(default, alias = "endDate")]
    pub end_date: Option<String>,
}

/// A category record from `/api/categories`
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryRecord {
    #[serde(default)]
    pub id: Option<WireId>,
    pub name: String,
}

/// Body of `POST /api/expenses`
#[derive(Debug, Clone, Serialize)]
pub struct NewExpenseRequest {
    pub user_id: String,
    pub amount: f64,
    pub description: String,
    pub category: String,
    /// `YYYY-MM-DD`
    pub date: String,
    pub currency: String,
}

/// Body of `PUT /api/expenses/{id}`: the whole record plus its id
#[derive(Debug, Clone, Serialize)]
pub struct UpdateExpenseRequest {
    pub id: String,
    #[serde(flatten)]
    pub expense: NewExpenseRequest,
}

/// Body of `POST /api/ai/categorize`
#[derive(Debug, Clone, Serialize)]
pub struct CategorizeRequest {
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
}

/// Answer from `POST /api/ai/categorize`
#[derive(Debug, Clone, Deserialize)]
pub struct CategorizeResponse {
    pub category: String,
    pub confidence: f64,
    #[serde(default)]
    pub suggested_categories: Vec<ScoredCategory>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScoredCategory {
    pub category: String,
    pub confidence: f64,
}

/// Body of `POST /api/ai/chat`
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub query: String,
    pub user_id: String,
}

/// Answer from `POST /api/ai/chat`; only `message` is always present
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    pub message: String,
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub recommendations: Vec<ChatRecommendation>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatRecommendation {
    #[serde(default)]
    pub category: Option<String>,
    pub recommendation: String,
}

/// Error body the store sends with non-2xx answers
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default, alias = "message")]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_and_string_ids() {
        let records: Vec<TransactionRecord> =
            serde_json::from_str(r#"[{"id": 7}, {"id": "abc"}]"#).unwrap();
        assert_eq!(records[0].id, Some(WireId("7".into())));
        assert_eq!(records[1].id, Some(WireId("abc".into())));
    }

    #[test]
    fn test_budget_field_aliases() {
        let record: BudgetRecord = serde_json::from_str(
            r#"{"id":"1","category":"Food","amount":500,"period":"monthly",
                "startDate":"2024-03-01","endDate":"2024-03-31"}"#,
        )
        .unwrap();
        assert_eq!(record.limit, Some(500.0));
        assert_eq!(record.start_date.as_deref(), Some("2024-03-01"));
    }

    #[test]
    fn test_type_alias_for_kind() {
        let record: TransactionRecord =
            serde_json::from_str(r#"{"type":"income","amount":12.5}"#).unwrap();
        assert_eq!(record.kind.as_deref(), Some("income"));
        assert!(record.date.is_none());
    }

    #[test]
    fn test_update_request_flattens_record() {
        let request = UpdateExpenseRequest {
            id: "7".into(),
            expense: NewExpenseRequest {
                user_id: "u1".into(),
                amount: 3.5,
                description: "Tea".into(),
                category: "Food".into(),
                date: "2024-03-05".into(),
                currency: "EUR".into(),
            },
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["id"], "7");
        assert_eq!(value["user_id"], "u1");
        assert_eq!(value["description"], "Tea");
        assert!(value.get("expense").is_none());
    }

    #[test]
    fn test_chat_response_extras_are_optional() {
        let resp: ChatResponse = serde_json::from_str(
            r#"{"message":"hi","recommendations":[{"category":"Food","recommendation":"less","current_percentage":40.0}],"insights":{}}"#,
        )
        .unwrap();
        assert_eq!(resp.message, "hi");
        assert!(resp.amount.is_none());
        assert_eq!(resp.recommendations[0].recommendation, "less");
    }

    #[test]
    fn test_categorize_response_without_alternatives() {
        let resp: CategorizeResponse =
            serde_json::from_str(r#"{"category":"Food","confidence":0.9}"#).unwrap();
        assert!(resp.suggested_categories.is_empty());
    }
}
