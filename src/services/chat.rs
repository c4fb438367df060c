//! Spending questions
//!
//! A [`ChatResponder`] answers a free-form question. [`ask`] turns any
//! failure into [`ChatOutcome::Unavailable`], the same way category
//! suggestions degrade.

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::api::dto::ChatRequest;
use crate::api::{ingest_transactions, ApiClient, IngestMode};
use crate::engine::answer_locally;
use crate::error::{FinanceError, FinanceResult};
use crate::models::{ChatAnswer, ChatOutcome, Money};

/// Anything that can answer a spending question
#[async_trait]
pub trait ChatResponder: Send + Sync {
    /// Short name for logs
    fn name(&self) -> &'static str;

    async fn answer(&self, query: &str) -> FinanceResult<ChatAnswer>;
}

/// Ask `responder`; an empty question or any failure yields `Unavailable`
pub async fn ask(responder: &dyn ChatResponder, query: &str) -> ChatOutcome {
    let query = query.trim();
    if query.is_empty() {
        return ChatOutcome::unavailable("question is empty");
    }

    match responder.answer(query).await {
        Ok(answer) => {
            debug!(source = responder.name(), "question answered");
            ChatOutcome::Answered(answer)
        }
        Err(e) => {
            warn!(source = responder.name(), error = %e, "chat answer unavailable");
            ChatOutcome::unavailable(e.to_string())
        }
    }
}

/// Passes the question to the store's assistant
pub struct RemoteChat {
    client: ApiClient,
}

impl RemoteChat {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ChatResponder for RemoteChat {
    fn name(&self) -> &'static str {
        "remote"
    }

    async fn answer(&self, query: &str) -> FinanceResult<ChatAnswer> {
        let request = ChatRequest {
            query: query.to_string(),
            user_id: self.client.session().user_id().to_string(),
        };
        let response = self.client.chat(&request).await?;
        Ok(ChatAnswer {
            message: response.message,
            amount: response.amount.and_then(Money::from_major),
            breakdown: Vec::new(),
            recommendations: response
                .recommendations
                .into_iter()
                .map(|r| r.recommendation)
                .collect(),
        })
    }
}

/// Fetches the expense listing and answers with local keyword rules
pub struct LocalChat {
    client: ApiClient,
    mode: IngestMode,
    currency: String,
}

impl LocalChat {
    pub fn new(client: ApiClient, mode: IngestMode, currency: impl Into<String>) -> Self {
        Self {
            client,
            mode,
            currency: currency.into(),
        }
    }
}

#[async_trait]
impl ChatResponder for LocalChat {
    fn name(&self) -> &'static str {
        "local"
    }

    async fn answer(&self, query: &str) -> FinanceResult<ChatAnswer> {
        let records = self.client.list_transactions().await?;
        let transactions = ingest_transactions(records, self.mode)?;
        answer_locally(query, &transactions, &self.currency).ok_or_else(|| {
            FinanceError::Validation(
                "local answers only cover questions about your total or category spending".into(),
            )
        })
    }
}
