//! HTTP client for the REST expense store

use std::time::Duration;

use reqwest::{RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::dto::{
    BudgetRecord, CategorizeRequest, CategorizeResponse, CategoryRecord, ChatRequest,
    ChatResponse, ErrorBody, NewExpenseRequest, TransactionRecord, UpdateExpenseRequest,
};
use crate::error::{FinanceError, FinanceResult};
use crate::session::Session;

/// Thin async client over the store's JSON endpoints
///
/// Cheap to clone; clones share one connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    session: Session,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(session: Session, timeout: Duration) -> FinanceResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("fintrack/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FinanceError::Http(e.to_string()))?;
        Ok(Self { session, http })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.session.token() {
            Some(token) => request.bearer_auth(token.expose()),
            None => request,
        }
    }

    fn user_query(&self) -> [(&'static str, &str); 1] {
        [("user_id", self.session.user_id())]
    }

    /// Turn a non-success answer into `FinanceError::Api`
    async fn check(response: Response) -> FinanceResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(|b| b.error)
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string()
            });
        Err(FinanceError::Api {
            status: status.as_u16(),
            message,
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> FinanceResult<T> {
        let url = self.session.endpoint(path);
        debug!(%url, "GET");
        let request = self.authorize(self.http.get(&url).query(&self.user_query()));
        let response = Self::check(request.send().await?).await?;
        Ok(response.json().await?)
    }

    /// `GET /api/expenses`
    pub async fn list_transactions(&self) -> FinanceResult<Vec<TransactionRecord>> {
        self.get_json("/api/expenses").await
    }

    /// `GET /api/budgets`
    pub async fn list_budgets(&self) -> FinanceResult<Vec<BudgetRecord>> {
        self.get_json("/api/budgets").await
    }

    /// `GET /api/categories`
    pub async fn list_categories(&self) -> FinanceResult<Vec<CategoryRecord>> {
        self.get_json("/api/categories").await
    }

    /// `POST /api/expenses`, returning the stored record
    pub async fn create_expense(
        &self,
        request: &NewExpenseRequest,
    ) -> FinanceResult<TransactionRecord> {
        let url = self.session.endpoint("/api/expenses");
        debug!(%url, amount = request.amount, category = %request.category, "POST");
        let response = self
            .authorize(self.http.post(&url).json(request))
            .send()
            .await?;
        let response = Self::check(response).await?;
        Ok(response.json().await?)
    }

    /// `/api/expenses/{id}` with the id as one encoded path segment
    ///
    /// Dot segments would be dropped or resolved by URL normalisation, so
    /// they are refused rather than sent.
    fn expense_url(&self, id: &str) -> FinanceResult<Url> {
        let id = id.trim();
        if id.is_empty() || id == "." || id == ".." {
            return Err(FinanceError::Validation(format!("Invalid expense id '{}'", id)));
        }
        let mut url = Url::parse(&self.session.endpoint("/api/expenses"))
            .map_err(|e| FinanceError::Config(format!("Invalid API URL: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| FinanceError::Config("API URL cannot carry a path".into()))?
            .push(id);
        Ok(url)
    }

    /// `PUT /api/expenses/{id}` with the full record, returning it as stored
    pub async fn update_expense(
        &self,
        request: &UpdateExpenseRequest,
    ) -> FinanceResult<TransactionRecord> {
        let url = self.expense_url(&request.id)?;
        debug!(%url, amount = request.expense.amount, category = %request.expense.category, "PUT");
        let response = self
            .authorize(self.http.put(url).json(request))
            .send()
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(FinanceError::expense_not_found(&request.id));
        }
        let response = Self::check(response).await?;
        Ok(response.json().await?)
    }

    /// `DELETE /api/expenses/{id}`
    pub async fn delete_expense(&self, id: &str) -> FinanceResult<()> {
        let url = self.expense_url(id)?;
        debug!(%url, "DELETE");
        let response = self
            .authorize(self.http.delete(url).query(&self.user_query()))
            .send()
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(FinanceError::expense_not_found(id));
        }
        Self::check(response).await?;
        Ok(())
    }

    /// `POST /api/ai/chat`
    pub async fn chat(&self, request: &ChatRequest) -> FinanceResult<ChatResponse> {
        let url = self.session.endpoint("/api/ai/chat");
        debug!(%url, "POST");
        let response = self
            .authorize(self.http.post(&url).json(request))
            .send()
            .await?;
        let response = Self::check(response).await?;
        Ok(response.json().await?)
    }

    /// `POST /api/ai/categorize`
    pub async fn categorize(&self, request: &CategorizeRequest) -> FinanceResult<CategorizeResponse> {
        let url = self.session.endpoint("/api/ai/categorize");
        debug!(%url, "POST");
        let response = self
            .authorize(self.http.post(&url).json(request))
            .send()
            .await?;
        let response = Self::check(response).await?;
        Ok(response.json().await?)
    }
}
