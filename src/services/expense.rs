//! Expense service
//!
//! Listing, creating, editing and deleting expenses in the store. Creation
//! and edits validate locally first so obviously bad input never leaves the
//! machine.

use chrono::NaiveDate;
use tracing::info;

use crate::api::dto::{CategoryRecord, NewExpenseRequest, UpdateExpenseRequest};
use crate::api::ingest::ingest_transaction;
use crate::api::{ingest_transactions, ApiClient, IngestMode};
use crate::error::{FinanceError, FinanceResult};
use crate::models::{Category, Money, ReportPeriod, Transaction};

/// Options for filtering listed expenses
#[derive(Debug, Clone, Default)]
pub struct ExpenseFilter {
    pub period: Option<ReportPeriod>,
    pub category: Option<Category>,
    /// Keep at most this many, newest first
    pub limit: Option<usize>,
    /// Include income records as well
    pub include_income: bool,
}

impl ExpenseFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn period(mut self, period: ReportPeriod) -> Self {
        self.period = Some(period);
        self
    }

    pub fn category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn include_income(mut self, include: bool) -> Self {
        self.include_income = include;
        self
    }

    /// Apply the filter, returning matches newest first
    pub fn apply(&self, transactions: Vec<Transaction>) -> Vec<Transaction> {
        let mut matched: Vec<Transaction> = transactions
            .into_iter()
            .filter(|t| self.include_income || t.is_expense())
            .filter(|t| self.period.as_ref().map_or(true, |p| p.contains(t.date)))
            .filter(|t| self.category.as_ref().map_or(true, |c| &t.category == c))
            .collect();

        matched.sort_by(|a, b| b.date.cmp(&a.date));
        if let Some(limit) = self.limit {
            matched.truncate(limit);
        }
        matched
    }
}

/// Input for recording a new expense
#[derive(Debug, Clone)]
pub struct CreateExpenseInput {
    pub amount: Money,
    pub description: String,
    pub category: Category,
    pub date: NaiveDate,
}

impl CreateExpenseInput {
    /// Reject input the store would refuse anyway
    pub fn validate(&self) -> FinanceResult<()> {
        if !self.amount.is_positive() {
            return Err(FinanceError::Validation(format!(
                "Amount must be greater than 0 (got {})",
                self.amount
            )));
        }
        if self.amount > Money::MAX_AMOUNT {
            return Err(FinanceError::Validation(format!(
                "Amount must not exceed {} (got {})",
                Money::MAX_AMOUNT,
                self.amount
            )));
        }
        if self.description.trim().is_empty() {
            return Err(FinanceError::Validation("Description is required".into()));
        }
        Ok(())
    }

    fn to_request(&self, user_id: &str) -> NewExpenseRequest {
        NewExpenseRequest {
            user_id: user_id.to_string(),
            amount: self.amount.to_major(),
            description: self.description.trim().to_string(),
            category: self.category.name().to_string(),
            date: self.date.format("%Y-%m-%d").to_string(),
            currency: "EUR".to_string(),
        }
    }
}

/// Fields to change on an existing expense; `None` keeps the stored value
#[derive(Debug, Clone, Default)]
pub struct UpdateExpenseInput {
    pub amount: Option<Money>,
    pub description: Option<String>,
    pub category: Option<Category>,
    pub date: Option<NaiveDate>,
}

impl UpdateExpenseInput {
    pub fn is_empty(&self) -> bool {
        self.amount.is_none()
            && self.description.is_none()
            && self.category.is_none()
            && self.date.is_none()
    }

    /// The full record after applying these changes to `current`
    fn apply_to(self, current: &Transaction) -> CreateExpenseInput {
        CreateExpenseInput {
            amount: self.amount.unwrap_or(current.amount),
            description: self
                .description
                .unwrap_or_else(|| current.description.clone()),
            category: self.category.unwrap_or_else(|| current.category.clone()),
            date: self.date.unwrap_or(current.date),
        }
    }
}

/// Service for expense management
pub struct ExpenseService<'a> {
    client: &'a ApiClient,
}

impl<'a> ExpenseService<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// List transactions matching `filter`
    pub async fn list(
        &self,
        filter: &ExpenseFilter,
        mode: IngestMode,
    ) -> FinanceResult<Vec<Transaction>> {
        let records = self.client.list_transactions().await?;
        let transactions = ingest_transactions(records, mode)?;
        Ok(filter.apply(transactions))
    }

    /// Record a new expense and return it as the store saved it
    pub async fn create(&self, input: CreateExpenseInput) -> FinanceResult<Transaction> {
        input.validate()?;
        let request = input.to_request(self.client.session().user_id());
        let record = self.client.create_expense(&request).await?;
        let created = ingest_transaction(record, 0)?;
        info!(id = %created.id, amount = %created.amount, category = %created.category, "expense created");
        Ok(created)
    }

    /// Edit an expense, sending the whole updated record back to the store
    ///
    /// The stored record is fetched first because the store replaces it
    /// wholesale. The merged record is validated like a new one.
    pub async fn update(&self, id: &str, changes: UpdateExpenseInput) -> FinanceResult<Transaction> {
        let id = id.trim();
        if id.is_empty() {
            return Err(FinanceError::Validation("Expense id is required".into()));
        }
        if changes.is_empty() {
            return Err(FinanceError::Validation(
                "Nothing to change. Pass --amount, --description, --category or --date".into(),
            ));
        }

        let record = self
            .client
            .list_transactions()
            .await?
            .into_iter()
            .find(|r| r.id.as_ref().is_some_and(|rid| rid.0 == id))
            .ok_or_else(|| FinanceError::expense_not_found(id))?;
        let current = ingest_transaction(record, 0)?;
        if !current.is_expense() {
            return Err(FinanceError::Validation(format!(
                "Transaction '{}' is income; only expenses can be edited",
                id
            )));
        }

        let merged = changes.apply_to(&current);
        merged.validate()?;
        let request = UpdateExpenseRequest {
            id: id.to_string(),
            expense: merged.to_request(self.client.session().user_id()),
        };
        let record = self.client.update_expense(&request).await?;
        let updated = ingest_transaction(record, 0)?;
        info!(id, amount = %updated.amount, category = %updated.category, "expense updated");
        Ok(updated)
    }

    /// Delete an expense by id
    pub async fn delete(&self, id: &str) -> FinanceResult<()> {
        let id = id.trim();
        if id.is_empty() {
            return Err(FinanceError::Validation("Expense id is required".into()));
        }
        self.client.delete_expense(id).await?;
        info!(id, "expense deleted");
        Ok(())
    }

    /// Categories the store knows for this user, resolved to [`Category`]
    pub async fn categories(&self) -> FinanceResult<Vec<Category>> {
        let records: Vec<CategoryRecord> = self.client.list_categories().await?;
        let mut categories: Vec<Category> = Vec::new();
        for record in records {
            let category = Category::parse(&record.name).map_err(|e| {
                FinanceError::Validation(format!("Category '{}': {}", record.name, e))
            })?;
            if !categories.contains(&category) {
                categories.push(category);
            }
        }
        Ok(categories)
    }
}
