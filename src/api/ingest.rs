//! Ingestion boundary: wire records to validated models
//!
//! Anything structurally wrong with a record (a missing amount, an
//! unparseable date, a negative amount, an unknown kind) is rejected here as
//! a validation error naming the record and field. Nothing is coerced.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use tracing::warn;

use super::dto::{BudgetRecord, TransactionRecord, WireId};
use crate::error::{FinanceError, FinanceResult};
use crate::models::{
    Budget, BudgetCadence, BudgetId, Category, Money, Transaction, TransactionId, TransactionKind,
};

/// What to do with a listing that contains invalid records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IngestMode {
    /// Reject the whole listing on the first invalid record
    #[default]
    Strict,
    /// Keep the valid records and log each rejected one
    SkipInvalid,
}

/// Label used in error messages: the record id, or its position
fn record_label(id: Option<&WireId>, index: usize) -> String {
    match id {
        Some(id) => id.to_string(),
        None => format!("#{}", index + 1),
    }
}

/// Parse a store date: `YYYY-MM-DD`, RFC 3339, a naive ISO datetime, or
/// the RFC 2822 form some backends emit (`Tue, 05 Mar 2024 00:00:00 GMT`)
pub fn parse_wire_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.date());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.date_naive());
    }
    None
}

fn require<T>(
    value: Option<T>,
    record: &'static str,
    label: &str,
    field: &'static str,
) -> FinanceResult<T> {
    value.ok_or_else(|| FinanceError::invalid_field(record, label, field, "is missing"))
}

fn parse_amount(
    value: f64,
    record: &'static str,
    label: &str,
    field: &'static str,
) -> FinanceResult<Money> {
    let amount = Money::from_major(value).ok_or_else(|| {
        FinanceError::invalid_field(record, label, field, format!("is not a number ({})", value))
    })?;
    if amount.is_negative() {
        return Err(FinanceError::invalid_field(
            record,
            label,
            field,
            format!("must not be negative (got {})", amount),
        ));
    }
    if amount > Money::MAX_AMOUNT {
        return Err(FinanceError::invalid_field(
            record,
            label,
            field,
            format!("exceeds the maximum of {} (got {})", Money::MAX_AMOUNT, amount),
        ));
    }
    Ok(amount)
}

fn parse_date(
    value: &str,
    record: &'static str,
    label: &str,
    field: &'static str,
) -> FinanceResult<NaiveDate> {
    parse_wire_date(value).ok_or_else(|| {
        FinanceError::invalid_field(record, label, field, format!("is not a date ('{}')", value))
    })
}

fn parse_category(value: &str, record: &'static str, label: &str) -> FinanceResult<Category> {
    Category::parse(value)
        .map_err(|e| FinanceError::invalid_field(record, label, "category", e.to_string()))
}

/// Convert one listed transaction; `index` is only used when it has no id
pub fn ingest_transaction(record: TransactionRecord, index: usize) -> FinanceResult<Transaction> {
    const RECORD: &str = "Transaction";
    let label = record_label(record.id.as_ref(), index);

    let amount = require(record.amount, RECORD, &label, "amount")?;
    let amount = parse_amount(amount, RECORD, &label, "amount")?;

    let date = require(record.date.as_deref(), RECORD, &label, "date")?;
    let date = parse_date(date, RECORD, &label, "date")?;

    let id = record
        .id
        .as_ref()
        .and_then(|id| TransactionId::parse(&id.0));
    let id = require(id, RECORD, &label, "id")?;

    let category = require(record.category.as_deref(), RECORD, &label, "category")?;
    let category = parse_category(category, RECORD, &label)?;

    let kind = match record.kind.as_deref() {
        None => TransactionKind::Expense,
        Some(kind) => TransactionKind::parse(kind).ok_or_else(|| {
            FinanceError::invalid_field(RECORD, &label, "kind", format!("is unknown ('{}')", kind))
        })?,
    };

    let description = record.description.unwrap_or_default();

    Transaction::new(id, amount, description, category, date, kind)
        .map_err(|e| FinanceError::Validation(format!("{} '{}': {}", RECORD, label, e)))
}

/// Convert one listed budget
///
/// A missing period defaults to monthly; a missing window is an error.
pub fn ingest_budget(record: BudgetRecord, index: usize) -> FinanceResult<Budget> {
    const RECORD: &str = "Budget";
    let label = record_label(record.id.as_ref(), index);

    let limit = require(record.limit, RECORD, &label, "limit")?;
    let limit = parse_amount(limit, RECORD, &label, "limit")?;

    let id = record.id.as_ref().and_then(|id| BudgetId::parse(&id.0));
    let id = require(id, RECORD, &label, "id")?;

    let category = require(record.category.as_deref(), RECORD, &label, "category")?;
    let category = parse_category(category, RECORD, &label)?;

    let period = match record.period.as_deref() {
        None => BudgetCadence::Monthly,
        Some(p) => BudgetCadence::parse(p).ok_or_else(|| {
            FinanceError::invalid_field(RECORD, &label, "period", format!("is unknown ('{}')", p))
        })?,
    };

    let start = require(record.start_date.as_deref(), RECORD, &label, "start_date")?;
    let start = parse_date(start, RECORD, &label, "start_date")?;
    let end = require(record.end_date.as_deref(), RECORD, &label, "end_date")?;
    let end = parse_date(end, RECORD, &label, "end_date")?;

    Budget::new(id, category, limit, period, start, end)
        .map_err(|e| FinanceError::Validation(format!("{} '{}': {}", RECORD, label, e)))
}

fn ingest_all<R, T>(
    records: Vec<R>,
    mode: IngestMode,
    kind: &'static str,
    convert: impl Fn(R, usize) -> FinanceResult<T>,
) -> FinanceResult<Vec<T>> {
    let total = records.len();
    let mut accepted = Vec::with_capacity(total);
    for (index, record) in records.into_iter().enumerate() {
        match convert(record, index) {
            Ok(item) => accepted.push(item),
            Err(e) => match mode {
                IngestMode::Strict => return Err(e),
                IngestMode::SkipInvalid => warn!(record = kind, error = %e, "skipping invalid record"),
            },
        }
    }
    if accepted.len() < total {
        warn!(
            record = kind,
            skipped = total - accepted.len(),
            kept = accepted.len(),
            "ingested listing with rejected records"
        );
    }
    Ok(accepted)
}

/// Convert a transaction listing
pub fn ingest_transactions(
    records: Vec<TransactionRecord>,
    mode: IngestMode,
) -> FinanceResult<Vec<Transaction>> {
    ingest_all(records, mode, "transaction", ingest_transaction)
}

/// Convert a budget listing
pub fn ingest_budgets(records: Vec<BudgetRecord>, mode: IngestMode) -> FinanceResult<Vec<Budget>> {
    ingest_all(records, mode, "budget", ingest_budget)
}
