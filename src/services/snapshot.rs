//! Consistent snapshots of the store
//!
//! Computation runs in two steps: fetch a complete [`Snapshot`] (async), then
//! hand it to the engine (sync). A snapshot is never updated in place.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};

use crate::api::{ingest_budgets, ingest_transactions, ApiClient, IngestMode};
use crate::error::FinanceResult;
use crate::models::{Budget, ReportPeriod, Transaction};

/// Transactions and budgets as they were at one moment
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub transactions: Vec<Transaction>,
    pub budgets: Vec<Budget>,
    pub fetched_at: DateTime<Utc>,
}

impl Snapshot {
    pub fn new(transactions: Vec<Transaction>, budgets: Vec<Budget>) -> Self {
        Self {
            transactions,
            budgets,
            fetched_at: Utc::now(),
        }
    }

    /// Transactions dated inside `period`
    pub fn transactions_in(&self, period: &ReportPeriod) -> Vec<Transaction> {
        crate::engine::filter_by_period(&self.transactions, period.start_date(), period.end_date())
    }

    /// Budgets whose window overlaps `period`
    pub fn budgets_overlapping(&self, period: &ReportPeriod) -> Vec<Budget> {
        self.budgets
            .iter()
            .filter(|b| b.start_date <= period.end_date() && b.end_date >= period.start_date())
            .cloned()
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty() && self.budgets.is_empty()
    }
}

/// Fetches snapshots through an [`ApiClient`]
pub struct SnapshotService<'a> {
    client: &'a ApiClient,
}

impl<'a> SnapshotService<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Fetch transactions and budgets concurrently
    ///
    /// Fails as a whole if either listing fails; no partial snapshot is
    /// ever returned.
    pub async fn fetch(&self, mode: IngestMode) -> FinanceResult<Snapshot> {
        debug!(user = self.client.session().user_id(), "fetching snapshot");
        let (transactions, budgets) = tokio::try_join!(
            self.client.list_transactions(),
            self.client.list_budgets()
        )?;

        let transactions = ingest_transactions(transactions, mode)?;
        let budgets = ingest_budgets(budgets, mode)?;
        info!(
            transactions = transactions.len(),
            budgets = budgets.len(),
            "snapshot ready"
        );
        Ok(Snapshot::new(transactions, budgets))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::client::stub;
    use crate::models::{BudgetCadence, Category, Money};
    use crate::session::Session;
    use chrono::NaiveDate;
    use std::time::Duration;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_budgets_overlapping() {
        let march = Budget::for_period(
            Category::Food,
            Money::from_units(100, 0),
            BudgetCadence::Monthly,
            date(2024, 3, 1),
        )
        .unwrap();
        let yearly = Budget::for_period(
            Category::Shopping,
            Money::from_units(1000, 0),
            BudgetCadence::Yearly,
            date(2024, 6, 1),
        )
        .unwrap();
        let snapshot = Snapshot::new(Vec::new(), vec![march, yearly]);

        assert_eq!(snapshot.budgets_overlapping(&ReportPeriod::monthly(2024, 3)).len(), 2);
        assert_eq!(snapshot.budgets_overlapping(&ReportPeriod::monthly(2024, 4)).len(), 1);
        assert!(snapshot.budgets_overlapping(&ReportPeriod::monthly(2025, 1)).is_empty());
    }

    #[tokio::test]
    async fn test_fetch_builds_snapshot() {
        let body = r#"[{"id":1,"amount":10,"description":"a","category":"Food","date":"2024-03-02"},
                       {"id":2,"amount":20,"description":"b","category":"Food","date":"2024-03-03"}]"#;
        let budgets = r#"[{"id":"b1","category":"Food","limit":100,"period":"monthly",
                          "start_date":"2024-03-01","end_date":"2024-03-31"}]"#;
        // both listings are requested concurrently; route by path
        let (base, _captured) = stub::serve_routes(vec![
            ("/api/expenses", 200, body),
            ("/api/budgets", 200, budgets),
        ])
        .await;

        let session = Session::new(base, "u1", None).unwrap();
        let client = ApiClient::new(session, Duration::from_secs(5)).unwrap();
        let snapshot = SnapshotService::new(&client)
            .fetch(IngestMode::Strict)
            .await
            .unwrap();

        assert_eq!(snapshot.transactions.len(), 2);
        assert_eq!(snapshot.budgets.len(), 1);
        assert_eq!(snapshot.budgets[0].limit, Money::from_units(100, 0));
    }
}
