//! CLI commands for reports
//!
//! `summary` renders the dashboard for one period, `budgets` the budget
//! overview. Both fetch one snapshot and compute from it.

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use super::{ingest_mode, parse_period, CliContext};
use crate::error::{FinanceError, FinanceResult};
use crate::reports::{BudgetOverviewReport, DashboardReport};
use crate::services::SnapshotService;

fn create_output(path: &PathBuf) -> FinanceResult<BufWriter<File>> {
    let file = File::create(path).map_err(|e| {
        FinanceError::Export(format!("Failed to create file {}: {}", path.display(), e))
    })?;
    Ok(BufWriter::new(file))
}

/// Handle `summary`
pub async fn handle_summary_command(
    ctx: &CliContext,
    period: Option<String>,
    skip_invalid: bool,
    output: Option<PathBuf>,
) -> FinanceResult<()> {
    let period = parse_period(period.as_deref())?;
    let client = ctx.client()?;
    let snapshot = SnapshotService::new(&client)
        .fetch(ingest_mode(skip_invalid))
        .await?;

    let report = DashboardReport::generate(&snapshot, &period);

    if let Some(path) = output {
        let mut writer = create_output(&path)?;
        report.export_csv(&mut writer)?;
        println!("Dashboard exported to: {}", path.display());
    } else {
        println!("{}", report.format_terminal(ctx.currency()));
    }

    Ok(())
}

/// Handle `budgets`
///
/// Without `--period` every budget in the snapshot is shown.
pub async fn handle_budgets_command(
    ctx: &CliContext,
    period: Option<String>,
    skip_invalid: bool,
    output: Option<PathBuf>,
) -> FinanceResult<()> {
    let period = match period {
        Some(p) => Some(parse_period(Some(&p))?),
        None => None,
    };
    let client = ctx.client()?;
    let snapshot = SnapshotService::new(&client)
        .fetch(ingest_mode(skip_invalid))
        .await?;

    let report = match &period {
        Some(period) => BudgetOverviewReport::generate_for(&snapshot, period),
        None => BudgetOverviewReport::generate(&snapshot),
    };

    if let Some(path) = output {
        let mut writer = create_output(&path)?;
        report.export_csv(&mut writer)?;
        println!("Budget report exported to: {}", path.display());
    } else {
        println!("{}", report.format_terminal());
    }

    Ok(())
}
