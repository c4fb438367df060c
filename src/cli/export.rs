//! CLI command for data export
//!
//! Fetches one snapshot and writes it to a file, or to stdout when no
//! output path is given.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use clap::ValueEnum;

use super::{ingest_mode, parse_period, CliContext};
use crate::error::{FinanceError, FinanceResult};
use crate::export::{csv, json, yaml};
use crate::services::SnapshotService;

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// CSV format (transactions, or budgets with --budgets)
    Csv,
    /// JSON format (snapshot plus reports)
    Json,
    /// YAML format (snapshot plus reports, human-readable)
    Yaml,
}

/// Handle `export`
pub async fn handle_export_command(
    ctx: &CliContext,
    format: ExportFormat,
    output: Option<PathBuf>,
    period: Option<String>,
    budgets: bool,
    skip_invalid: bool,
) -> FinanceResult<()> {
    let period = match period {
        Some(p) => Some(parse_period(Some(&p))?),
        None => None,
    };

    let client = ctx.client()?;
    let snapshot = SnapshotService::new(&client)
        .fetch(ingest_mode(skip_invalid))
        .await?;

    let mut writer: Box<dyn Write> = match &output {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                FinanceError::Export(format!("Failed to create file {}: {}", path.display(), e))
            })?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(std::io::stdout().lock()),
    };

    match format {
        ExportFormat::Csv if budgets => {
            let selected = match &period {
                Some(p) => snapshot.budgets_overlapping(p),
                None => snapshot.budgets.clone(),
            };
            csv::export_budgets_csv(&selected, &mut writer)?;
        }
        ExportFormat::Csv => {
            let selected = match &period {
                Some(p) => snapshot.transactions_in(p),
                None => snapshot.transactions.clone(),
            };
            csv::export_transactions_csv(&selected, &mut writer)?;
        }
        ExportFormat::Json => json::export_full_json(&snapshot, period.as_ref(), &mut writer)?,
        ExportFormat::Yaml => yaml::export_full_yaml(&snapshot, period.as_ref(), &mut writer)?,
    }
    writer.flush()?;
    drop(writer);

    if let Some(path) = output {
        eprintln!("Exported to: {}", path.display());
    }

    Ok(())
}
