//! YAML Export functionality
//!
//! Same content as the JSON export, in a form that is easier to read.

use std::io::Write;

use crate::error::FinanceResult;
use crate::export::json::FullExport;
use crate::models::ReportPeriod;
use crate::services::Snapshot;

/// Export to YAML with a short header comment
pub fn export_full_yaml<W: Write>(
    snapshot: &Snapshot,
    period: Option<&ReportPeriod>,
    writer: &mut W,
) -> FinanceResult<()> {
    let export = FullExport::from_snapshot(snapshot, period);

    writeln!(writer, "# fintrack export")?;
    writeln!(writer, "# Generated: {}", export.exported_at)?;
    writeln!(writer, "# Snapshot fetched: {}", export.fetched_at)?;
    if let Some(period) = &export.period {
        writeln!(writer, "# Period: {}", period)?;
    }
    writeln!(writer)?;

    serde_yaml::to_writer(writer, &export)?;
    Ok(())
}
