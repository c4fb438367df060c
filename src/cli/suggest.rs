//! CLI command for category suggestions

use super::CliContext;
use crate::display::format_suggestion;
use crate::error::{FinanceError, FinanceResult};
use crate::models::Money;
use crate::services::suggest_category;

/// Handle `suggest`
///
/// An unavailable suggestion is reported, not treated as a failure.
pub async fn handle_suggest_command(
    ctx: &CliContext,
    description: String,
    amount: Option<String>,
    offline: bool,
) -> FinanceResult<()> {
    let amount = match amount {
        Some(a) => Some(Money::parse(&a).map_err(|e| {
            FinanceError::Validation(format!("Invalid amount format: '{}'. Error: {}", a, e))
        })?),
        None => None,
    };

    let suggester = ctx.suggester(offline)?;
    let outcome = suggest_category(suggester.as_ref(), &description, amount).await;
    print!("{}", format_suggestion(description.trim(), &outcome));

    Ok(())
}
