//! CLI command for spending questions

use super::{ingest_mode, CliContext};
use crate::display::format_chat;
use crate::error::FinanceResult;
use crate::services::ask;

/// Handle `ask`
///
/// Like suggestions, an unanswered question is reported, not treated as a
/// failure.
pub async fn handle_ask_command(
    ctx: &CliContext,
    query: Vec<String>,
    local: bool,
    skip_invalid: bool,
) -> FinanceResult<()> {
    let query = query.join(" ");
    let responder = ctx.responder(local, ingest_mode(skip_invalid))?;
    let outcome = ask(responder.as_ref(), &query).await;
    print!("{}", format_chat(query.trim(), &outcome, ctx.currency()));
    Ok(())
}
