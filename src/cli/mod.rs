//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod ask;
pub mod config;
pub mod expense;
pub mod export;
pub mod report;
pub mod suggest;

use std::time::Duration;

use crate::api::{ApiClient, IngestMode};
use crate::config::{FintrackPaths, Settings, SuggestionSource};
use crate::error::{FinanceError, FinanceResult};
use crate::models::ReportPeriod;
use crate::services::{
    CategorySuggester, ChatResponder, KeywordSuggester, LocalChat, RemoteChat, RemoteSuggester,
};
use crate::session::{SecretString, Session};

pub use ask::handle_ask_command;
pub use config::{handle_config_command, ConfigCommands};
pub use expense::{handle_expense_command, ExpenseCommands};
pub use export::{handle_export_command, ExportFormat};
pub use report::{handle_budgets_command, handle_summary_command};
pub use suggest::handle_suggest_command;

/// Everything a handler needs besides its own arguments
///
/// Connection flags are kept raw so commands that never touch the store
/// (`config`, offline suggestions) work without a user configured.
#[derive(Debug, Clone)]
pub struct CliContext {
    pub paths: FintrackPaths,
    pub settings: Settings,
    pub api_url: Option<String>,
    pub user: Option<String>,
    pub token: Option<SecretString>,
}

impl CliContext {
    /// Resolve the session: flags and env first, then settings
    pub fn session(&self) -> FinanceResult<Session> {
        Session::from_settings(
            &self.settings,
            self.api_url.clone(),
            self.user.clone(),
            self.token.clone(),
        )
    }

    /// HTTP client for the configured store
    pub fn client(&self) -> FinanceResult<ApiClient> {
        ApiClient::new(
            self.session()?,
            Duration::from_secs(self.settings.request_timeout_secs),
        )
    }

    /// Pick the suggestion source; `offline` always means keyword rules
    pub fn suggester(&self, offline: bool) -> FinanceResult<Box<dyn CategorySuggester>> {
        if offline || self.settings.suggestion_source == SuggestionSource::Keywords {
            return Ok(Box::new(KeywordSuggester::new()));
        }
        Ok(Box::new(RemoteSuggester::new(self.client()?)))
    }

    /// Pick who answers questions; `local` means rules over the fetched listing
    pub fn responder(&self, local: bool, mode: IngestMode) -> FinanceResult<Box<dyn ChatResponder>> {
        let client = self.client()?;
        if local {
            return Ok(Box::new(LocalChat::new(client, mode, self.currency())));
        }
        Ok(Box::new(RemoteChat::new(client)))
    }

    pub fn currency(&self) -> &str {
        &self.settings.currency_symbol
    }
}

/// Parse a `--period` value, defaulting to the current month
pub fn parse_period(value: Option<&str>) -> FinanceResult<ReportPeriod> {
    match value {
        Some(s) => ReportPeriod::parse(s).map_err(|e| {
            FinanceError::Validation(format!(
                "{}. Use YYYY-MM, YYYY-Www, YYYY, START..END, current or last",
                e
            ))
        }),
        None => Ok(ReportPeriod::current_month()),
    }
}

/// Map the `--skip-invalid` flag to an ingestion mode
pub fn ingest_mode(skip_invalid: bool) -> IngestMode {
    if skip_invalid {
        IngestMode::SkipInvalid
    } else {
        IngestMode::Strict
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn context(settings: Settings) -> (TempDir, CliContext) {
        let temp_dir = TempDir::new().unwrap();
        let ctx = CliContext {
            paths: FintrackPaths::with_base_dir(temp_dir.path().to_path_buf()),
            settings,
            api_url: None,
            user: None,
            token: None,
        };
        (temp_dir, ctx)
    }

    #[test]
    fn test_parse_period() {
        assert_eq!(
            parse_period(Some("2024-03")).unwrap(),
            ReportPeriod::monthly(2024, 3)
        );
        assert_eq!(parse_period(None).unwrap(), ReportPeriod::current_month());
        let err = parse_period(Some("2024-13")).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_session_requires_user() {
        let (_dir, ctx) = context(Settings::default());
        assert!(ctx.session().is_err());

        let ctx = CliContext {
            user: Some("u1".into()),
            ..ctx
        };
        assert_eq!(ctx.session().unwrap().user_id(), "u1");
    }

    #[test]
    fn test_offline_suggester_needs_no_session() {
        let (_dir, ctx) = context(Settings::default());
        assert_eq!(ctx.suggester(true).unwrap().name(), "keywords");
        assert!(ctx.suggester(false).is_err());

        let settings = Settings {
            suggestion_source: SuggestionSource::Keywords,
            ..Settings::default()
        };
        let (_dir, ctx) = context(settings);
        assert_eq!(ctx.suggester(false).unwrap().name(), "keywords");
    }

    #[test]
    fn test_responder_choice() {
        let (_dir, ctx) = context(Settings::default());
        assert!(ctx.responder(true, IngestMode::Strict).is_err());

        let ctx = CliContext {
            user: Some("u1".into()),
            ..ctx
        };
        assert_eq!(ctx.responder(true, IngestMode::Strict).unwrap().name(), "local");
        assert_eq!(ctx.responder(false, IngestMode::Strict).unwrap().name(), "remote");
    }

    #[test]
    fn test_token_is_redacted_in_debug() {
        let (_dir, ctx) = context(Settings::default());
        let ctx = CliContext {
            token: Some(SecretString::from("hunter2")),
            ..ctx
        };
        let debug = format!("{:?}", ctx);
        assert!(!debug.contains("hunter2"));
        assert!(ctx.session().is_err());

        let ctx = CliContext {
            user: Some("u1".into()),
            ..ctx
        };
        assert_eq!(ctx.session().unwrap().token().unwrap().expose(), "hunter2");
    }

    #[test]
    fn test_ingest_mode() {
        assert_eq!(ingest_mode(false), IngestMode::Strict);
        assert_eq!(ingest_mode(true), IngestMode::SkipInvalid);
    }
}
