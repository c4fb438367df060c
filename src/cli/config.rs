//! CLI commands for configuration

use clap::Subcommand;

use super::CliContext;
use crate::error::FinanceResult;

/// Config subcommands; `config` alone shows the current configuration
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show paths and effective settings
    Show,
    /// Write a settings file with default values
    Init {
        /// Overwrite an existing settings file
        #[arg(long)]
        force: bool,
    },
    /// Change one setting (e.g., `config set user_id alice`)
    Set {
        /// Setting key as it appears in config.json
        key: String,
        /// New value
        value: String,
    },
}

/// Handle a config command
pub fn handle_config_command(ctx: &CliContext, cmd: Option<ConfigCommands>) -> FinanceResult<()> {
    match cmd.unwrap_or(ConfigCommands::Show) {
        ConfigCommands::Show => show_config(ctx),
        ConfigCommands::Init { force } => {
            if ctx.paths.is_initialized() && !force {
                println!(
                    "Settings already exist at {} (use --force to overwrite)",
                    ctx.paths.settings_file().display()
                );
                return Ok(());
            }
            ctx.settings.save(&ctx.paths)?;
            println!("Settings written to {}", ctx.paths.settings_file().display());
            Ok(())
        }
        ConfigCommands::Set { key, value } => {
            let mut settings = ctx.settings.clone();
            settings.set(&key, &value)?;
            settings.save(&ctx.paths)?;
            println!("Set {} in {}", key, ctx.paths.settings_file().display());
            Ok(())
        }
    }
}

fn show_config(ctx: &CliContext) -> FinanceResult<()> {
    let settings = &ctx.settings;
    let api_url = ctx.api_url.as_deref().unwrap_or(&settings.api_base_url);
    let user = ctx
        .user
        .as_deref()
        .or(settings.user_id.as_deref())
        .unwrap_or("(not set)");
    let token = match &ctx.token {
        Some(t) if !t.is_empty() => "(set)",
        _ => "(not set)",
    };

    println!("fintrack Configuration");
    println!("======================");
    println!("Config directory: {}", ctx.paths.base_dir().display());
    println!("Settings file:    {}", ctx.paths.settings_file().display());
    if !ctx.paths.is_initialized() {
        println!("                  (not written yet; run 'fintrack config init')");
    }
    println!();
    println!("Settings:");
    println!("  API URL:            {}", api_url);
    println!("  User:               {}", user);
    println!("  Token:              {}", token);
    println!("  Request timeout:    {}s", settings.request_timeout_secs);
    println!(
        "  Suggestion source:  {}",
        match settings.suggestion_source {
            crate::config::SuggestionSource::Remote => "remote",
            crate::config::SuggestionSource::Keywords => "keywords",
        }
    );
    println!("  Currency symbol:    {}", settings.currency_symbol);
    println!("  Date format:        {}", settings.date_format);
    println!("  Log level:          {}", settings.log_level);

    Ok(())
}
