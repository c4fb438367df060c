use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use fintrack::cli::{
    handle_ask_command, handle_budgets_command, handle_config_command, handle_expense_command,
    handle_export_command, handle_suggest_command, handle_summary_command, CliContext,
    ConfigCommands, ExpenseCommands, ExportFormat,
};
use fintrack::config::{FintrackPaths, Settings};
use fintrack::session::SecretString;

#[derive(Parser)]
#[command(
    name = "fintrack",
    version,
    about = "Personal finance summaries from your expense store",
    long_about = "fintrack fetches your expenses and budgets from a REST expense store \
                  and summarizes them in the terminal: spending by category, budget \
                  status, month-over-month trends, category suggestions and answers \
                  to spending questions."
)]
struct Cli {
    /// Base URL of the expense store
    #[arg(long, global = true, env = "FINTRACK_API_URL")]
    api_url: Option<String>,

    /// User the store scopes data to
    #[arg(long, global = true, env = "FINTRACK_USER")]
    user: Option<String>,

    /// Bearer token for the store
    #[arg(long, global = true, env = "FINTRACK_TOKEN", hide_env_values = true)]
    token: Option<SecretString>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Dashboard for one period
    #[command(alias = "dashboard")]
    Summary {
        /// Period (e.g., "2024-03", "current", "last"); defaults to this month
        #[arg(short, long)]
        period: Option<String>,
        /// Skip malformed records instead of failing
        #[arg(long)]
        skip_invalid: bool,
        /// Export to CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Budget overview with spending and status
    Budgets {
        /// Restrict to one period; all budgets when omitted
        #[arg(short, long)]
        period: Option<String>,
        /// Skip malformed records instead of failing
        #[arg(long)]
        skip_invalid: bool,
        /// Export to CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Expense management commands
    #[command(subcommand, alias = "expense")]
    Expenses(ExpenseCommands),

    /// Suggest a category for an expense description
    Suggest {
        /// Expense description
        description: String,
        /// Expense amount (e.g., "12.50")
        #[arg(short, long)]
        amount: Option<String>,
        /// Use local keyword rules instead of the store's categoriser
        #[arg(long)]
        offline: bool,
    },

    /// Ask a question about your spending (e.g., "what is my total?")
    #[command(alias = "chat")]
    Ask {
        /// The question
        #[arg(required = true)]
        query: Vec<String>,
        /// Answer "total" and "category" questions locally from the listing
        #[arg(long)]
        local: bool,
        /// Skip malformed records instead of failing (with --local)
        #[arg(long)]
        skip_invalid: bool,
    },

    /// Export the snapshot (and its reports) as JSON, YAML or CSV
    Export {
        /// Export format
        #[arg(value_enum)]
        format: ExportFormat,
        /// Output file path; stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Restrict to one period
        #[arg(short, long)]
        period: Option<String>,
        /// CSV only: export budget definitions instead of transactions
        #[arg(long)]
        budgets: bool,
        /// Skip malformed records instead of failing
        #[arg(long)]
        skip_invalid: bool,
    },

    /// Show or change configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigCommands>,
    },
}

/// RUST_LOG wins, then -v, then the settings file
fn init_logging(verbose: u8, settings: &Settings) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = match verbose {
            0 => settings.log_level.as_str(),
            1 => "info",
            2 => "debug",
            _ => "trace",
        };
        EnvFilter::new(level)
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = FintrackPaths::new()?;
    let settings = Settings::load_or_default(&paths)?;
    init_logging(cli.verbose, &settings);

    let ctx = CliContext {
        paths,
        settings,
        api_url: cli.api_url,
        user: cli.user,
        token: cli.token,
    };

    match cli.command {
        Some(Commands::Summary {
            period,
            skip_invalid,
            output,
        }) => handle_summary_command(&ctx, period, skip_invalid, output).await?,
        Some(Commands::Budgets {
            period,
            skip_invalid,
            output,
        }) => handle_budgets_command(&ctx, period, skip_invalid, output).await?,
        Some(Commands::Expenses(cmd)) => handle_expense_command(&ctx, cmd).await?,
        Some(Commands::Suggest {
            description,
            amount,
            offline,
        }) => handle_suggest_command(&ctx, description, amount, offline).await?,
        Some(Commands::Ask {
            query,
            local,
            skip_invalid,
        }) => handle_ask_command(&ctx, query, local, skip_invalid).await?,
        Some(Commands::Export {
            format,
            output,
            period,
            budgets,
            skip_invalid,
        }) => handle_export_command(&ctx, format, output, period, budgets, skip_invalid).await?,
        Some(Commands::Config { action }) => handle_config_command(&ctx, action)?,
        None => {
            println!("fintrack - personal finance summaries");
            println!();
            println!("Run 'fintrack --help' for usage information.");
            println!("Run 'fintrack config' to see where settings are read from.");
        }
    }

    Ok(())
}
