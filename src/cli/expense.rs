//! Expense CLI commands
//!
//! Implements CLI commands for listing, recording, editing and deleting
//! expenses.

use chrono::NaiveDate;
use clap::Subcommand;

use super::{ingest_mode, parse_period, CliContext};
use crate::display::{
    format_category_list, format_suggestion, format_transaction_details,
    format_transaction_register,
};
use crate::error::{FinanceError, FinanceResult};
use crate::models::{Category, Money, SuggestionOutcome};
use crate::services::{
    suggest_category, CreateExpenseInput, ExpenseFilter, ExpenseService, UpdateExpenseInput,
};

/// Expense subcommands
#[derive(Subcommand, Debug)]
pub enum ExpenseCommands {
    /// List expenses, newest first
    List {
        /// Period to show (e.g., "2024-03", "last"); all when omitted
        #[arg(short, long)]
        period: Option<String>,
        /// Filter by category name
        #[arg(short, long)]
        category: Option<String>,
        /// Number of expenses to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
        /// Include income records
        #[arg(long)]
        income: bool,
        /// Skip malformed records instead of failing
        #[arg(long)]
        skip_invalid: bool,
    },
    /// Record a new expense
    Add {
        /// Amount (e.g., "12.50")
        amount: String,
        /// What the money was spent on
        description: String,
        /// Category name; suggested from the description when omitted
        #[arg(short, long)]
        category: Option<String>,
        /// Expense date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
        /// Use local keyword rules instead of the store's categoriser
        #[arg(long)]
        offline: bool,
    },
    /// Edit an expense; fields not given keep their stored value
    Edit {
        /// Expense ID
        id: String,
        /// New amount (e.g., "12.50")
        #[arg(short, long)]
        amount: Option<String>,
        /// New description
        #[arg(long)]
        description: Option<String>,
        /// New category name
        #[arg(short, long)]
        category: Option<String>,
        /// New date (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,
    },
    /// Delete an expense
    Delete {
        /// Expense ID
        id: String,
    },
    /// List the categories the store knows
    Categories,
}

/// Handle an expense command
pub async fn handle_expense_command(ctx: &CliContext, cmd: ExpenseCommands) -> FinanceResult<()> {
    match cmd {
        ExpenseCommands::List {
            period,
            category,
            limit,
            income,
            skip_invalid,
        } => {
            let mut filter = ExpenseFilter::new().limit(limit).include_income(income);
            if let Some(p) = period {
                filter = filter.period(parse_period(Some(&p))?);
            }
            if let Some(name) = category {
                filter = filter.category(parse_category(&name)?);
            }

            let client = ctx.client()?;
            let expenses = ExpenseService::new(&client)
                .list(&filter, ingest_mode(skip_invalid))
                .await?;
            print!("{}", format_transaction_register(&expenses, ctx.currency()));
        }

        ExpenseCommands::Add {
            amount,
            description,
            category,
            date,
            offline,
        } => {
            let amount = parse_amount(&amount)?;
            let date = parse_date(date.as_deref())?;

            let category = match category {
                Some(name) => parse_category(&name)?,
                None => {
                    let suggester = ctx.suggester(offline)?;
                    let outcome = suggest_category(suggester.as_ref(), &description, Some(amount)).await;
                    print!("{}", format_suggestion(&description, &outcome));
                    accept_suggestion(&outcome)?
                }
            };

            let input = CreateExpenseInput {
                amount,
                description,
                category,
                date,
            };
            input.validate()?;

            let client = ctx.client()?;
            let txn = ExpenseService::new(&client).create(input).await?;

            println!("Created expense:");
            print!("{}", format_transaction_details(&txn, ctx.currency()));
        }

        ExpenseCommands::Edit {
            id,
            amount,
            description,
            category,
            date,
        } => {
            let changes = UpdateExpenseInput {
                amount: amount.as_deref().map(parse_amount).transpose()?,
                description,
                category: category.as_deref().map(parse_category).transpose()?,
                date: match date {
                    Some(d) => Some(parse_date(Some(&d))?),
                    None => None,
                },
            };

            let client = ctx.client()?;
            let txn = ExpenseService::new(&client).update(&id, changes).await?;

            println!("Updated expense:");
            print!("{}", format_transaction_details(&txn, ctx.currency()));
        }

        ExpenseCommands::Delete { id } => {
            let client = ctx.client()?;
            ExpenseService::new(&client).delete(&id).await?;
            println!("Deleted expense {}", id.trim());
        }

        ExpenseCommands::Categories => {
            let client = ctx.client()?;
            let categories = ExpenseService::new(&client).categories().await?;
            print!("{}", format_category_list(&categories));
        }
    }

    Ok(())
}

fn parse_amount(value: &str) -> FinanceResult<Money> {
    Money::parse(value).map_err(|e| {
        FinanceError::Validation(format!(
            "Invalid amount format: '{}'. Use format like '12.50'. Error: {}",
            value, e
        ))
    })
}

fn parse_category(name: &str) -> FinanceResult<Category> {
    Category::parse(name)
        .map_err(|e| FinanceError::Validation(format!("Invalid category '{}': {}", name, e)))
}

fn parse_date(value: Option<&str>) -> FinanceResult<NaiveDate> {
    match value {
        Some(s) => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| {
            FinanceError::Validation(format!("Invalid date format: '{}'. Use YYYY-MM-DD", s))
        }),
        None => Ok(chrono::Local::now().date_naive()),
    }
}

/// Only a confident suggestion may be saved without the user naming a category
fn accept_suggestion(outcome: &SuggestionOutcome) -> FinanceResult<Category> {
    match outcome {
        SuggestionOutcome::Suggested(reviewed) if reviewed.is_authoritative() => {
            Ok(reviewed.category().clone())
        }
        SuggestionOutcome::Suggested(reviewed) => Err(FinanceError::Validation(format!(
            "Suggested category '{}' is low confidence ({:.0}%). Re-run with --category to confirm it or pick another",
            reviewed.category(),
            reviewed.confidence() * 100.0
        ))),
        SuggestionOutcome::Unavailable { reason } => Err(FinanceError::Validation(format!(
            "No category suggestion available ({}). Re-run with --category",
            reason
        ))),
    }
}
