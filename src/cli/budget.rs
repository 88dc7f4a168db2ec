//! Budget CLI commands

use clap::Subcommand;

use super::parse_amount;
use crate::config::settings::Settings;
use crate::display::{format_budget_list, format_budget_progress};
use crate::error::LedgerResult;
use crate::services::{BudgetService, PeriodService};
use crate::storage::Storage;

/// Budget subcommands
#[derive(Subcommand)]
pub enum BudgetCommands {
    /// Set the monthly limit of a category (creates it if needed)
    Set {
        /// Category name
        category: String,
        /// Monthly limit
        limit: String,
    },
    /// Remove a category from the budget
    Remove {
        /// Category name
        category: String,
    },
    /// List budget categories and limits
    List,
    /// Show spending progress against each limit
    Progress {
        /// Period (e.g., "2025-01", "last", "March"), defaults to this month
        #[arg(short, long)]
        period: Option<String>,
    },
}

/// Handle a budget command
pub fn handle_budget_command(
    storage: &Storage,
    settings: &Settings,
    cmd: BudgetCommands,
) -> LedgerResult<()> {
    let service = BudgetService::new(storage);

    match cmd {
        BudgetCommands::Set { category, limit } => {
            let category = service.set_limit(&category, parse_amount(&limit)?)?;
            println!(
                "Set {} limit to {}",
                category.name,
                settings.money(category.monthly_limit)
            );
        }
        BudgetCommands::Remove { category } => {
            let removed = service.remove(&category)?;
            println!("Removed budget category '{}'", removed.name);
        }
        BudgetCommands::List => {
            println!("{}", format_budget_list(&service.list()?, settings));
        }
        BudgetCommands::Progress { period } => {
            let period = PeriodService::new().parse_or_current(period.as_deref())?;
            let progress = service.progress(&period)?;
            print!("{}", format_budget_progress(&progress, settings));
        }
    }

    Ok(())
}
