//! Ledger CLI commands
//!
//! The same subcommands serve the income, expense and savings ledgers.

use clap::Subcommand;

use super::{parse_amount, parse_date_or_today};
use crate::config::settings::Settings;
use crate::display::{format_transaction_details, format_transaction_table};
use crate::error::{LedgerError, LedgerResult};
use crate::models::LedgerKind;
use crate::services::{PeriodService, RecordTransactionInput, TransactionFilter, TransactionService};
use crate::storage::Storage;

/// Subcommands shared by every ledger
#[derive(Subcommand)]
pub enum LedgerCommands {
    /// Record a new entry
    Add {
        /// Amount (e.g., "50000" or "12.50")
        amount: String,
        /// Category (expense category, income source or savings goal)
        #[arg(short, long)]
        category: String,
        /// Date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
        /// Account the money moved through
        #[arg(long)]
        account: Option<String>,
        /// Which partner it belongs to
        #[arg(long)]
        contributor: Option<String>,
        /// Memo
        #[arg(short, long)]
        memo: Option<String>,
    },
    /// List entries, newest first
    List {
        /// Period (e.g., "2025-01", "last", "March", "2025-01-01..2025-01-15")
        #[arg(short, long)]
        period: Option<String>,
        /// Only this category
        #[arg(short, long)]
        category: Option<String>,
        /// Number of entries to show
        #[arg(short = 'n', long, default_value = "20")]
        limit: usize,
    },
    /// Show entry details
    Show {
        /// Entry ID
        id: String,
    },
    /// Delete an entry
    Delete {
        /// Entry ID
        id: String,
    },
}

/// Handle a ledger command
pub fn handle_ledger_command(
    storage: &Storage,
    settings: &Settings,
    kind: LedgerKind,
    cmd: LedgerCommands,
) -> LedgerResult<()> {
    let service = TransactionService::new(storage);

    match cmd {
        LedgerCommands::Add {
            amount,
            category,
            date,
            account,
            contributor,
            memo,
        } => {
            let input = RecordTransactionInput {
                kind,
                date: parse_date_or_today(date.as_deref())?,
                category,
                amount: parse_amount(&amount)?,
                account,
                contributor,
                memo,
            };
            let txn = service.record(input)?;

            println!("Recorded {} entry:", kind);
            print!("{}", format_transaction_details(&txn, settings));
        }

        LedgerCommands::List {
            period,
            category,
            limit,
        } => {
            let mut filter = TransactionFilter::new().kind(kind).limit(limit);
            if let Some(period) = period {
                let periods = PeriodService::new();
                let period = periods.parse(&period)?;
                println!("{} entries for {}", kind, periods.format_friendly(&period));
                filter = filter.period(period);
            }
            if let Some(category) = category {
                filter = filter.category(category);
            }

            let transactions = service.list(&filter)?;
            println!("{}", format_transaction_table(&transactions, settings));
        }

        LedgerCommands::Show { id } => {
            let txn = service
                .find(&id)?
                .filter(|t| t.kind == kind)
                .ok_or_else(|| LedgerError::transaction_not_found(&id))?;
            print!("{}", format_transaction_details(&txn, settings));
        }

        LedgerCommands::Delete { id } => {
            match service.find(&id)? {
                Some(txn) if txn.kind == kind => {}
                _ => return Err(LedgerError::transaction_not_found(&id)),
            }
            let txn = service.delete(&id)?;
            println!(
                "Deleted {} {} {}",
                txn.category,
                settings.money(txn.amount),
                txn.date.format(&settings.date_format)
            );
        }
    }

    Ok(())
}
