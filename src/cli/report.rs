//! Report CLI commands

use std::fs::File;
use std::path::PathBuf;

use clap::Subcommand;

use super::parse_date;
use crate::config::settings::Settings;
use crate::error::{LedgerError, LedgerResult};
use crate::models::LedgerKind;
use crate::reports::{MonthlyReport, SpendingReport};
use crate::services::PeriodService;
use crate::storage::Storage;

/// Report subcommands
#[derive(Subcommand)]
pub enum ReportCommands {
    /// Income, expenses, savings and budget progress for a month
    Monthly {
        /// Period (e.g., "2025-01", "last", "March"), defaults to this month
        #[arg(short, long)]
        period: Option<String>,
        /// Also save the report as a text file in the reports directory
        #[arg(long)]
        save: bool,
        /// Write the report as CSV to this path
        #[arg(long)]
        csv: Option<PathBuf>,
    },
    /// Spending by category
    Spending {
        /// Period (e.g., "2025-01", "last", "2025-01-01..2025-01-15")
        #[arg(short, long, conflicts_with_all = ["start", "end"])]
        period: Option<String>,
        /// Range start (YYYY-MM-DD)
        #[arg(long, requires = "end")]
        start: Option<String>,
        /// Range end (YYYY-MM-DD)
        #[arg(long, requires = "start")]
        end: Option<String>,
        /// Write the report as CSV to this path
        #[arg(long)]
        csv: Option<PathBuf>,
    },
}

fn create_csv(path: &PathBuf) -> LedgerResult<File> {
    File::create(path)
        .map_err(|e| LedgerError::Export(format!("Failed to create {}: {}", path.display(), e)))
}

/// Handle a report command
pub fn handle_report_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ReportCommands,
) -> LedgerResult<()> {
    let periods = PeriodService::new();

    match cmd {
        ReportCommands::Monthly { period, save, csv } => {
            let period = periods.parse_or_current(period.as_deref())?;
            let report = MonthlyReport::generate(storage, &period)?;

            print!("{}", report.format_terminal(settings));

            if save {
                let path = report.write_to(&storage.paths().report_dir(), settings)?;
                println!("\nReport saved to {}", path.display());
            }
            if let Some(path) = csv {
                report.export_csv(create_csv(&path)?)?;
                println!("CSV written to {}", path.display());
            }
        }
        ReportCommands::Spending {
            period,
            start,
            end,
            csv,
        } => {
            let start = start.as_deref().map(parse_date).transpose()?;
            let end = end.as_deref().map(parse_date).transpose()?;
            let period = periods.resolve(period.as_deref(), start, end)?;

            let report = SpendingReport::generate(&storage.ledger(LedgerKind::Expense), &period)?;
            print!("{}", report.format_terminal(settings));

            if let Some(path) = csv {
                report.export_csv(create_csv(&path)?)?;
                println!("CSV written to {}", path.display());
            }
        }
    }

    Ok(())
}
