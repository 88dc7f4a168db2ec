use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use couple_ledger::cli::{
    handle_budget_command, handle_export_command, handle_import_command,
    handle_itinerary_command, handle_ledger_command, handle_report_command, BudgetCommands,
    ExportCommands, ItineraryCommands, LedgerCommands, ReportCommands,
};
use couple_ledger::config::logging::init_tracing;
use couple_ledger::config::{paths::LedgerPaths, settings::Settings};
use couple_ledger::models::LedgerKind;
use couple_ledger::storage::init::DEFAULT_CATEGORIES;
use couple_ledger::storage::{initialize_storage, Storage};

#[derive(Parser)]
#[command(
    name = "ledger",
    version,
    about = "Shared household ledger for couples",
    long_about = "Track income, expenses and savings together, set monthly budget \
                  limits per category, and see how far along each category is."
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the data directory
    Init {
        /// Seed common expense categories with zero limits
        #[arg(long)]
        with_defaults: bool,
    },

    /// Show paths and settings
    Config,

    /// Income ledger
    #[command(subcommand)]
    Income(LedgerCommands),

    /// Expense ledger
    #[command(subcommand)]
    Expense(LedgerCommands),

    /// Savings ledger
    #[command(subcommand)]
    Savings(LedgerCommands),

    /// Budget limits and progress
    #[command(subcommand)]
    Budget(BudgetCommands),

    /// Trip itinerary
    #[command(subcommand)]
    Itinerary(ItineraryCommands),

    /// Reports
    #[command(subcommand)]
    Report(ReportCommands),

    /// Export data
    #[command(subcommand)]
    Export(ExportCommands),

    /// Import a CSV file from an older data layout
    Import {
        /// What the file holds: income, expense, savings or budget
        target: String,
        /// Path to the CSV file
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let paths = LedgerPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    let mut storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    match cli.command {
        Some(Commands::Init { with_defaults }) => {
            println!("Initializing ledger at: {}", paths.base_dir().display());
            initialize_storage(&paths, with_defaults)?;
            println!("Initialization complete!");
            if with_defaults {
                println!();
                println!("Budget categories created with zero limits:");
                println!("  {}", DEFAULT_CATEGORIES.join(", "));
                println!("Set limits with 'ledger budget set <category> <limit>'.");
            }
        }
        Some(Commands::Config) => {
            println!("Ledger Configuration");
            println!("====================");
            println!("Base directory:    {}", paths.base_dir().display());
            println!("Data directory:    {}", paths.data_dir().display());
            println!("Export directory:  {}", paths.export_dir().display());
            println!("Report directory:  {}", paths.report_dir().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol:    {}", settings.currency_symbol);
            println!("  Date format:        {}", settings.date_format);
            println!("  Progress bar width: {}", settings.progress_bar_width);
        }
        Some(Commands::Income(cmd)) => {
            handle_ledger_command(&storage, &settings, LedgerKind::Income, cmd)?;
        }
        Some(Commands::Expense(cmd)) => {
            handle_ledger_command(&storage, &settings, LedgerKind::Expense, cmd)?;
        }
        Some(Commands::Savings(cmd)) => {
            handle_ledger_command(&storage, &settings, LedgerKind::Savings, cmd)?;
        }
        Some(Commands::Budget(cmd)) => {
            handle_budget_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Itinerary(cmd)) => {
            handle_itinerary_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Report(cmd)) => {
            handle_report_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Export(cmd)) => {
            handle_export_command(&storage, cmd)?;
        }
        Some(Commands::Import { target, file }) => {
            handle_import_command(&storage, &target, &file)?;
        }
        None => {
            println!("ledger - shared household ledger");
            println!();
            println!("Run 'ledger --help' for usage information.");
        }
    }

    Ok(())
}
