//! Export CLI commands

use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

use clap::Subcommand;

use crate::error::{LedgerError, LedgerResult};
use crate::export::{export_full_json, export_full_yaml, export_tables_csv};
use crate::storage::Storage;

/// Export subcommands
#[derive(Subcommand)]
pub enum ExportCommands {
    /// One CSV file per table in a timestamped folder
    Tables {
        /// Parent directory (defaults to the exports directory)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Full snapshot as JSON
    Json {
        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Full snapshot as YAML
    Yaml {
        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn open_output(output: &Option<PathBuf>) -> LedgerResult<Box<dyn Write>> {
    match output {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                LedgerError::Export(format!("Failed to create {}: {}", path.display(), e))
            })?;
            Ok(Box::new(file))
        }
        None => Ok(Box::new(io::stdout().lock())),
    }
}

/// Handle an export command
pub fn handle_export_command(storage: &Storage, cmd: ExportCommands) -> LedgerResult<()> {
    match cmd {
        ExportCommands::Tables { output } => {
            let dir = output.unwrap_or_else(|| storage.paths().export_dir());
            let folder = export_tables_csv(storage, &dir)?;
            println!("Exported tables to {}", folder.display());
        }
        ExportCommands::Json { output } => {
            export_full_json(storage, open_output(&output)?)?;
            if let Some(path) = output {
                println!("Exported JSON to {}", path.display());
            }
        }
        ExportCommands::Yaml { output } => {
            export_full_yaml(storage, open_output(&output)?)?;
            if let Some(path) = output {
                println!("Exported YAML to {}", path.display());
            }
        }
    }

    Ok(())
}
