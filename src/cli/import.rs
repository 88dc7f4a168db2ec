//! Import CLI command

use std::path::Path;

use crate::error::LedgerResult;
use crate::services::{ImportService, ImportTarget};
use crate::storage::Storage;

/// Import a legacy CSV file into a ledger or the budget
pub fn handle_import_command(storage: &Storage, target: &str, file: &Path) -> LedgerResult<()> {
    let target: ImportTarget = target.parse()?;
    let summary = ImportService::new(storage).import_file(target, file)?;

    println!("Imported {} row(s) from {}", summary.imported, file.display());
    if summary.skipped > 0 {
        println!(
            "Skipped {} row(s) with a missing or invalid date, amount or category",
            summary.skipped
        );
    }
    Ok(())
}
