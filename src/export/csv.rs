//! CSV Export functionality
//!
//! Writes every table to its own CSV file inside a timestamped folder, so
//! the export opens in any spreadsheet with one file per sheet.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime};

use crate::error::{LedgerError, LedgerResult};
use crate::models::{BudgetCategory, ItineraryItem, LedgerKind, Transaction};
use crate::storage::Storage;

fn export_err(e: impl std::fmt::Display) -> LedgerError {
    LedgerError::Export(e.to_string())
}

/// Folder name for an export taken at `at`
pub fn export_folder_name(at: NaiveDateTime) -> String {
    format!("manual_export_{}", at.format("%Y%m%d_%H%M%S"))
}

/// Write ledger transactions as CSV, oldest first
pub fn write_transactions_csv<W: Write>(transactions: &[Transaction], writer: W) -> LedgerResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer
        .write_record(["id", "date", "category", "amount", "account", "contributor", "memo"])
        .map_err(export_err)?;

    let mut sorted: Vec<&Transaction> = transactions.iter().collect();
    sorted.sort_by(|a, b| a.date.cmp(&b.date).then(a.created_at.cmp(&b.created_at)));

    for txn in sorted {
        csv_writer
            .write_record(vec![
                txn.id.as_uuid().to_string(),
                txn.date.format("%Y-%m-%d").to_string(),
                txn.category.clone(),
                txn.amount.to_plain_string(),
                txn.tags.account.clone().unwrap_or_default(),
                txn.tags.contributor.clone().unwrap_or_default(),
                txn.memo.clone(),
            ])
            .map_err(export_err)?;
    }

    csv_writer.flush().map_err(export_err)
}

/// Write budget categories as CSV, in display order
pub fn write_budget_csv<W: Write>(categories: &[BudgetCategory], writer: W) -> LedgerResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer
        .write_record(["category", "limit_amount"])
        .map_err(export_err)?;

    for category in categories {
        csv_writer
            .write_record(vec![category.name.clone(), category.monthly_limit.to_plain_string()])
            .map_err(export_err)?;
    }

    csv_writer.flush().map_err(export_err)
}

/// Write itinerary items as CSV
pub fn write_itinerary_csv<W: Write>(items: &[ItineraryItem], writer: W) -> LedgerResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer
        .write_record(["id", "date", "destination", "activity", "estimated_cost", "notes"])
        .map_err(export_err)?;

    for item in items {
        csv_writer
            .write_record(vec![
                item.id.as_uuid().to_string(),
                item.date.format("%Y-%m-%d").to_string(),
                item.destination.clone(),
                item.activity.clone(),
                item.estimated_cost.to_plain_string(),
                item.notes.clone(),
            ])
            .map_err(export_err)?;
    }

    csv_writer.flush().map_err(export_err)
}

fn create(path: &Path) -> LedgerResult<File> {
    File::create(path).map_err(|e| LedgerError::Export(format!("Failed to create {}: {}", path.display(), e)))
}

/// Export all tables into a new `manual_export_<timestamp>` folder in `dir`
///
/// Returns the folder path.
pub fn export_tables_csv(storage: &Storage, dir: &Path) -> LedgerResult<PathBuf> {
    let folder = dir.join(export_folder_name(Local::now().naive_local()));
    std::fs::create_dir_all(&folder)
        .map_err(|e| LedgerError::Export(format!("Failed to create {}: {}", folder.display(), e)))?;

    for kind in LedgerKind::ALL {
        let transactions = storage.transactions.get_by_kind(kind)?;
        let path = folder.join(format!("{}.csv", kind.table_name()));
        write_transactions_csv(&transactions, create(&path)?)?;
    }

    write_itinerary_csv(
        &storage.itinerary.get_all()?,
        create(&folder.join("itinerary.csv"))?,
    )?;
    write_budget_csv(&storage.budget.get_all()?, create(&folder.join("budget.csv"))?)?;

    tracing::info!(folder = %folder.display(), "exported tables");
    Ok(folder)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::LedgerPaths;
    use crate::models::{Money, Tags};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    #[test]
    fn test_folder_name() {
        let at = NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_opt(7, 5, 3)
            .unwrap();
        assert_eq!(export_folder_name(at), "manual_export_20240309_070503");
    }

    #[test]
    fn test_transactions_csv_quotes_and_tags() {
        let txn = Transaction::new(
            LedgerKind::Income,
            NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            "Salary, main",
            Money::from_cents(123_456),
        )
        .with_tags(Tags::new(Some("BCA".into()), Some("Alex".into())));

        let mut buffer = Vec::new();
        write_transactions_csv(&[txn.clone()], &mut buffer).unwrap();
        let csv = String::from_utf8(buffer).unwrap();
        let lines: Vec<_> = csv.lines().collect();

        assert_eq!(lines[0], "id,date,category,amount,account,contributor,memo");
        assert_eq!(
            lines[1],
            format!("{},2024-01-02,\"Salary, main\",1234.56,BCA,Alex,", txn.id.as_uuid())
        );
    }

    #[test]
    fn test_budget_csv_keeps_large_amounts_exact() {
        let categories = [BudgetCategory::new(
            "House",
            Money::from_cents(9_007_199_254_740_993),
        )];

        let mut buffer = Vec::new();
        write_budget_csv(&categories, &mut buffer).unwrap();
        let csv = String::from_utf8(buffer).unwrap();

        assert!(csv.contains("House,90071992547409.93"));
    }

    #[test]
    fn test_export_tables_writes_every_table() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths.clone()).unwrap();
        let day = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        storage
            .transactions
            .upsert(Transaction::new(LedgerKind::Expense, day, "Food", Money::from_units(5)))
            .unwrap();
        storage
            .budget
            .upsert(BudgetCategory::new("Food", Money::from_units(100)))
            .unwrap();

        let folder = export_tables_csv(&storage, &paths.export_dir()).unwrap();
        assert!(folder
            .file_name()
            .unwrap()
            .to_string_lossy()
            .starts_with("manual_export_"));

        for name in ["income.csv", "expenses.csv", "savings.csv", "itinerary.csv", "budget.csv"] {
            assert!(folder.join(name).exists(), "missing {}", name);
        }

        let expenses = std::fs::read_to_string(folder.join("expenses.csv")).unwrap();
        assert_eq!(expenses.lines().count(), 2);
        let income = std::fs::read_to_string(folder.join("income.csv")).unwrap();
        assert_eq!(income.lines().count(), 1);
        let budget = std::fs::read_to_string(folder.join("budget.csv")).unwrap();
        assert!(budget.contains("Food,100.00"));
    }
}
