//! Storage layer
//!
//! JSON file storage with atomic writes and in-memory repositories guarded
//! by `RwLock`, so a reader always sees whole records.

pub mod budget;
pub mod file_io;
pub mod init;
pub mod itinerary;
pub mod source;
pub mod transactions;

pub use budget::BudgetRepository;
pub use file_io::{read_json, write_json_atomic};
pub use init::initialize_storage;
pub use itinerary::ItineraryRepository;
pub use source::{LedgerView, MemorySource, RecordSource};
pub use transactions::TransactionRepository;

use std::sync::PoisonError;

use crate::config::paths::LedgerPaths;
use crate::error::LedgerError;
use crate::models::LedgerKind;

pub(crate) fn lock_err<T>(e: PoisonError<T>) -> LedgerError {
    LedgerError::Storage(format!("Lock poisoned: {}", e))
}

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: LedgerPaths,
    pub transactions: TransactionRepository,
    pub budget: BudgetRepository,
    pub itinerary: ItineraryRepository,
}

impl Storage {
    /// Create a new Storage instance, creating directories as needed
    pub fn new(paths: LedgerPaths) -> Result<Self, LedgerError> {
        paths.ensure_directories()?;

        Ok(Self {
            transactions: TransactionRepository::new(paths.transactions_file()),
            budget: BudgetRepository::new(paths.budget_file()),
            itinerary: ItineraryRepository::new(paths.itinerary_file()),
            paths,
        })
    }

    pub fn paths(&self) -> &LedgerPaths {
        &self.paths
    }

    /// Load all data from disk
    pub fn load_all(&mut self) -> Result<(), LedgerError> {
        self.transactions.load()?;
        self.budget.load()?;
        self.itinerary.load()?;
        Ok(())
    }

    /// A record source over one ledger
    pub fn ledger(&self, kind: LedgerKind) -> LedgerView<'_> {
        LedgerView::new(self, kind)
    }

    pub fn is_initialized(&self) -> bool {
        self.paths.is_initialized()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BudgetCategory, Money, Transaction};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    #[test]
    fn test_storage_creation() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();

        assert!(temp_dir.path().join("data").exists());
        assert!(temp_dir.path().join("exports").exists());
        assert!(!storage.is_initialized());
    }

    #[test]
    fn test_save_and_reload() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths.clone()).unwrap();

        let day = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        storage
            .transactions
            .upsert(Transaction::new(LedgerKind::Expense, day, "Food", Money::from_units(50)))
            .unwrap();
        storage
            .budget
            .upsert(BudgetCategory::new("Food", Money::from_units(100)))
            .unwrap();
        storage.transactions.save().unwrap();
        storage.budget.save().unwrap();

        let mut reloaded = Storage::new(paths).unwrap();
        reloaded.load_all().unwrap();
        assert_eq!(reloaded.transactions.count().unwrap(), 1);
        assert!(reloaded.budget.get("food").unwrap().is_some());
    }
}
