//! Transaction repository for JSON storage
//!
//! Holds the income, expense and savings ledgers in one file,
//! `transactions.json`, indexed in memory by ID.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use chrono::NaiveDate;

use crate::error::LedgerError;
use crate::models::{LedgerKind, Transaction, TransactionId};

use super::file_io::{read_json, write_json_atomic};
use super::lock_err;

/// Serializable transaction data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct TransactionData {
    transactions: Vec<Transaction>,
}

/// Newest first; ties broken by record time so listings are stable
fn sort_newest_first(transactions: &mut [Transaction]) {
    transactions.sort_by(|a, b| b.date.cmp(&a.date).then(b.created_at.cmp(&a.created_at)));
}

/// Repository for transaction persistence
pub struct TransactionRepository {
    path: PathBuf,
    data: RwLock<HashMap<TransactionId, Transaction>>,
}

impl TransactionRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    /// Load transactions from disk
    pub fn load(&self) -> Result<(), LedgerError> {
        let file_data: TransactionData = read_json(&self.path)?;

        let mut data = self.data.write().map_err(lock_err)?;
        data.clear();
        for txn in file_data.transactions {
            data.insert(txn.id, txn);
        }

        tracing::debug!(count = data.len(), "loaded transactions");
        Ok(())
    }

    /// Save transactions to disk
    pub fn save(&self) -> Result<(), LedgerError> {
        let data = self.data.read().map_err(lock_err)?;

        let mut transactions: Vec<_> = data.values().cloned().collect();
        sort_newest_first(&mut transactions);

        write_json_atomic(&self.path, &TransactionData { transactions })
    }

    pub fn get(&self, id: TransactionId) -> Result<Option<Transaction>, LedgerError> {
        let data = self.data.read().map_err(lock_err)?;
        Ok(data.get(&id).cloned())
    }

    /// Find a transaction by full or short ID
    ///
    /// Ambiguous short references match nothing.
    pub fn find(&self, reference: &str) -> Result<Option<Transaction>, LedgerError> {
        let data = self.data.read().map_err(lock_err)?;
        let mut matches = data.values().filter(|t| t.id.matches(reference));
        match (matches.next(), matches.next()) {
            (Some(txn), None) => Ok(Some(txn.clone())),
            _ => Ok(None),
        }
    }

    /// All transactions, newest first
    pub fn get_all(&self) -> Result<Vec<Transaction>, LedgerError> {
        let data = self.data.read().map_err(lock_err)?;
        let mut transactions: Vec<_> = data.values().cloned().collect();
        sort_newest_first(&mut transactions);
        Ok(transactions)
    }

    /// All transactions of one ledger, newest first
    pub fn get_by_kind(&self, kind: LedgerKind) -> Result<Vec<Transaction>, LedgerError> {
        let data = self.data.read().map_err(lock_err)?;
        let mut transactions: Vec<_> = data.values().filter(|t| t.kind == kind).cloned().collect();
        sort_newest_first(&mut transactions);
        Ok(transactions)
    }

    /// Transactions of one ledger dated within `[start, end]`
    pub fn get_by_date_range(
        &self,
        kind: LedgerKind,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Transaction>, LedgerError> {
        let data = self.data.read().map_err(lock_err)?;
        let mut transactions: Vec<_> = data
            .values()
            .filter(|t| t.kind == kind && t.date >= start && t.date <= end)
            .cloned()
            .collect();
        sort_newest_first(&mut transactions);
        Ok(transactions)
    }

    /// Insert or replace a transaction
    pub fn upsert(&self, txn: Transaction) -> Result<(), LedgerError> {
        let mut data = self.data.write().map_err(lock_err)?;
        data.insert(txn.id, txn);
        Ok(())
    }

    /// Insert many transactions under a single lock
    pub fn insert_many(&self, txns: Vec<Transaction>) -> Result<(), LedgerError> {
        let mut data = self.data.write().map_err(lock_err)?;
        for txn in txns {
            data.insert(txn.id, txn);
        }
        Ok(())
    }

    /// Remove a transaction, returning it if it existed
    pub fn delete(&self, id: TransactionId) -> Result<Option<Transaction>, LedgerError> {
        let mut data = self.data.write().map_err(lock_err)?;
        Ok(data.remove(&id))
    }

    pub fn count(&self) -> Result<usize, LedgerError> {
        let data = self.data.read().map_err(lock_err)?;
        Ok(data.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use tempfile::TempDir;

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, d).unwrap()
    }

    fn repo() -> (TempDir, TransactionRepository) {
        let temp_dir = TempDir::new().unwrap();
        let repo = TransactionRepository::new(temp_dir.path().join("transactions.json"));
        (temp_dir, repo)
    }

    #[test]
    fn test_upsert_save_load() {
        let (_temp_dir, repo) = repo();
        let txn = Transaction::new(LedgerKind::Expense, date(1, 5), "Food", Money::from_units(50));
        repo.upsert(txn.clone()).unwrap();
        repo.save().unwrap();

        let reloaded = TransactionRepository::new(repo.path.clone());
        reloaded.load().unwrap();
        assert_eq!(reloaded.get(txn.id).unwrap(), Some(txn));
        assert_eq!(reloaded.count().unwrap(), 1);
    }

    #[test]
    fn test_date_range_filters_kind_and_dates() {
        let (_temp_dir, repo) = repo();
        repo.insert_many(vec![
            Transaction::new(LedgerKind::Expense, date(1, 1), "Food", Money::from_units(1)),
            Transaction::new(LedgerKind::Expense, date(1, 31), "Food", Money::from_units(2)),
            Transaction::new(LedgerKind::Expense, date(2, 1), "Food", Money::from_units(3)),
            Transaction::new(LedgerKind::Income, date(1, 15), "Salary", Money::from_units(4)),
        ])
        .unwrap();

        let jan = repo
            .get_by_date_range(LedgerKind::Expense, date(1, 1), date(1, 31))
            .unwrap();
        assert_eq!(jan.len(), 2);
        assert_eq!(jan[0].date, date(1, 31));

        let income = repo.get_by_kind(LedgerKind::Income).unwrap();
        assert_eq!(income.len(), 1);
    }

    #[test]
    fn test_find_by_short_id_and_delete() {
        let (_temp_dir, repo) = repo();
        let txn = Transaction::new(LedgerKind::Savings, date(3, 3), "House", Money::from_units(9));
        repo.upsert(txn.clone()).unwrap();

        let found = repo.find(&txn.id.to_string()).unwrap();
        assert_eq!(found.map(|t| t.id), Some(txn.id));

        assert!(repo.delete(txn.id).unwrap().is_some());
        assert!(repo.delete(txn.id).unwrap().is_none());
        assert!(repo.get_all().unwrap().is_empty());
    }
}
