//! Record sources
//!
//! The aggregation and progress code never touches storage directly; it is
//! handed something that can answer two questions: which transactions fall
//! in a date range, and which budget categories exist.

use chrono::NaiveDate;

use crate::error::LedgerResult;
use crate::models::{BudgetCategory, LedgerKind, Transaction};

use super::Storage;

/// A queryable snapshot of ledger records
pub trait RecordSource {
    /// Transactions dated within `[start, end]`
    fn query(&self, start: NaiveDate, end: NaiveDate) -> LedgerResult<Vec<Transaction>>;

    /// Budget categories in display order
    fn list_categories(&self) -> LedgerResult<Vec<BudgetCategory>>;
}

/// One ledger (income, expenses or savings) of a [`Storage`]
pub struct LedgerView<'a> {
    storage: &'a Storage,
    kind: LedgerKind,
}

impl<'a> LedgerView<'a> {
    pub fn new(storage: &'a Storage, kind: LedgerKind) -> Self {
        Self { storage, kind }
    }

    pub fn kind(&self) -> LedgerKind {
        self.kind
    }
}

impl RecordSource for LedgerView<'_> {
    fn query(&self, start: NaiveDate, end: NaiveDate) -> LedgerResult<Vec<Transaction>> {
        self.storage
            .transactions
            .get_by_date_range(self.kind, start, end)
    }

    fn list_categories(&self) -> LedgerResult<Vec<BudgetCategory>> {
        self.storage.budget.get_all()
    }
}

/// An in-memory source, for embedding and tests
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    pub transactions: Vec<Transaction>,
    pub categories: Vec<BudgetCategory>,
}

impl MemorySource {
    pub fn new(transactions: Vec<Transaction>, categories: Vec<BudgetCategory>) -> Self {
        Self {
            transactions,
            categories,
        }
    }
}

impl RecordSource for MemorySource {
    fn query(&self, start: NaiveDate, end: NaiveDate) -> LedgerResult<Vec<Transaction>> {
        Ok(self
            .transactions
            .iter()
            .filter(|t| t.date >= start && t.date <= end)
            .cloned()
            .collect())
    }

    fn list_categories(&self) -> LedgerResult<Vec<BudgetCategory>> {
        Ok(self.categories.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::LedgerPaths;
    use crate::models::Money;
    use tempfile::TempDir;

    #[test]
    fn test_ledger_view_is_scoped_to_kind() {
        let temp_dir = TempDir::new().unwrap();
        let storage = Storage::new(LedgerPaths::with_base_dir(temp_dir.path().to_path_buf())).unwrap();
        let day = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        storage
            .transactions
            .upsert(Transaction::new(LedgerKind::Expense, day, "Food", Money::from_units(5)))
            .unwrap();
        storage
            .transactions
            .upsert(Transaction::new(LedgerKind::Income, day, "Salary", Money::from_units(9)))
            .unwrap();

        let expenses = storage.ledger(LedgerKind::Expense);
        let found = expenses.query(day, day).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].category, "Food");
        assert_eq!(expenses.kind(), LedgerKind::Expense);
    }

    #[test]
    fn test_memory_source_filters_dates() {
        let day = |d| NaiveDate::from_ymd_opt(2024, 1, d).unwrap();
        let source = MemorySource::new(
            vec![
                Transaction::new(LedgerKind::Expense, day(1), "Food", Money::from_units(1)),
                Transaction::new(LedgerKind::Expense, day(20), "Food", Money::from_units(2)),
            ],
            vec![BudgetCategory::new("Food", Money::from_units(10))],
        );
        assert_eq!(source.query(day(1), day(10)).unwrap().len(), 1);
        assert_eq!(source.list_categories().unwrap().len(), 1);
    }
}
