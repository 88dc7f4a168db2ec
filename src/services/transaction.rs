//! Transaction service
//!
//! Records, lists and deletes transactions across the income, expense and
//! savings ledgers. Every mutation is persisted immediately.

use chrono::NaiveDate;

use crate::error::{LedgerError, LedgerResult};
use crate::models::category::name_key;
use crate::models::{LedgerKind, Money, Period, Tags, Transaction};
use crate::storage::Storage;

/// Service for transaction management
pub struct TransactionService<'a> {
    storage: &'a Storage,
}

/// Input for recording a new transaction
#[derive(Debug, Clone)]
pub struct RecordTransactionInput {
    pub kind: LedgerKind,
    pub date: NaiveDate,
    pub category: String,
    pub amount: Money,
    pub account: Option<String>,
    pub contributor: Option<String>,
    pub memo: Option<String>,
}

/// Options for filtering transactions
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    pub kind: Option<LedgerKind>,
    pub period: Option<Period>,
    /// Case-insensitive category match
    pub category: Option<String>,
    pub limit: Option<usize>,
}

impl TransactionFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn kind(mut self, kind: LedgerKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn period(mut self, period: Period) -> Self {
        self.period = Some(period);
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    fn matches(&self, txn: &Transaction) -> bool {
        if self.kind.is_some_and(|kind| kind != txn.kind) {
            return false;
        }
        if let Some(period) = &self.period {
            if !period.contains(txn.date) {
                return false;
            }
        }
        if let Some(category) = &self.category {
            if name_key(&txn.category) != name_key(category) {
                return false;
            }
        }
        true
    }
}

impl<'a> TransactionService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Validate and persist a new transaction
    pub fn record(&self, input: RecordTransactionInput) -> LedgerResult<Transaction> {
        let mut txn = Transaction::new(input.kind, input.date, input.category, input.amount)
            .with_tags(Tags::new(input.account, input.contributor));
        if let Some(memo) = input.memo {
            txn = txn.with_memo(memo.trim());
        }

        txn.validate()
            .map_err(|e| LedgerError::Validation(e.to_string()))?;

        self.storage.transactions.upsert(txn.clone())?;
        self.storage.transactions.save()?;

        tracing::info!(
            id = %txn.id,
            kind = %txn.kind,
            category = %txn.category,
            amount = %txn.amount,
            "recorded transaction"
        );
        Ok(txn)
    }

    /// List transactions, newest first
    pub fn list(&self, filter: &TransactionFilter) -> LedgerResult<Vec<Transaction>> {
        let mut transactions: Vec<Transaction> = self
            .storage
            .transactions
            .get_all()?
            .into_iter()
            .filter(|txn| filter.matches(txn))
            .collect();

        transactions.sort_by(|a, b| b.date.cmp(&a.date).then(b.created_at.cmp(&a.created_at)));

        if let Some(limit) = filter.limit {
            transactions.truncate(limit);
        }
        Ok(transactions)
    }

    /// Find a transaction by full or short ID
    pub fn find(&self, reference: &str) -> LedgerResult<Option<Transaction>> {
        self.storage.transactions.find(reference)
    }

    /// Delete a transaction by full or short ID
    pub fn delete(&self, reference: &str) -> LedgerResult<Transaction> {
        let txn = self
            .find(reference)?
            .ok_or_else(|| LedgerError::transaction_not_found(reference))?;

        self.storage.transactions.delete(txn.id)?;
        self.storage.transactions.save()?;

        tracing::info!(id = %txn.id, kind = %txn.kind, "deleted transaction");
        Ok(txn)
    }

    /// Sum of one ledger over a period
    pub fn total(&self, kind: LedgerKind, period: &Period) -> LedgerResult<Money> {
        let (start, end) = period.bounds();
        Ok(self
            .storage
            .transactions
            .get_by_date_range(kind, start, end)?
            .iter()
            .map(|t| t.amount)
            .sum())
    }
}
