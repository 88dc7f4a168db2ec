//! JSON Export functionality
//!
//! Exports every ledger, the budget and the itinerary to one JSON document
//! with schema versioning.

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{LedgerError, LedgerResult};
use crate::models::{BudgetCategory, ItineraryItem, LedgerKind, Transaction};
use crate::storage::Storage;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Full snapshot of the ledger data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FullExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    pub transactions: Vec<Transaction>,

    pub budget: Vec<BudgetCategory>,

    pub itinerary: Vec<ItineraryItem>,

    pub metadata: ExportMetadata,
}

/// Export metadata for reference
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub income_count: usize,
    pub expense_count: usize,
    pub savings_count: usize,
    pub category_count: usize,
    pub itinerary_count: usize,

    /// Date range of transactions (earliest)
    pub earliest_transaction: Option<String>,

    /// Date range of transactions (latest)
    pub latest_transaction: Option<String>,
}

impl FullExport {
    /// Create a new full export from storage
    pub fn from_storage(storage: &Storage) -> LedgerResult<Self> {
        let mut transactions = storage.transactions.get_all()?;
        transactions.sort_by(|a, b| a.date.cmp(&b.date).then(a.created_at.cmp(&b.created_at)));
        let budget = storage.budget.get_all()?;
        let itinerary = storage.itinerary.get_all()?;

        let count = |kind: LedgerKind| transactions.iter().filter(|t| t.kind == kind).count();

        let metadata = ExportMetadata {
            income_count: count(LedgerKind::Income),
            expense_count: count(LedgerKind::Expense),
            savings_count: count(LedgerKind::Savings),
            category_count: budget.len(),
            itinerary_count: itinerary.len(),
            earliest_transaction: transactions.first().map(|t| t.date.to_string()),
            latest_transaction: transactions.last().map(|t| t.date.to_string()),
        };

        Ok(Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            transactions,
            budget,
            itinerary,
            metadata,
        })
    }

    /// Validate the export structure
    pub fn validate(&self) -> Result<(), String> {
        if self.schema_version != EXPORT_SCHEMA_VERSION {
            return Err(format!(
                "Schema version mismatch: expected {}, got {}",
                EXPORT_SCHEMA_VERSION, self.schema_version
            ));
        }

        for txn in &self.transactions {
            txn.validate()
                .map_err(|e| format!("Transaction {}: {}", txn.id, e))?;
        }

        for category in &self.budget {
            category
                .validate()
                .map_err(|e| format!("Budget category {}: {}", category.name, e))?;
        }

        let total = self.metadata.income_count + self.metadata.expense_count + self.metadata.savings_count;
        if total != self.transactions.len() {
            return Err(format!(
                "Metadata lists {} transactions but {} are present",
                total,
                self.transactions.len()
            ));
        }

        Ok(())
    }
}

/// Export the full database to pretty-printed JSON
pub fn export_full_json<W: Write>(storage: &Storage, writer: W) -> LedgerResult<()> {
    let export = FullExport::from_storage(storage)?;
    serde_json::to_writer_pretty(writer, &export).map_err(|e| LedgerError::Export(e.to_string()))?;
    tracing::debug!(transactions = export.transactions.len(), "exported JSON snapshot");
    Ok(())
}
