//! Legacy CSV import
//!
//! Older revisions of the household data used different column names
//! ("tanggal" for the date, "kategori" or "source" for the category,
//! "jumlah" for the amount). Headers are normalized here so every revision
//! lands in the same shape. Rows that cannot be parsed are skipped and
//! counted rather than failing the whole file.

use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord, Trim};
use serde::Serialize;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{BudgetCategory, LedgerKind, Money, Tags, Transaction};
use crate::storage::Storage;

const DATE_COLUMNS: &[&str] = &["date", "tanggal"];
const CATEGORY_COLUMNS: &[&str] = &["category", "kategori", "source"];
const AMOUNT_COLUMNS: &[&str] = &["amount", "jumlah"];
const LIMIT_COLUMNS: &[&str] = &["limit_amount", "monthly_limit", "limit"];
const NOTE_COLUMNS: &[&str] = &["note", "notes", "memo", "keterangan"];

/// Outcome of an import run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub imported: usize,
    pub skipped: usize,
}

/// What a CSV file holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportTarget {
    Ledger(LedgerKind),
    Budget,
}

impl FromStr for ImportTarget {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "budget" | "budgets" | "anggaran" => Ok(Self::Budget),
            other => LedgerKind::from_str(other)
                .map(Self::Ledger)
                .map_err(|e| LedgerError::Import(e.to_string())),
        }
    }
}

/// Parse a date as written by any data revision
///
/// Tries ISO dates, then day-first dates, then the date part of a
/// timestamp such as "2024-01-05 13:45:00".
pub fn parse_legacy_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    for format in ["%Y-%m-%d", "%d/%m/%Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(s, format) {
            return Some(date);
        }
    }

    s.get(..10)
        .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
}

/// Column positions after header normalization
#[derive(Debug, Default)]
struct Columns {
    date: Option<usize>,
    category: Option<usize>,
    amount: Option<usize>,
    limit: Option<usize>,
    account: Option<usize>,
    contributor: Option<usize>,
    note: Option<usize>,
}

impl Columns {
    fn detect(headers: &StringRecord) -> Self {
        let names: Vec<String> = headers.iter().map(|h| h.trim().to_lowercase()).collect();

        Self {
            date: position(&names, DATE_COLUMNS),
            category: position(&names, CATEGORY_COLUMNS),
            amount: position(&names, AMOUNT_COLUMNS),
            limit: position(&names, LIMIT_COLUMNS),
            account: position(&names, &["account"]),
            contributor: position(&names, &["contributor"]),
            note: position(&names, NOTE_COLUMNS),
        }
    }
}

/// First header matching any candidate, in candidate priority order
fn position(names: &[String], candidates: &[&str]) -> Option<usize> {
    candidates
        .iter()
        .find_map(|c| names.iter().position(|n| n == c))
}

fn field(record: &StringRecord, column: Option<usize>) -> Option<&str> {
    column
        .and_then(|idx| record.get(idx))
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    ReaderBuilder::new()
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader)
}

/// Parse ledger rows, returning the transactions and the skipped row count
pub fn parse_transactions<R: Read>(
    kind: LedgerKind,
    reader: R,
) -> LedgerResult<(Vec<Transaction>, usize)> {
    let mut reader = csv_reader(reader);
    let columns = Columns::detect(reader.headers()?);

    if columns.date.is_none() {
        return Err(LedgerError::Import("no date or tanggal column".into()));
    }
    if columns.amount.is_none() {
        return Err(LedgerError::Import("no amount or jumlah column".into()));
    }
    if columns.category.is_none() && columns.account.is_none() && columns.contributor.is_none() {
        return Err(LedgerError::Import("no category column".into()));
    }

    let mut transactions = Vec::new();
    let mut skipped = 0;

    for (row, record) in reader.records().enumerate() {
        let record = match record {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!(row, error = %e, "unreadable row skipped");
                skipped += 1;
                continue;
            }
        };

        let Some(date) = field(&record, columns.date).and_then(parse_legacy_date) else {
            tracing::debug!(row, "row without a parseable date skipped");
            skipped += 1;
            continue;
        };

        let Some(amount) = field(&record, columns.amount).and_then(|s| Money::parse(s).ok())
        else {
            tracing::debug!(row, "row without a valid amount skipped");
            skipped += 1;
            continue;
        };

        let account = field(&record, columns.account);
        let contributor = field(&record, columns.contributor);
        let Some(category) = field(&record, columns.category).or(account).or(contributor) else {
            tracing::debug!(row, "row without a category skipped");
            skipped += 1;
            continue;
        };

        let mut txn = Transaction::new(kind, date, category, amount).with_tags(Tags::new(
            account.map(String::from),
            contributor.map(String::from),
        ));
        if let Some(note) = field(&record, columns.note) {
            txn = txn.with_memo(note);
        }

        if txn.validate().is_err() {
            skipped += 1;
            continue;
        }
        transactions.push(txn);
    }

    Ok((transactions, skipped))
}

/// Parse budget rows, returning the categories and the skipped row count
pub fn parse_budget<R: Read>(reader: R) -> LedgerResult<(Vec<BudgetCategory>, usize)> {
    let mut reader = csv_reader(reader);
    let columns = Columns::detect(reader.headers()?);

    if columns.category.is_none() || columns.limit.is_none() {
        return Err(LedgerError::Import(
            "budget files need a category and a limit_amount column".into(),
        ));
    }

    let mut categories = Vec::new();
    let mut skipped = 0;

    for record in reader.records() {
        let Ok(record) = record else {
            skipped += 1;
            continue;
        };

        let name = field(&record, columns.category);
        let limit = field(&record, columns.limit).and_then(|s| Money::parse(s).ok());
        match (name, limit) {
            (Some(name), Some(limit)) => {
                let category = BudgetCategory::new(name, limit);
                if category.validate().is_ok() {
                    categories.push(category);
                } else {
                    skipped += 1;
                }
            }
            _ => skipped += 1,
        }
    }

    Ok((categories, skipped))
}

/// Service for importing legacy CSV files into storage
pub struct ImportService<'a> {
    storage: &'a Storage,
}

impl<'a> ImportService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Import from a file path
    pub fn import_file(&self, target: ImportTarget, path: &Path) -> LedgerResult<ImportSummary> {
        let file = File::open(path)
            .map_err(|e| LedgerError::Import(format!("Failed to open {}: {}", path.display(), e)))?;
        self.import_reader(target, file)
    }

    /// Import from any reader
    pub fn import_reader<R: Read>(
        &self,
        target: ImportTarget,
        reader: R,
    ) -> LedgerResult<ImportSummary> {
        let summary = match target {
            ImportTarget::Ledger(kind) => {
                let (transactions, skipped) = parse_transactions(kind, reader)?;
                let imported = transactions.len();
                self.storage.transactions.insert_many(transactions)?;
                self.storage.transactions.save()?;
                ImportSummary { imported, skipped }
            }
            ImportTarget::Budget => {
                let (categories, skipped) = parse_budget(reader)?;
                let imported = categories.len();
                let mut next_order = self.storage.budget.next_sort_order()?;
                for mut category in categories {
                    match self.storage.budget.get(&category.name)? {
                        Some(mut existing) => {
                            existing.set_limit(category.monthly_limit);
                            self.storage.budget.upsert(existing)?;
                        }
                        None => {
                            category.sort_order = next_order;
                            next_order += 1;
                            self.storage.budget.upsert(category)?;
                        }
                    }
                }
                self.storage.budget.save()?;
                ImportSummary { imported, skipped }
            }
        };

        if summary.skipped > 0 {
            tracing::warn!(skipped = summary.skipped, "some rows could not be imported");
        }
        tracing::info!(imported = summary.imported, ?target, "import finished");
        Ok(summary)
    }
}
