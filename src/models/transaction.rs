//! Transaction model
//!
//! A dated, non-negative amount recorded against a category in one of the
//! three money ledgers (income, expenses, savings). Transactions are never
//! edited after they are recorded; they can only be deleted.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::TransactionId;
use super::money::Money;

/// Which ledger a transaction belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LedgerKind {
    Income,
    Expense,
    Savings,
}

impl LedgerKind {
    /// All ledger kinds in display order
    pub const ALL: [LedgerKind; 3] = [Self::Income, Self::Expense, Self::Savings];

    /// Table name used for exports ("income", "expenses", "savings")
    pub fn table_name(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expenses",
            Self::Savings => "savings",
        }
    }
}

impl fmt::Display for LedgerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => write!(f, "Income"),
            Self::Expense => write!(f, "Expense"),
            Self::Savings => write!(f, "Savings"),
        }
    }
}

impl FromStr for LedgerKind {
    type Err = TransactionValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" | "pemasukan" => Ok(Self::Income),
            "expense" | "expenses" | "pengeluaran" => Ok(Self::Expense),
            "saving" | "savings" | "tabungan" => Ok(Self::Savings),
            other => Err(TransactionValidationError::UnknownKind(other.to_string())),
        }
    }
}

/// Optional metadata attached to a transaction
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tags {
    /// Account the money moved through (bank, wallet, cash)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account: Option<String>,

    /// Which partner contributed or spent it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contributor: Option<String>,
}

impl Tags {
    pub fn new(account: Option<String>, contributor: Option<String>) -> Self {
        Self {
            account: account.filter(|s| !s.trim().is_empty()),
            contributor: contributor.filter(|s| !s.trim().is_empty()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.account.is_none() && self.contributor.is_none()
    }
}

/// A recorded transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier
    pub id: TransactionId,

    /// The ledger this transaction belongs to
    pub kind: LedgerKind,

    /// Transaction date
    pub date: NaiveDate,

    /// Grouping key (expense category, income source or savings goal)
    pub category: String,

    /// Non-negative amount
    pub amount: Money,

    #[serde(default, skip_serializing_if = "Tags::is_empty")]
    pub tags: Tags,

    /// Memo/notes
    #[serde(default)]
    pub memo: String,

    /// When the transaction was recorded
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    /// Create a new transaction
    pub fn new(
        kind: LedgerKind,
        date: NaiveDate,
        category: impl Into<String>,
        amount: Money,
    ) -> Self {
        Self {
            id: TransactionId::new(),
            kind,
            date,
            category: category.into().trim().to_string(),
            amount,
            tags: Tags::default(),
            memo: String::new(),
            created_at: Utc::now(),
        }
    }

    /// Builder-style tag setter
    pub fn with_tags(mut self, tags: Tags) -> Self {
        self.tags = tags;
        self
    }

    /// Builder-style memo setter
    pub fn with_memo(mut self, memo: impl Into<String>) -> Self {
        self.memo = memo.into();
        self
    }

    /// Validate the transaction
    pub fn validate(&self) -> Result<(), TransactionValidationError> {
        if self.category.trim().is_empty() {
            return Err(TransactionValidationError::EmptyCategory);
        }

        if self.category.len() > 60 {
            return Err(TransactionValidationError::CategoryTooLong(
                self.category.len(),
            ));
        }

        if self.amount.is_negative() {
            return Err(TransactionValidationError::NegativeAmount(self.amount));
        }

        Ok(())
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.date.format("%Y-%m-%d"),
            self.kind,
            self.category,
            self.amount
        )
    }
}

/// Validation errors for transactions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionValidationError {
    EmptyCategory,
    CategoryTooLong(usize),
    NegativeAmount(Money),
    UnknownKind(String),
}

impl fmt::Display for TransactionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyCategory => write!(f, "Category cannot be empty"),
            Self::CategoryTooLong(len) => {
                write!(f, "Category too long ({} chars, max 60)", len)
            }
            Self::NegativeAmount(amount) => {
                write!(f, "Amount must not be negative (got {})", amount)
            }
            Self::UnknownKind(kind) => write!(f, "Unknown ledger kind: {}", kind),
        }
    }
}

impl std::error::Error for TransactionValidationError {}
