//! Core data models
//!
//! Transactions, budget categories, itinerary items, money and periods.

pub mod category;
pub mod ids;
pub mod itinerary;
pub mod money;
pub mod period;
pub mod transaction;

pub use category::{BudgetCategory, CategoryValidationError};
pub use ids::{ItineraryId, TransactionId};
pub use itinerary::ItineraryItem;
pub use money::{Money, MoneyParseError};
pub use period::{Period, PeriodParseError};
pub use transaction::{LedgerKind, Tags, Transaction, TransactionValidationError};
