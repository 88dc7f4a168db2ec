//! Service layer for couple-ledger
//!
//! The service layer provides business logic on top of the storage layer,
//! handling validation, persistence and cross-ledger calculations.

pub mod budget;
pub mod import;
pub mod itinerary;
pub mod period;
pub mod transaction;

pub use budget::{progress_for, BudgetService, PeriodProgress};
pub use import::{ImportService, ImportSummary, ImportTarget};
pub use itinerary::ItineraryService;
pub use period::PeriodService;
pub use transaction::{RecordTransactionInput, TransactionFilter, TransactionService};
