//! Display formatting for terminal output
//!
//! Provides utilities for formatting data models for terminal display,
//! including tables and progress bars.

pub mod budget;
pub mod itinerary;
pub mod transaction;

pub use budget::{format_budget_list, format_budget_progress};
pub use itinerary::format_itinerary;
pub use transaction::{format_transaction_details, format_transaction_table};
