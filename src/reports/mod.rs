//! Reports module for couple-ledger
//!
//! Aggregation by category, budget progress, and the spending and monthly
//! reports built on top of them.

pub mod aggregate;
pub mod monthly;
pub mod progress;
pub mod spending;

pub use aggregate::{aggregate, aggregate_period, AggregateResult};
pub use monthly::MonthlyReport;
pub use progress::{
    any_over_budget, compute_progress, progress_bar, progress_ratio, BudgetProgress, ProgressEntry,
};
pub use spending::{SpendingByCategory, SpendingReport};
