//! couple-ledger - shared household ledger
//!
//! This library provides the core functionality for a two-person household
//! ledger: income, expenses and savings recorded per category, monthly
//! budget limits, and an itinerary for shared trips.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Paths, settings and tracing setup
//! - `error`: Custom error types
//! - `models`: Core data models (transactions, budget categories, periods)
//! - `storage`: JSON file storage and the [`storage::RecordSource`] seam
//! - `reports`: Aggregation by category, budget progress and reports
//! - `services`: Business logic layer
//! - `export`: CSV, JSON and YAML exports
//! - `display`: Terminal formatting
//! - `cli`: Command handlers for the `ledger` binary
//!
//! # Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use couple_ledger::models::{BudgetCategory, LedgerKind, Money, Transaction};
//! use couple_ledger::reports::{aggregate, BudgetProgress};
//!
//! let jan = |d| NaiveDate::from_ymd_opt(2024, 1, d).unwrap();
//! let spent = vec![
//!     Transaction::new(LedgerKind::Expense, jan(3), "Food", Money::from_units(150)),
//!     Transaction::new(LedgerKind::Expense, jan(9), "Rent", Money::from_units(400)),
//! ];
//! let actuals = aggregate(&spent, jan(1), jan(31));
//! let categories = vec![
//!     BudgetCategory::new("Food", Money::from_units(100)),
//!     BudgetCategory::new("Rent", Money::from_units(800)),
//! ];
//!
//! let progress = BudgetProgress::compute(&categories, &actuals);
//! assert!(progress.any_over_budget);
//! assert_eq!(progress.entries[1].ratio, 0.5);
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{LedgerError, LedgerResult};
