//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod budget;
pub mod export;
pub mod import;
pub mod itinerary;
pub mod report;
pub mod transaction;

pub use budget::{handle_budget_command, BudgetCommands};
pub use export::{handle_export_command, ExportCommands};
pub use import::handle_import_command;
pub use itinerary::{handle_itinerary_command, ItineraryCommands};
pub use report::{handle_report_command, ReportCommands};
pub use transaction::{handle_ledger_command, LedgerCommands};

use chrono::NaiveDate;

use crate::error::{LedgerError, LedgerResult};
use crate::models::Money;

/// Parse a `YYYY-MM-DD` argument, defaulting to today
pub(crate) fn parse_date_or_today(date: Option<&str>) -> LedgerResult<NaiveDate> {
    match date {
        Some(s) => parse_date(s),
        None => Ok(chrono::Local::now().date_naive()),
    }
}

pub(crate) fn parse_date(s: &str) -> LedgerResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| {
        LedgerError::Validation(format!("Invalid date format: '{}'. Use YYYY-MM-DD", s))
    })
}

/// Parse a non-negative amount argument
pub(crate) fn parse_amount(s: &str) -> LedgerResult<Money> {
    let amount = Money::parse(s).map_err(|e| {
        LedgerError::Validation(format!(
            "Invalid amount: '{}'. Use a non-negative number like '50000' or '12.50'. Error: {}",
            s, e
        ))
    })?;

    if amount.is_negative() {
        return Err(LedgerError::Validation(format!(
            "Amount cannot be negative: '{}'",
            s
        )));
    }
    Ok(amount)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_helpers() {
        assert_eq!(
            parse_date("2024-02-29").unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
        assert!(parse_date("29/02/2024").unwrap_err().is_validation());
        assert_eq!(parse_amount("1,500").unwrap(), Money::from_units(1500));
        assert!(parse_amount("-3").is_err());
    }

    #[test]
    fn test_parse_amount_boundaries() {
        assert!(parse_amount("-0.01").unwrap_err().is_validation());
        assert!(parse_amount("- 5").unwrap_err().is_validation());
        assert!(parse_amount("1.999").unwrap_err().is_validation());
        assert!(parse_amount("99999999999999999999").unwrap_err().is_validation());
        assert_eq!(parse_amount("0").unwrap(), Money::zero());
        assert_eq!(parse_amount("12.50").unwrap(), Money::from_cents(1250));
    }
}
