//! Reporting period service
//!
//! Resolves user-typed period strings ("current", "last", "March 2024",
//! "2024-03", "2024-03-01..2024-03-15") against a fixed "today".

use chrono::{Datelike, Local, NaiveDate};

use crate::error::{LedgerError, LedgerResult};
use crate::models::Period;

const MONTHS: [(&str, u32); 24] = [
    ("january", 1),
    ("jan", 1),
    ("february", 2),
    ("feb", 2),
    ("march", 3),
    ("mar", 3),
    ("april", 4),
    ("apr", 4),
    ("may", 5),
    ("june", 6),
    ("jun", 6),
    ("july", 7),
    ("jul", 7),
    ("august", 8),
    ("aug", 8),
    ("september", 9),
    ("sept", 9),
    ("sep", 9),
    ("october", 10),
    ("oct", 10),
    ("november", 11),
    ("nov", 11),
    ("december", 12),
    ("dec", 12),
];

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Service for reporting period resolution
pub struct PeriodService {
    today: NaiveDate,
}

impl Default for PeriodService {
    fn default() -> Self {
        Self::new()
    }
}

impl PeriodService {
    /// Period service anchored at the local date
    pub fn new() -> Self {
        Self::at(Local::now().date_naive())
    }

    /// Period service anchored at a given date
    pub fn at(today: NaiveDate) -> Self {
        Self { today }
    }

    pub fn current_period(&self) -> Period {
        Period::month_of(self.today)
    }

    /// Parse a period string or fall back to the current month
    pub fn parse_or_current(&self, period_str: Option<&str>) -> LedgerResult<Period> {
        match period_str {
            Some(s) => self.parse(s),
            None => Ok(self.current_period()),
        }
    }

    /// Parse a period string
    ///
    /// Formats supported:
    /// - Relative: "current", "this", "last", "prev", "next"
    /// - Month names: "March", "mar 2024"
    /// - "2025-01", "2025-01-15", "2025-01-01..2025-01-14"
    pub fn parse(&self, s: &str) -> LedgerResult<Period> {
        let lower = s.trim().to_lowercase();

        match lower.as_str() {
            "current" | "now" | "this" => return Ok(self.current_period()),
            "last" | "previous" | "prev" => return Ok(self.current_period().prev()),
            "next" => return Ok(self.current_period().next()),
            _ => {}
        }

        if let Some(period) = self.parse_month_name(&lower) {
            return Ok(period);
        }

        Period::parse(&lower).map_err(|e| LedgerError::Validation(e.to_string()))
    }

    /// Resolve either a period string or an explicit start/end pair
    pub fn resolve(
        &self,
        period: Option<&str>,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> LedgerResult<Period> {
        match (start, end) {
            (None, None) => self.parse_or_current(period),
            (Some(start), Some(end)) => {
                if start > end {
                    return Err(LedgerError::Validation(format!(
                        "Start date {} is after end date {}",
                        start, end
                    )));
                }
                Ok(Period::custom(start, end))
            }
            _ => Err(LedgerError::Validation(
                "Both --start and --end are required for a date range".into(),
            )),
        }
    }

    /// Month names without a year resolve to the most recent such month
    fn parse_month_name(&self, s: &str) -> Option<Period> {
        for (name, month) in MONTHS {
            if let Some(rest) = s.strip_prefix(name) {
                let rest = rest.trim();
                if !rest.is_empty() && !rest.chars().all(|c| c.is_ascii_digit()) {
                    continue;
                }
                let year = if rest.is_empty() {
                    if month > self.today.month() {
                        self.today.year() - 1
                    } else {
                        self.today.year()
                    }
                } else {
                    rest.parse().ok()?
                };
                return Period::try_monthly(year, month).ok();
            }
        }
        None
    }

    /// Format a period in a human-friendly way
    pub fn format_friendly(&self, period: &Period) -> String {
        match period {
            Period::Monthly { year, month } => {
                let name = MONTH_NAMES[(*month as usize).clamp(1, 12) - 1];
                format!("{} {}", name, year)
            }
            Period::Custom { start, end } if start == end => start.format("%B %d, %Y").to_string(),
            Period::Custom { start, end } => {
                format!("{} - {}", start.format("%b %d"), end.format("%b %d, %Y"))
            }
        }
    }
}
