//! Reporting periods
//!
//! A period is either a calendar month or an explicit inclusive date range.
//! Month boundaries always use the real last day of the month.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Last calendar day of a month, or None for an invalid year/month
///
/// # Examples
/// ```
/// use couple_ledger::models::period::last_day_of_month;
/// use chrono::NaiveDate;
/// assert_eq!(last_day_of_month(2024, 2), NaiveDate::from_ymd_opt(2024, 2, 29));
/// assert_eq!(last_day_of_month(2023, 4), NaiveDate::from_ymd_opt(2023, 4, 30));
/// ```
pub fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    let first_of_next = if month == 12 {
        NaiveDate::from_ymd_opt(year.checked_add(1)?, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    first_of_next.and_then(|d| d.pred_opt())
}

/// A reporting period
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum Period {
    /// Calendar month (e.g., "2025-01")
    Monthly { year: i32, month: u32 },

    /// Inclusive date range
    Custom { start: NaiveDate, end: NaiveDate },
}

impl Period {
    /// Create a monthly period
    ///
    /// The month is clamped to 1..=12 and the year to the range whose whole
    /// month is representable as dates. Use [`Period::try_monthly`] to reject
    /// out-of-range input instead.
    pub fn monthly(year: i32, month: u32) -> Self {
        let min_year = NaiveDate::MIN.year();
        let max_year = NaiveDate::MAX.year() - 1;
        Self::Monthly {
            year: year.clamp(min_year, max_year),
            month: month.clamp(1, 12),
        }
    }

    /// Create a monthly period, failing if its bounds are not valid dates
    pub fn try_monthly(year: i32, month: u32) -> Result<Self, PeriodParseError> {
        if !(1..=12).contains(&month) {
            return Err(PeriodParseError::InvalidMonth(month));
        }
        match last_day_of_month(year, month) {
            Some(_) => Ok(Self::Monthly { year, month }),
            None => Err(PeriodParseError::InvalidFormat(format!(
                "{}-{:02}",
                year, month
            ))),
        }
    }

    /// Create a custom inclusive range
    pub fn custom(start: NaiveDate, end: NaiveDate) -> Self {
        Self::Custom { start, end }
    }

    /// The month containing `date`
    pub fn month_of(date: NaiveDate) -> Self {
        Self::Monthly {
            year: date.year(),
            month: date.month(),
        }
    }

    /// First day of the period
    ///
    /// A month that cannot be represented (only reachable by building the
    /// variant by hand) yields an inverted, empty range.
    pub fn start_date(&self) -> NaiveDate {
        match self {
            Self::Monthly { year, month } => {
                NaiveDate::from_ymd_opt(*year, *month, 1).unwrap_or(NaiveDate::MAX)
            }
            Self::Custom { start, .. } => *start,
        }
    }

    /// Last day of the period (inclusive)
    pub fn end_date(&self) -> NaiveDate {
        match self {
            Self::Monthly { year, month } => {
                last_day_of_month(*year, *month).unwrap_or(NaiveDate::MIN)
            }
            Self::Custom { end, .. } => *end,
        }
    }

    /// Inclusive bounds as a tuple
    pub fn bounds(&self) -> (NaiveDate, NaiveDate) {
        (self.start_date(), self.end_date())
    }

    /// Check if a date falls within this period
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start_date() && date <= self.end_date()
    }

    /// Number of days covered (zero for an inverted custom range)
    pub fn days(&self) -> i64 {
        let (start, end) = self.bounds();
        ((end - start).num_days() + 1).max(0)
    }

    /// Split into two disjoint custom ranges at `pivot`
    ///
    /// The first half ends the day before `pivot`, the second starts on it.
    /// Returns None when `pivot` would leave either half empty.
    pub fn split_at(&self, pivot: NaiveDate) -> Option<(Period, Period)> {
        let (start, end) = self.bounds();
        if pivot <= start || pivot > end {
            return None;
        }
        let before = pivot.pred_opt()?;
        Some((Period::custom(start, before), Period::custom(pivot, end)))
    }

    /// Get the next period
    pub fn next(&self) -> Self {
        match self {
            Self::Monthly { year, month } => {
                if *month == 12 {
                    Self::Monthly {
                        year: year.saturating_add(1),
                        month: 1,
                    }
                } else {
                    Self::Monthly {
                        year: *year,
                        month: *month + 1,
                    }
                }
            }
            Self::Custom { start, end } => {
                let duration = *end - *start;
                Self::Custom {
                    start: *end + Duration::days(1),
                    end: *end + duration + Duration::days(1),
                }
            }
        }
    }

    /// Get the previous period
    pub fn prev(&self) -> Self {
        match self {
            Self::Monthly { year, month } => {
                if *month == 1 {
                    Self::Monthly {
                        year: year.saturating_sub(1),
                        month: 12,
                    }
                } else {
                    Self::Monthly {
                        year: *year,
                        month: *month - 1,
                    }
                }
            }
            Self::Custom { start, end } => {
                let duration = *end - *start;
                Self::Custom {
                    start: *start - duration - Duration::days(1),
                    end: *start - Duration::days(1),
                }
            }
        }
    }

    /// Parse a period string
    ///
    /// Formats:
    /// - Monthly: "2025-01"
    /// - Single day: "2025-01-15"
    /// - Range: "2025-01-01..2025-01-15"
    pub fn parse(s: &str) -> Result<Self, PeriodParseError> {
        let s = s.trim();
        let invalid = || PeriodParseError::InvalidFormat(s.to_string());

        if let Some((from, to)) = s.split_once("..") {
            let start = NaiveDate::parse_from_str(from.trim(), "%Y-%m-%d").map_err(|_| invalid())?;
            let end = NaiveDate::parse_from_str(to.trim(), "%Y-%m-%d").map_err(|_| invalid())?;
            if start > end {
                return Err(PeriodParseError::InvertedRange(start, end));
            }
            return Ok(Self::Custom { start, end });
        }

        if let Ok(day) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            return Ok(Self::Custom {
                start: day,
                end: day,
            });
        }

        let (year, month) = s.split_once('-').ok_or_else(invalid)?;
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        if !(1..=12).contains(&month) {
            return Err(PeriodParseError::InvalidMonth(month));
        }

        Self::try_monthly(year, month).map_err(|_| invalid())
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Monthly { year, month } => write!(f, "{:04}-{:02}", year, month),
            Self::Custom { start, end } => write!(
                f,
                "{}..{}",
                start.format("%Y-%m-%d"),
                end.format("%Y-%m-%d")
            ),
        }
    }
}

impl Ord for Period {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.start_date()
            .cmp(&other.start_date())
            .then(self.end_date().cmp(&other.end_date()))
    }
}

impl PartialOrd for Period {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Error type for period parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeriodParseError {
    InvalidFormat(String),
    InvalidMonth(u32),
    InvertedRange(NaiveDate, NaiveDate),
}

impl fmt::Display for PeriodParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeriodParseError::InvalidFormat(s) => write!(f, "Invalid period format: {}", s),
            PeriodParseError::InvalidMonth(m) => write!(f, "Invalid month: {}", m),
            PeriodParseError::InvertedRange(start, end) => {
                write!(f, "Range start {} is after end {}", start, end)
            }
        }
    }
}

impl std::error::Error for PeriodParseError {}
