//! Itinerary model
//!
//! A planned stop on a shared trip, with an optional estimated cost.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::ItineraryId;
use super::money::Money;

/// A single itinerary entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItineraryItem {
    pub id: ItineraryId,

    /// Planned date
    pub date: NaiveDate,

    /// Where
    pub destination: String,

    /// What
    #[serde(default)]
    pub activity: String,

    #[serde(default)]
    pub estimated_cost: Money,

    #[serde(default)]
    pub notes: String,

    pub created_at: DateTime<Utc>,
}

impl ItineraryItem {
    pub fn new(date: NaiveDate, destination: impl Into<String>) -> Self {
        Self {
            id: ItineraryId::new(),
            date,
            destination: destination.into().trim().to_string(),
            activity: String::new(),
            estimated_cost: Money::zero(),
            notes: String::new(),
            created_at: Utc::now(),
        }
    }

    pub fn with_activity(mut self, activity: impl Into<String>) -> Self {
        self.activity = activity.into();
        self
    }

    pub fn with_cost(mut self, cost: Money) -> Self {
        self.estimated_cost = cost;
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    pub fn validate(&self) -> Result<(), ItineraryValidationError> {
        if self.destination.is_empty() {
            return Err(ItineraryValidationError::EmptyDestination);
        }
        if self.estimated_cost.is_negative() {
            return Err(ItineraryValidationError::NegativeCost(self.estimated_cost));
        }
        Ok(())
    }
}

impl fmt::Display for ItineraryItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.date.format("%Y-%m-%d"), self.destination)?;
        if !self.activity.is_empty() {
            write!(f, " ({})", self.activity)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItineraryValidationError {
    EmptyDestination,
    NegativeCost(Money),
}

impl fmt::Display for ItineraryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyDestination => write!(f, "Destination cannot be empty"),
            Self::NegativeCost(cost) => {
                write!(f, "Estimated cost must not be negative (got {})", cost)
            }
        }
    }
}

impl std::error::Error for ItineraryValidationError {}
