//! Budget category model
//!
//! A budget category pairs an expense category name with a monthly spending
//! limit. Names are unique, compared case-insensitively.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::money::Money;

/// A budget category with its monthly limit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetCategory {
    /// Category name (unique key)
    pub name: String,

    /// Planned spending per month
    pub monthly_limit: Money,

    /// Display order
    #[serde(default)]
    pub sort_order: i32,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl BudgetCategory {
    /// Create a new budget category
    pub fn new(name: impl Into<String>, monthly_limit: Money) -> Self {
        let now = Utc::now();
        Self {
            name: name.into().trim().to_string(),
            monthly_limit,
            sort_order: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Create a category with a specific sort order
    pub fn with_sort_order(name: impl Into<String>, monthly_limit: Money, sort_order: i32) -> Self {
        let mut category = Self::new(name, monthly_limit);
        category.sort_order = sort_order;
        category
    }

    /// Case-insensitive lookup key
    pub fn key(&self) -> String {
        name_key(&self.name)
    }

    /// Change the limit
    pub fn set_limit(&mut self, limit: Money) {
        self.monthly_limit = limit;
        self.updated_at = Utc::now();
    }

    /// Validate the category
    pub fn validate(&self) -> Result<(), CategoryValidationError> {
        if self.name.trim().is_empty() {
            return Err(CategoryValidationError::EmptyName);
        }

        if self.name.len() > 50 {
            return Err(CategoryValidationError::NameTooLong(self.name.len()));
        }

        if self.monthly_limit.is_negative() {
            return Err(CategoryValidationError::NegativeLimit(self.monthly_limit));
        }

        Ok(())
    }
}

/// Normalized key for category name comparison
pub fn name_key(name: &str) -> String {
    name.trim().to_lowercase()
}

impl fmt::Display for BudgetCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (limit {})", self.name, self.monthly_limit)
    }
}

/// Validation errors for budget categories
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryValidationError {
    EmptyName,
    NameTooLong(usize),
    NegativeLimit(Money),
}

impl fmt::Display for CategoryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Category name cannot be empty"),
            Self::NameTooLong(len) => {
                write!(f, "Category name too long ({} chars, max 50)", len)
            }
            Self::NegativeLimit(limit) => {
                write!(f, "Monthly limit must not be negative (got {})", limit)
            }
        }
    }
}

impl std::error::Error for CategoryValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_category() {
        let cat = BudgetCategory::new(" Food ", Money::from_units(100));
        assert_eq!(cat.name, "Food");
        assert_eq!(cat.key(), "food");
        assert!(cat.validate().is_ok());
    }

    #[test]
    fn test_validation() {
        assert_eq!(
            BudgetCategory::new("", Money::zero()).validate(),
            Err(CategoryValidationError::EmptyName)
        );
        assert!(matches!(
            BudgetCategory::new("x".repeat(51), Money::zero()).validate(),
            Err(CategoryValidationError::NameTooLong(51))
        ));
        assert!(matches!(
            BudgetCategory::new("Food", Money::from_cents(-1)).validate(),
            Err(CategoryValidationError::NegativeLimit(_))
        ));
    }

    #[test]
    fn test_zero_limit_is_valid() {
        assert!(BudgetCategory::new("Travel", Money::zero()).validate().is_ok());
    }

    #[test]
    fn test_set_limit_touches_updated_at() {
        let mut cat = BudgetCategory::new("Food", Money::from_units(100));
        let before = cat.updated_at;
        cat.set_limit(Money::from_units(200));
        assert_eq!(cat.monthly_limit, Money::from_units(200));
        assert!(cat.updated_at >= before);
    }
}
