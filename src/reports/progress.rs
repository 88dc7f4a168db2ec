//! Budget progress
//!
//! Joins budget category limits against aggregated actuals. The ratio is
//! clamped to `[0, 1]` for display while the over-budget flag compares the
//! unclamped amounts.

use serde::Serialize;

use super::aggregate::AggregateResult;
use crate::models::{BudgetCategory, Money};

/// Progress of one budget category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressEntry {
    pub category: String,
    pub planned: Money,
    pub actual: Money,
    /// `min(actual / planned, 1)`, or 0 when nothing is planned
    pub ratio: f64,
    /// `actual > planned`
    pub over_budget: bool,
}

impl ProgressEntry {
    /// Build an entry for one category
    pub fn new(category: impl Into<String>, planned: Money, actual: Money) -> Self {
        Self {
            category: category.into(),
            planned,
            actual,
            ratio: progress_ratio(planned, actual),
            over_budget: actual > planned,
        }
    }

    /// Money left before reaching the limit (negative when over)
    pub fn remaining(&self) -> Money {
        self.planned - self.actual
    }

    /// Clamped ratio as a percentage
    pub fn percent(&self) -> f64 {
        self.ratio * 100.0
    }
}

/// `min(actual / planned, 1)` with non-positive limits short-circuited to 0
pub fn progress_ratio(planned: Money, actual: Money) -> f64 {
    if !planned.is_positive() {
        return 0.0;
    }
    let ratio = actual.cents() as f64 / planned.cents() as f64;
    ratio.clamp(0.0, 1.0)
}

/// One entry per category, in input order
pub fn compute_progress(categories: &[BudgetCategory], actuals: &AggregateResult) -> Vec<ProgressEntry> {
    categories
        .iter()
        .map(|category| {
            ProgressEntry::new(
                category.name.clone(),
                category.monthly_limit,
                actuals.actual_for(&category.name),
            )
        })
        .collect()
}

/// Render a ratio as a fixed-width bar, e.g. `[#####-----]`
///
/// The ratio is clamped to `[0, 1]`; a zero width yields `[]`.
pub fn progress_bar(ratio: f64, width: usize) -> String {
    let ratio = if ratio.is_nan() { 0.0 } else { ratio.clamp(0.0, 1.0) };
    let filled = ((ratio * width as f64).round() as usize).min(width);
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}

/// Whether any entry is over budget
pub fn any_over_budget(entries: &[ProgressEntry]) -> bool {
    entries.iter().any(|entry| entry.over_budget)
}

/// Progress entries bundled with the over-budget advisory
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetProgress {
    pub entries: Vec<ProgressEntry>,
    pub any_over_budget: bool,
}

impl BudgetProgress {
    /// Compute progress and raise the advisory when a category is overspent
    pub fn compute(categories: &[BudgetCategory], actuals: &AggregateResult) -> Self {
        let entries = compute_progress(categories, actuals);
        let any_over_budget = any_over_budget(&entries);

        if any_over_budget {
            let over: Vec<&str> = entries
                .iter()
                .filter(|e| e.over_budget)
                .map(|e| e.category.as_str())
                .collect();
            tracing::warn!(categories = ?over, "over budget");
        }

        Self {
            entries,
            any_over_budget,
        }
    }

    /// Entries that exceed their limit
    pub fn over_budget_entries(&self) -> impl Iterator<Item = &ProgressEntry> {
        self.entries.iter().filter(|e| e.over_budget)
    }

    pub fn total_planned(&self) -> Money {
        self.entries.iter().map(|e| e.planned).sum()
    }

    pub fn total_actual(&self) -> Money {
        self.entries.iter().map(|e| e.actual).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LedgerKind, Transaction};
    use crate::reports::aggregate::aggregate;
    use chrono::NaiveDate;

    fn actuals(pairs: &[(&str, i64)]) -> AggregateResult {
        let day = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        let txns: Vec<_> = pairs
            .iter()
            .map(|(cat, units)| {
                Transaction::new(LedgerKind::Expense, day, *cat, Money::from_units(*units))
            })
            .collect();
        aggregate(&txns, day, day)
    }

    #[test]
    fn test_progress_bar_rendering() {
        assert_eq!(progress_bar(0.5, 10), "[#####-----]");
        assert_eq!(progress_bar(0.0, 4), "[----]");
        assert_eq!(progress_bar(1.0, 4), "[####]");
        assert_eq!(progress_bar(3.0, 4), "[####]");
        assert_eq!(progress_bar(f64::NAN, 2), "[--]");
        assert_eq!(progress_bar(0.7, 0), "[]");
    }

    #[test]
    fn test_over_budget_ratio_is_clamped() {
        let categories = vec![BudgetCategory::new("Food", Money::from_units(100))];
        let entries = compute_progress(&categories, &actuals(&[("Food", 150)]));

        assert_eq!(entries.len(), 1);
        let food = &entries[0];
        assert_eq!(food.planned, Money::from_units(100));
        assert_eq!(food.actual, Money::from_units(150));
        assert_eq!(food.ratio, 1.0);
        assert!(food.over_budget);
        assert_eq!(food.remaining(), Money::from_units(-50));
    }

    #[test]
    fn test_zero_limit_without_spending() {
        let categories = vec![BudgetCategory::new("Travel", Money::zero())];
        let entries = compute_progress(&categories, &AggregateResult::empty());

        assert_eq!(
            entries,
            vec![ProgressEntry {
                category: "Travel".into(),
                planned: Money::zero(),
                actual: Money::zero(),
                ratio: 0.0,
                over_budget: false,
            }]
        );
    }

    #[test]
    fn test_zero_limit_with_spending_is_over_but_ratio_zero() {
        let categories = vec![BudgetCategory::new("Travel", Money::zero())];
        let entries = compute_progress(&categories, &actuals(&[("Travel", 10)]));
        assert_eq!(entries[0].ratio, 0.0);
        assert!(entries[0].over_budget);
    }

    #[test]
    fn test_exactly_at_limit_is_not_over() {
        let categories = vec![BudgetCategory::new("Food", Money::from_units(100))];
        let entries = compute_progress(&categories, &actuals(&[("Food", 100)]));
        assert_eq!(entries[0].ratio, 1.0);
        assert!(!entries[0].over_budget);
    }

    #[test]
    fn test_ratio_in_unit_interval() {
        for planned in [0, 1, 7, 100, 1_000_000] {
            for actual in [0, 1, 50, 99, 100, 101, 5_000_000] {
                let r = progress_ratio(Money::from_cents(planned), Money::from_cents(actual));
                assert!((0.0..=1.0).contains(&r), "planned {} actual {}", planned, actual);
            }
        }
        assert_eq!(progress_ratio(Money::from_cents(-100), Money::from_cents(50)), 0.0);
    }

    #[test]
    fn test_preserves_category_order() {
        let categories = vec![
            BudgetCategory::new("Rent", Money::from_units(500)),
            BudgetCategory::new("Food", Money::from_units(100)),
            BudgetCategory::new("Bills", Money::from_units(50)),
        ];
        let entries = compute_progress(&categories, &actuals(&[("Food", 25), ("Bills", 60)]));
        let names: Vec<_> = entries.iter().map(|e| e.category.as_str()).collect();
        assert_eq!(names, vec!["Rent", "Food", "Bills"]);
        assert_eq!(entries[1].percent(), 25.0);
    }

    #[test]
    fn test_budget_progress_flag() {
        let categories = vec![
            BudgetCategory::new("Food", Money::from_units(100)),
            BudgetCategory::new("Bills", Money::from_units(50)),
        ];
        let ok = BudgetProgress::compute(&categories, &actuals(&[("Food", 20)]));
        assert!(!ok.any_over_budget);

        let over = BudgetProgress::compute(&categories, &actuals(&[("Bills", 60)]));
        assert!(over.any_over_budget);
        assert_eq!(over.over_budget_entries().count(), 1);
        assert_eq!(over.total_planned(), Money::from_units(150));
        assert_eq!(over.total_actual(), Money::from_units(60));
    }

    #[test]
    fn test_empty_categories() {
        let progress = BudgetProgress::compute(&[], &actuals(&[("Food", 20)]));
        assert!(progress.entries.is_empty());
        assert!(!progress.any_over_budget);
    }
}
