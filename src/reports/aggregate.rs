//! Per-category aggregation over a date range
//!
//! Sums transaction amounts by category for every transaction dated inside
//! a closed `[start, end]` interval. Sums are exact (integer minor units),
//! so results are independent of input order and additive across disjoint
//! sub-ranges. Totals saturate at the largest representable amount.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::category::name_key;
use crate::models::{Money, Period, Transaction};

/// Totals per category plus a grand total
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AggregateResult {
    /// Category name -> summed amount
    pub totals: BTreeMap<String, Money>,
    /// Sum across all categories
    pub total: Money,
    /// Number of transactions that contributed
    pub transaction_count: usize,
}

impl AggregateResult {
    /// An empty result (no categories, zero total)
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    /// Add one amount under a category
    fn add(&mut self, category: &str, amount: Money) {
        *self.totals.entry(category.to_string()).or_default() += amount;
        self.total += amount;
        self.transaction_count += 1;
    }

    /// Exact-name lookup
    pub fn get(&self, category: &str) -> Option<Money> {
        self.totals.get(category).copied()
    }

    /// Total for a category name, ignoring case and surrounding whitespace
    ///
    /// Several spellings of the same name ("food", "Food") are summed.
    /// Missing categories yield zero.
    pub fn actual_for(&self, category: &str) -> Money {
        let key = name_key(category);
        self.totals
            .iter()
            .filter(|(name, _)| name_key(name) == key)
            .map(|(_, amount)| *amount)
            .sum()
    }

    /// Combine two results category by category
    pub fn merge(mut self, other: &AggregateResult) -> AggregateResult {
        for (category, amount) in &other.totals {
            *self.totals.entry(category.clone()).or_default() += *amount;
        }
        self.total += other.total;
        self.transaction_count += other.transaction_count;
        self
    }

    /// Share of the grand total for a category, as a percentage
    pub fn percentage_of_total(&self, category: &str) -> f64 {
        if self.total.is_zero() {
            return 0.0;
        }
        self.actual_for(category).cents() as f64 / self.total.cents() as f64 * 100.0
    }

    /// Categories ordered by amount, largest first (ties by name)
    pub fn ranked(&self) -> Vec<(&str, Money)> {
        let mut ranked: Vec<_> = self
            .totals
            .iter()
            .map(|(name, amount)| (name.as_str(), *amount))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
        ranked
    }
}

/// Aggregate transactions dated within `[start, end]` by category
///
/// An inverted range matches nothing. Never fails.
pub fn aggregate<'a, I>(transactions: I, start: NaiveDate, end: NaiveDate) -> AggregateResult
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut result = AggregateResult::empty();
    for txn in transactions {
        if txn.date >= start && txn.date <= end {
            result.add(&txn.category, txn.amount);
        }
    }
    result
}

/// Aggregate over a period's inclusive bounds
pub fn aggregate_period<'a, I>(transactions: I, period: &Period) -> AggregateResult
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let (start, end) = period.bounds();
    aggregate(transactions, start, end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LedgerKind;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn expense(day: NaiveDate, category: &str, units: i64) -> Transaction {
        Transaction::new(LedgerKind::Expense, day, category, Money::from_units(units))
    }

    fn sample() -> Vec<Transaction> {
        vec![
            expense(date(2024, 1, 5), "Food", 50),
            expense(date(2024, 1, 20), "Food", 70),
            expense(date(2024, 1, 31), "Rent", 500),
            expense(date(2024, 2, 1), "Food", 30),
            expense(date(2023, 12, 31), "Travel", 200),
        ]
    }

    #[test]
    fn test_two_food_transactions_in_january() {
        let txns = vec![
            expense(date(2024, 1, 5), "Food", 50),
            expense(date(2024, 1, 20), "Food", 70),
        ];
        let result = aggregate(&txns, date(2024, 1, 1), date(2024, 1, 31));

        assert_eq!(result.totals.len(), 1);
        assert_eq!(result.get("Food"), Some(Money::from_units(120)));
        assert_eq!(result.total, Money::from_units(120));
        assert_eq!(result.transaction_count, 2);
    }

    #[test]
    fn test_empty_input() {
        let result = aggregate(&Vec::<Transaction>::new(), date(2024, 1, 1), date(2024, 1, 31));
        assert!(result.is_empty());
        assert_eq!(result.total, Money::zero());

        let inverted = aggregate(&sample(), date(2024, 2, 1), date(2024, 1, 1));
        assert_eq!(inverted, AggregateResult::empty());
    }

    #[test]
    fn test_huge_amounts_saturate_instead_of_overflowing() {
        let day = date(2024, 1, 5);
        let largest = Money::parse("92233720368547758").unwrap();
        let txns = vec![
            Transaction::new(LedgerKind::Expense, day, "House", largest),
            Transaction::new(LedgerKind::Expense, day, "House", largest),
            Transaction::new(LedgerKind::Expense, day, "Food", largest),
        ];
        assert!(txns.iter().all(|t| t.validate().is_ok()));

        let result = aggregate(&txns, day, day);
        assert_eq!(result.get("House"), Some(Money::from_cents(i64::MAX)));
        assert_eq!(result.total, Money::from_cents(i64::MAX));
        assert_eq!(result.transaction_count, 3);

        let merged = result.clone().merge(&result);
        assert_eq!(merged.total, Money::from_cents(i64::MAX));
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let result = aggregate(&sample(), date(2024, 1, 5), date(2024, 1, 31));
        assert_eq!(result.get("Food"), Some(Money::from_units(120)));
        assert_eq!(result.get("Rent"), Some(Money::from_units(500)));
        assert_eq!(result.get("Travel"), None);
    }

    #[test]
    fn test_period_uses_real_month_end() {
        let txns = vec![
            expense(date(2023, 2, 28), "Food", 10),
            expense(date(2023, 3, 1), "Food", 99),
        ];
        let feb = aggregate_period(&txns, &Period::monthly(2023, 2));
        assert_eq!(feb.total, Money::from_units(10));
    }

    #[test]
    fn test_additive_over_partition() {
        let txns = sample();
        let whole = Period::custom(date(2023, 12, 1), date(2024, 2, 29));

        let mut pivot = date(2023, 12, 2);
        while pivot <= whole.end_date() {
            let (left, right) = whole.split_at(pivot).unwrap();
            let merged = aggregate_period(&txns, &left).merge(&aggregate_period(&txns, &right));
            assert_eq!(merged, aggregate_period(&txns, &whole), "pivot {}", pivot);
            pivot = pivot.succ_opt().unwrap();
        }
    }

    #[test]
    fn test_order_independent() {
        let txns = sample();
        let mut reversed = txns.clone();
        reversed.reverse();
        let mut rotated = txns.clone();
        rotated.rotate_left(2);

        let jan = Period::monthly(2024, 1);
        let expected = aggregate_period(&txns, &jan);
        assert_eq!(aggregate_period(&reversed, &jan), expected);
        assert_eq!(aggregate_period(&rotated, &jan), expected);
    }

    #[test]
    fn test_actual_for_ignores_case() {
        let txns = vec![
            expense(date(2024, 1, 5), "food", 5),
            expense(date(2024, 1, 6), "Food", 7),
        ];
        let result = aggregate(&txns, date(2024, 1, 1), date(2024, 1, 31));
        assert_eq!(result.actual_for(" FOOD "), Money::from_units(12));
        assert_eq!(result.actual_for("Rent"), Money::zero());
    }

    #[test]
    fn test_ranked_and_percentages() {
        let result = aggregate_period(&sample(), &Period::monthly(2024, 1));
        let ranked = result.ranked();
        assert_eq!(ranked[0], ("Rent", Money::from_units(500)));
        assert_eq!(ranked[1], ("Food", Money::from_units(120)));

        let food = result.percentage_of_total("Food");
        assert!((food - 120.0 / 620.0 * 100.0).abs() < 1e-9);
        assert_eq!(AggregateResult::empty().percentage_of_total("Food"), 0.0);
    }
}
