//! Budget service
//!
//! Maintains per-category monthly limits and answers "how far along is each
//! category this period" through a [`RecordSource`].

use serde::Serialize;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{BudgetCategory, LedgerKind, Money, Period};
use crate::reports::aggregate::aggregate_period;
use crate::reports::progress::BudgetProgress;
use crate::storage::{RecordSource, Storage};

/// Service for budget category management
pub struct BudgetService<'a> {
    storage: &'a Storage,
}

/// Budget progress for one period
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodProgress {
    pub period: Period,
    #[serde(flatten)]
    pub progress: BudgetProgress,
}

impl PeriodProgress {
    pub fn any_over_budget(&self) -> bool {
        self.progress.any_over_budget
    }
}

/// Budget progress of any record source over a period
///
/// Only transactions inside the period count toward a category's actual.
pub fn progress_for<S: RecordSource + ?Sized>(
    source: &S,
    period: &Period,
) -> LedgerResult<PeriodProgress> {
    let (start, end) = period.bounds();
    let transactions = source.query(start, end)?;
    let categories = source.list_categories()?;

    let actuals = aggregate_period(&transactions, period);
    tracing::debug!(
        %period,
        transactions = actuals.transaction_count,
        categories = categories.len(),
        "computing budget progress"
    );

    Ok(PeriodProgress {
        period: period.clone(),
        progress: BudgetProgress::compute(&categories, &actuals),
    })
}

impl<'a> BudgetService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Set the monthly limit of a category, creating it if needed
    pub fn set_limit(&self, name: &str, limit: Money) -> LedgerResult<BudgetCategory> {
        let category = match self.storage.budget.get(name)? {
            Some(mut existing) => {
                existing.set_limit(limit);
                existing
            }
            None => BudgetCategory::with_sort_order(name, limit, self.storage.budget.next_sort_order()?),
        };

        category
            .validate()
            .map_err(|e| LedgerError::Validation(e.to_string()))?;

        self.storage.budget.upsert(category.clone())?;
        self.storage.budget.save()?;

        tracing::info!(category = %category.name, limit = %limit, "set budget limit");
        Ok(category)
    }

    /// Remove a category's budget
    pub fn remove(&self, name: &str) -> LedgerResult<BudgetCategory> {
        let removed = self
            .storage
            .budget
            .remove(name)?
            .ok_or_else(|| LedgerError::category_not_found(name))?;
        self.storage.budget.save()?;

        tracing::info!(category = %removed.name, "removed budget category");
        Ok(removed)
    }

    /// All categories in display order
    pub fn list(&self) -> LedgerResult<Vec<BudgetCategory>> {
        self.storage.budget.get_all()
    }

    /// Progress of every category against expenses in the period
    pub fn progress(&self, period: &Period) -> LedgerResult<PeriodProgress> {
        progress_for(&self.storage.ledger(LedgerKind::Expense), period)
    }
}
