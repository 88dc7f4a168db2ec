//! Spending Report
//!
//! Generates spending analysis by category for a given period.

use std::io::Write;

use serde::Serialize;

use super::aggregate::{aggregate_period, AggregateResult};
use crate::config::settings::Settings;
use crate::error::{LedgerError, LedgerResult};
use crate::models::{Money, Period};
use crate::storage::RecordSource;

/// Spending in one category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpendingByCategory {
    pub category: String,
    pub amount: Money,
    /// Share of total spending
    pub percentage: f64,
}

/// Spending Report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpendingReport {
    pub period: Period,
    /// Categories, most spending first
    pub categories: Vec<SpendingByCategory>,
    pub total_spending: Money,
    pub total_transactions: usize,
}

impl SpendingReport {
    /// Generate a spending report over the expense records of a source
    pub fn generate<S: RecordSource + ?Sized>(source: &S, period: &Period) -> LedgerResult<Self> {
        let (start, end) = period.bounds();
        let transactions = source.query(start, end)?;
        Ok(Self::from_aggregate(period.clone(), &aggregate_period(&transactions, period)))
    }

    /// Build the report from already-aggregated totals
    pub fn from_aggregate(period: Period, actuals: &AggregateResult) -> Self {
        let total = actuals.total;
        let categories = actuals
            .ranked()
            .into_iter()
            .map(|(category, amount)| SpendingByCategory {
                category: category.to_string(),
                amount,
                percentage: if total.is_zero() {
                    0.0
                } else {
                    amount.cents() as f64 / total.cents() as f64 * 100.0
                },
            })
            .collect();

        Self {
            period,
            categories,
            total_spending: total,
            total_transactions: actuals.transaction_count,
        }
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, settings: &Settings) -> String {
        let mut output = String::new();

        output.push_str(&format!("Spending Report: {}\n", self.period));
        output.push_str(&"=".repeat(60));
        output.push('\n');
        output.push_str(&format!(
            "Total Spending: {}\n",
            settings.money(self.total_spending)
        ));
        output.push_str(&format!("Total Transactions: {}\n\n", self.total_transactions));

        if self.categories.is_empty() {
            output.push_str("No spending in this period.\n");
            return output;
        }

        output.push_str(&format!("{:<30} {:>18} {:>8}\n", "Category", "Amount", "%"));
        output.push_str(&"-".repeat(60));
        output.push('\n');

        for row in &self.categories {
            output.push_str(&format!(
                "{:<30} {:>18} {:>7.1}%\n",
                row.category,
                settings.money(row.amount),
                row.percentage
            ));
        }

        output.push_str(&"-".repeat(60));
        output.push('\n');
        output.push_str(&format!(
            "{:<30} {:>18}\n",
            "TOTAL",
            settings.money(self.total_spending)
        ));

        output
    }

    /// Export the report to CSV format
    pub fn export_csv<W: Write>(&self, writer: W) -> LedgerResult<()> {
        let export_err = |e: csv::Error| LedgerError::Export(e.to_string());
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer
            .write_record(["Period", "Category", "Amount", "Percentage"])
            .map_err(export_err)?;

        let period = self.period.to_string();
        for row in &self.categories {
            csv_writer
                .write_record(vec![
                    period.clone(),
                    row.category.clone(),
                    row.amount.to_plain_string(),
                    format!("{:.2}", row.percentage),
                ])
                .map_err(export_err)?;
        }

        csv_writer
            .write_record(vec![
                period,
                "TOTAL".to_string(),
                self.total_spending.to_plain_string(),
                "100.00".to_string(),
            ])
            .map_err(export_err)?;

        csv_writer
            .flush()
            .map_err(|e| LedgerError::Export(e.to_string()))
    }

    /// Top spending categories
    pub fn top_categories(&self, limit: usize) -> &[SpendingByCategory] {
        &self.categories[..limit.min(self.categories.len())]
    }
}
