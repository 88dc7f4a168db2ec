//! Monthly report
//!
//! Totals for each ledger, an expense breakdown and budget progress for one
//! period, rendered as plain text or CSV.

use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;

use super::aggregate::{aggregate_period, AggregateResult};
use super::progress::{progress_bar, BudgetProgress};
use crate::config::settings::Settings;
use crate::error::{LedgerError, LedgerResult};
use crate::models::{LedgerKind, Money, Period};
use crate::storage::{RecordSource, Storage};

/// Monthly financial summary
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyReport {
    pub period: Period,
    pub income: AggregateResult,
    pub expenses: AggregateResult,
    pub savings: AggregateResult,
    pub budget: BudgetProgress,
}

fn aggregate_source<S: RecordSource + ?Sized>(
    source: &S,
    period: &Period,
) -> LedgerResult<AggregateResult> {
    let (start, end) = period.bounds();
    let transactions = source.query(start, end)?;
    Ok(aggregate_period(&transactions, period))
}

impl MonthlyReport {
    /// Generate the report from the three ledgers in storage
    pub fn generate(storage: &Storage, period: &Period) -> LedgerResult<Self> {
        Self::from_sources(
            &storage.ledger(LedgerKind::Income),
            &storage.ledger(LedgerKind::Expense),
            &storage.ledger(LedgerKind::Savings),
            period,
        )
    }

    /// Generate the report from one source per ledger
    ///
    /// Budget categories are taken from the expense source.
    pub fn from_sources<I, E, S>(
        income: &I,
        expenses: &E,
        savings: &S,
        period: &Period,
    ) -> LedgerResult<Self>
    where
        I: RecordSource + ?Sized,
        E: RecordSource + ?Sized,
        S: RecordSource + ?Sized,
    {
        let expense_totals = aggregate_source(expenses, period)?;
        let categories = expenses.list_categories()?;
        let budget = BudgetProgress::compute(&categories, &expense_totals);

        Ok(Self {
            period: period.clone(),
            income: aggregate_source(income, period)?,
            expenses: expense_totals,
            savings: aggregate_source(savings, period)?,
            budget,
        })
    }

    pub fn total_income(&self) -> Money {
        self.income.total
    }

    pub fn total_expenses(&self) -> Money {
        self.expenses.total
    }

    pub fn total_savings(&self) -> Money {
        self.savings.total
    }

    /// Income left after expenses and savings (may be negative)
    pub fn net(&self) -> Money {
        self.income.total - self.expenses.total - self.savings.total
    }

    /// File name used when saving, e.g. `report_2024_3.txt`
    pub fn file_name(&self) -> String {
        match &self.period {
            Period::Monthly { year, month } => format!("report_{}_{}.txt", year, month),
            Period::Custom { start, end } => format!(
                "report_{}_{}.txt",
                start.format("%Y%m%d"),
                end.format("%Y%m%d")
            ),
        }
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, settings: &Settings) -> String {
        let mut output = String::new();
        let money = |amount: Money| settings.money(amount);

        let title = match &self.period {
            Period::Monthly { year, month } => {
                format!("Monthly Financial Report - {}/{}", month, year)
            }
            period => format!("Financial Report - {}", period),
        };
        output.push_str(&title);
        output.push('\n');
        output.push_str(&"=".repeat(60));
        output.push('\n');

        output.push_str(&format!("{:<20} {:>20}\n", "Total Income:", money(self.total_income())));
        output.push_str(&format!("{:<20} {:>20}\n", "Total Expenses:", money(self.total_expenses())));
        output.push_str(&format!("{:<20} {:>20}\n", "Total Savings:", money(self.total_savings())));
        output.push_str(&format!("{:<20} {:>20}\n", "Net:", money(self.net())));

        if !self.expenses.is_empty() {
            output.push_str("\nExpenses by Category\n");
            output.push_str(&"-".repeat(60));
            output.push('\n');
            for (category, amount) in self.expenses.ranked() {
                output.push_str(&format!("{:<30} {:>20}\n", category, money(amount)));
            }
        }

        if !self.budget.entries.is_empty() {
            output.push_str("\nBudget Progress\n");
            output.push_str(&"-".repeat(60));
            output.push('\n');
            for entry in &self.budget.entries {
                output.push_str(&format!(
                    "{} {:<20} {} {:>5.1}%  {} / {}\n",
                    if entry.over_budget { '!' } else { ' ' },
                    entry.category,
                    progress_bar(entry.ratio, settings.progress_bar_width),
                    entry.percent(),
                    money(entry.actual),
                    money(entry.planned),
                ));
            }

            if self.budget.any_over_budget {
                let over: Vec<&str> = self
                    .budget
                    .over_budget_entries()
                    .map(|e| e.category.as_str())
                    .collect();
                output.push_str(&format!("\nOver budget: {}\n", over.join(", ")));
            }
        }

        output
    }

    /// Write the formatted report into `dir`, returning the file path
    pub fn write_to(&self, dir: &Path, settings: &Settings) -> LedgerResult<PathBuf> {
        std::fs::create_dir_all(dir)
            .map_err(|e| LedgerError::Export(format!("Failed to create {}: {}", dir.display(), e)))?;

        let path = dir.join(self.file_name());
        std::fs::write(&path, self.format_terminal(settings))
            .map_err(|e| LedgerError::Export(format!("Failed to write {}: {}", path.display(), e)))?;

        tracing::info!(path = %path.display(), "wrote monthly report");
        Ok(path)
    }

    /// Export the report to CSV format
    ///
    /// One row per line item: the four totals, each expense category and
    /// each budget category.
    pub fn export_csv<W: Write>(&self, writer: W) -> LedgerResult<()> {
        let export_err = |e: csv::Error| LedgerError::Export(e.to_string());
        let mut csv_writer = csv::Writer::from_writer(writer);
        let period = self.period.to_string();
        let amount = |m: Money| m.to_plain_string();

        csv_writer
            .write_record(["Period", "Section", "Name", "Amount", "Limit", "Progress", "Over Budget"])
            .map_err(export_err)?;

        let totals = [
            ("Income", self.total_income()),
            ("Expenses", self.total_expenses()),
            ("Savings", self.total_savings()),
            ("Net", self.net()),
        ];
        for (name, total) in totals {
            csv_writer
                .write_record(vec![
                    period.clone(),
                    "Total".to_string(),
                    name.to_string(),
                    amount(total),
                    String::new(),
                    String::new(),
                    String::new(),
                ])
                .map_err(export_err)?;
        }

        for (category, spent) in self.expenses.ranked() {
            csv_writer
                .write_record(vec![
                    period.clone(),
                    "Expense".to_string(),
                    category.to_string(),
                    amount(spent),
                    String::new(),
                    String::new(),
                    String::new(),
                ])
                .map_err(export_err)?;
        }

        for entry in &self.budget.entries {
            csv_writer
                .write_record(vec![
                    period.clone(),
                    "Budget".to_string(),
                    entry.category.clone(),
                    amount(entry.actual),
                    amount(entry.planned),
                    format!("{:.4}", entry.ratio),
                    entry.over_budget.to_string(),
                ])
                .map_err(export_err)?;
        }

        csv_writer
            .flush()
            .map_err(|e| LedgerError::Export(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::LedgerPaths;
    use crate::models::{BudgetCategory, Transaction};
    use crate::storage::MemorySource;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn txn(kind: LedgerKind, d: u32, category: &str, units: i64) -> Transaction {
        Transaction::new(
            kind,
            NaiveDate::from_ymd_opt(2024, 3, d).unwrap(),
            category,
            Money::from_units(units),
        )
    }

    fn report() -> MonthlyReport {
        let income = MemorySource::new(vec![txn(LedgerKind::Income, 1, "Salary", 1000)], Vec::new());
        let expenses = MemorySource::new(
            vec![
                txn(LedgerKind::Expense, 5, "Food", 150),
                txn(LedgerKind::Expense, 6, "Rent", 400),
            ],
            vec![
                BudgetCategory::new("Food", Money::from_units(100)),
                BudgetCategory::new("Rent", Money::from_units(800)),
            ],
        );
        let savings = MemorySource::new(vec![txn(LedgerKind::Savings, 31, "House", 200)], Vec::new());

        MonthlyReport::from_sources(&income, &expenses, &savings, &Period::monthly(2024, 3)).unwrap()
    }

    #[test]
    fn test_totals_and_net() {
        let report = report();
        assert_eq!(report.total_income(), Money::from_units(1000));
        assert_eq!(report.total_expenses(), Money::from_units(550));
        assert_eq!(report.total_savings(), Money::from_units(200));
        assert_eq!(report.net(), Money::from_units(250));
        assert!(report.budget.any_over_budget);
    }

    #[test]
    fn test_format_terminal_marks_over_budget() {
        let report = report();
        let settings = Settings {
            progress_bar_width: 10,
            ..Settings::default()
        };
        let text = report.format_terminal(&settings);

        assert!(text.starts_with("Monthly Financial Report - 3/2024"));
        assert!(text.contains("Rp1,000.00"));
        assert!(text.contains("! Food"));
        assert!(text.contains("[##########] 100.0%"));
        assert!(text.contains("[#####-----]  50.0%"));
        assert!(text.contains("Over budget: Food"));
    }

    #[test]
    fn test_write_to_uses_month_file_name() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let path = report().write_to(&paths.report_dir(), &Settings::default()).unwrap();

        assert_eq!(path.file_name().unwrap(), "report_2024_3.txt");
        let contents = std::fs::read_to_string(path).unwrap();
        assert!(contents.contains("Total Savings:"));
    }

    #[test]
    fn test_export_csv_sections() {
        let mut buffer = Vec::new();
        report().export_csv(&mut buffer).unwrap();
        let csv = String::from_utf8(buffer).unwrap();

        assert!(csv.contains("2024-03,Total,Net,250.00,,,"));
        assert!(csv.contains("2024-03,Expense,Rent,400.00,,,"));
        assert!(csv.contains("2024-03,Budget,Food,150.00,100.00,1.0000,true"));
        assert!(csv.contains("2024-03,Budget,Rent,400.00,800.00,0.5000,false"));
    }

    #[test]
    fn test_generate_from_storage() {
        let temp_dir = TempDir::new().unwrap();
        let storage = Storage::new(LedgerPaths::with_base_dir(temp_dir.path().to_path_buf())).unwrap();
        storage
            .transactions
            .upsert(txn(LedgerKind::Income, 2, "Salary", 500))
            .unwrap();
        storage
            .transactions
            .upsert(txn(LedgerKind::Expense, 2, "Food", 50))
            .unwrap();

        let report = MonthlyReport::generate(&storage, &Period::monthly(2024, 3)).unwrap();
        assert_eq!(report.net(), Money::from_units(450));
        assert!(report.budget.entries.is_empty());
    }
}
