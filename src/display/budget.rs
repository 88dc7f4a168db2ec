//! Budget display formatting
//!
//! Category limits as a table, and per-category progress as bars.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::config::settings::Settings;
use crate::models::BudgetCategory;
use crate::reports::progress_bar;
use crate::services::PeriodProgress;

#[derive(Tabled)]
struct BudgetRow {
    #[tabled(rename = "Category")]
    name: String,
    #[tabled(rename = "Monthly Limit")]
    limit: String,
}

/// Format budget categories and their limits
pub fn format_budget_list(categories: &[BudgetCategory], settings: &Settings) -> String {
    if categories.is_empty() {
        return "No budget categories. Add one with `ledger budget set <category> <limit>`."
            .to_string();
    }

    let rows = categories.iter().map(|c| BudgetRow {
        name: c.name.clone(),
        limit: settings.money(c.monthly_limit),
    });
    Table::new(rows).with(Style::psql()).to_string()
}

/// Format budget progress with one bar per category
///
/// Over-budget categories are prefixed with `!`, and a warning banner is
/// appended when any category is over.
pub fn format_budget_progress(progress: &PeriodProgress, settings: &Settings) -> String {
    let mut output = String::new();
    output.push_str(&format!("Budget Progress: {}\n", progress.period));

    let entries = &progress.progress.entries;
    if entries.is_empty() {
        output.push_str("No budget categories.\n");
        return output;
    }

    let name_width = entries
        .iter()
        .map(|e| e.category.chars().count())
        .max()
        .unwrap_or(8)
        .max(8);

    output.push_str(&"-".repeat(name_width + settings.progress_bar_width + 40));
    output.push('\n');

    for entry in entries {
        output.push_str(&format!(
            "{} {:<name_width$} {} {:>5.1}%  {} / {}\n",
            if entry.over_budget { '!' } else { ' ' },
            entry.category,
            progress_bar(entry.ratio, settings.progress_bar_width),
            entry.percent(),
            settings.money(entry.actual),
            settings.money(entry.planned),
            name_width = name_width,
        ));
    }

    output.push_str(&format!(
        "  {:<name_width$} {} / {}\n",
        "Total",
        settings.money(progress.progress.total_actual()),
        settings.money(progress.progress.total_planned()),
        name_width = name_width + settings.progress_bar_width + 9,
    ));

    if progress.any_over_budget() {
        let over: Vec<String> = progress
            .progress
            .over_budget_entries()
            .map(|e| format!("{} ({} over)", e.category, settings.money(-e.remaining())))
            .collect();
        output.push_str(&format!("\nWARNING: over budget in {}\n", over.join(", ")));
    }

    output
}
