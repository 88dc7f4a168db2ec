//! Transaction display formatting
//!
//! Renders ledger listings as tables and single transactions as detail views.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::config::settings::Settings;
use crate::models::Transaction;

#[derive(Tabled)]
struct TransactionRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Who")]
    who: String,
    #[tabled(rename = "Memo")]
    memo: String,
}

/// Format a list of transactions as a table
pub fn format_transaction_table(transactions: &[Transaction], settings: &Settings) -> String {
    if transactions.is_empty() {
        return "No transactions found.".to_string();
    }

    let rows = transactions.iter().map(|txn| TransactionRow {
        id: txn.id.to_string(),
        date: txn.date.format(&settings.date_format).to_string(),
        category: txn.category.clone(),
        amount: settings.money(txn.amount),
        who: [txn.tags.contributor.as_deref(), txn.tags.account.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" / "),
        memo: truncate(&txn.memo, 30),
    });

    let total: crate::models::Money = transactions.iter().map(|t| t.amount).sum();

    let mut output = Table::new(rows).with(Style::psql()).to_string();
    output.push_str(&format!(
        "\n{} transaction(s), total {}",
        transactions.len(),
        settings.money(total)
    ));
    output
}

/// Format transaction details for display
pub fn format_transaction_details(txn: &Transaction, settings: &Settings) -> String {
    let mut output = String::new();

    output.push_str(&format!("Transaction: {}\n", txn.id));
    output.push_str(&format!("Ledger:      {}\n", txn.kind));
    output.push_str(&format!("Date:        {}\n", txn.date.format(&settings.date_format)));
    output.push_str(&format!("Category:    {}\n", txn.category));
    output.push_str(&format!("Amount:      {}\n", settings.money(txn.amount)));

    if let Some(account) = &txn.tags.account {
        output.push_str(&format!("Account:     {}\n", account));
    }
    if let Some(contributor) = &txn.tags.contributor {
        output.push_str(&format!("Contributor: {}\n", contributor));
    }
    if !txn.memo.is_empty() {
        output.push_str(&format!("Memo:        {}\n", txn.memo));
    }

    output
}

/// Shorten to `max_len` characters, marking the cut with "..."
pub(crate) fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        return s.to_string();
    }
    let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
    format!("{}...", kept)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LedgerKind, Money, Tags};
    use chrono::NaiveDate;

    fn txn() -> Transaction {
        Transaction::new(
            LedgerKind::Expense,
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            "Groceries",
            Money::from_units(125_000),
        )
        .with_tags(Tags::new(None, Some("Sam".into())))
        .with_memo("weekly shop")
    }

    #[test]
    fn test_table_contains_rows_and_total() {
        let table = format_transaction_table(&[txn(), txn()], &Settings::default());
        assert!(table.contains("Groceries"));
        assert!(table.contains("Rp125,000.00"));
        assert!(table.contains("Sam"));
        assert!(table.contains("2 transaction(s), total Rp250,000.00"));
    }

    #[test]
    fn test_empty_table() {
        assert_eq!(
            format_transaction_table(&[], &Settings::default()),
            "No transactions found."
        );
    }

    #[test]
    fn test_details() {
        let details = format_transaction_details(&txn(), &Settings::default());
        assert!(details.contains("Ledger:      Expense"));
        assert!(details.contains("Contributor: Sam"));
        assert!(!details.contains("Account:"));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a much longer memo", 10), "a much ...");
    }
}
