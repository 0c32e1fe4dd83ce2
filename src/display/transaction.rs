//! Transaction display formatting
//!
//! Tables and detail views of transactions for the terminal.

use std::fmt::Write;

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use crate::config::settings::Settings;
use crate::models::{Money, Transaction, TransactionType};
use crate::services::INPUT_DATE_FORMAT;

/// One row of a transaction table
#[derive(Tabled)]
struct TransactionRow {
    #[tabled(rename = "#")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

/// Render a date with the configured display format.
///
/// Falls back to ISO dates if the format can't be rendered.
pub fn format_date(date: chrono::NaiveDate, settings: &Settings) -> String {
    let mut out = String::new();
    if write!(out, "{}", date.format(&settings.date_format)).is_err() {
        return date.format(INPUT_DATE_FORMAT).to_string();
    }
    out
}

/// Render a signed amount: expenses get a leading minus
pub fn format_signed_amount(kind: TransactionType, amount: Money, settings: &Settings) -> String {
    kind.signed(amount).format_with_symbol(&settings.currency_symbol)
}

/// Format a list of transactions as a table
pub fn format_transaction_table(transactions: &[Transaction], settings: &Settings) -> String {
    if transactions.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let rows = transactions.iter().map(|txn| TransactionRow {
        id: txn.id.to_string(),
        date: format_date(txn.date, settings),
        description: truncate(&txn.description, 40),
        category: txn.category.to_string(),
        amount: format_signed_amount(txn.kind, txn.amount, settings),
    });

    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .with(Modify::new(Columns::last()).with(Alignment::right()));

    format!("{}\n", table)
}

/// Format transaction details for display
pub fn format_transaction_details(txn: &Transaction, settings: &Settings) -> String {
    let mut output = String::new();

    output.push_str(&format!("Transaction: #{}\n", txn.id));
    output.push_str(&format!("Date:        {}\n", format_date(txn.date, settings)));
    output.push_str(&format!("Description: {}\n", txn.description));
    output.push_str(&format!("Type:        {}\n", txn.kind));
    output.push_str(&format!(
        "Amount:      {}\n",
        txn.amount.format_with_symbol(&settings.currency_symbol)
    ));
    output.push_str(&format!("Category:    {}\n", txn.category));
    output.push_str(&format!(
        "Updated:     {}\n",
        txn.updated_at.format("%Y-%m-%d %H:%M UTC")
    ));

    output
}

/// Truncate a string to a maximum length, adding "..." if truncated
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{}...", head)
    }
}
