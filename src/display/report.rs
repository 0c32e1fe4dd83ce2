//! Report formatting for terminal output
//!
//! Renders the dashboard, statement and budget views.

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use crate::config::settings::Settings;
use crate::models::Money;
use crate::reports::{BudgetSummaryLine, BudgetView, DashboardView, StatementView};

use super::transaction::format_transaction_table;

const WIDTH: usize = 60;
const BAR_WIDTH: usize = 20;

#[derive(Tabled)]
struct SummaryRow {
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Limit")]
    limit: String,
    #[tabled(rename = "Spent")]
    spent: String,
    #[tabled(rename = "Remaining")]
    remaining: String,
    #[tabled(rename = "Used")]
    used: String,
}

#[derive(Tabled)]
struct LimitRow {
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Limit")]
    limit: String,
}

fn money(amount: Money, settings: &Settings) -> String {
    amount.format_with_symbol(&settings.currency_symbol)
}

/// Format a percentage with appropriate precision
pub fn format_percentage(pct: f64) -> String {
    if pct < 0.1 && pct > 0.0 {
        format!("{:.2}%", pct)
    } else if pct < 10.0 {
        format!("{:.1}%", pct)
    } else {
        format!("{:.0}%", pct)
    }
}

/// Create a simple bar chart representation
pub fn format_bar(value: f64, max_value: f64, width: usize) -> String {
    if max_value <= 0.0 || value <= 0.0 {
        return "░".repeat(width);
    }

    let filled = ((value / max_value) * width as f64).round() as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Format a separator line
pub fn separator(width: usize) -> String {
    "─".repeat(width)
}

/// Budget summary table; overspent rows are marked with `*`
pub fn format_budget_summary(lines: &[BudgetSummaryLine], settings: &Settings) -> String {
    if lines.is_empty() {
        return "No category has a budget limit yet. Set one with `fintrack budget set`.\n"
            .to_string();
    }

    let rows = lines.iter().map(|line| SummaryRow {
        category: line.category.to_string(),
        limit: money(line.limit, settings),
        spent: money(line.spent, settings),
        remaining: if line.is_overspent() {
            format!("{} *", money(line.remaining, settings))
        } else {
            money(line.remaining, settings)
        },
        used: format!(
            "{} {}",
            format_bar(line.percent_used(), 100.0, BAR_WIDTH),
            format_percentage(line.percent_used())
        ),
    });

    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .with(Modify::new(Columns::new(1..4)).with(Alignment::right()));

    let mut output = format!("{}\n", table);
    if lines.iter().any(|l| l.is_overspent()) {
        output.push_str("* = Overspent\n");
    }
    output
}

/// Format the dashboard
pub fn format_dashboard(view: &DashboardView, settings: &Settings) -> String {
    let mut output = String::new();

    output.push_str("Dashboard\n");
    output.push_str(&separator(WIDTH));
    output.push('\n');
    output.push_str(&format!("Balance: {}\n\n", money(view.balance, settings)));

    output.push_str("Recent transactions\n");
    output.push_str(&format_transaction_table(&view.recent, settings));
    output.push('\n');

    output.push_str("Budgets\n");
    output.push_str(&format_budget_summary(&view.budget_summary, settings));

    output
}

/// Format a statement with its totals
pub fn format_statement(view: &StatementView, settings: &Settings) -> String {
    let mut output = String::new();

    output.push_str("Statement\n");
    output.push_str(&separator(WIDTH));
    output.push('\n');
    output.push_str(&format_transaction_table(&view.transactions, settings));

    output.push_str(&format!(
        "\n{} transaction(s)  Income: {}  Expenses: {}  Net: {}\n",
        view.transactions.len(),
        money(view.total_income(), settings),
        money(view.total_expenses(), settings),
        money(view.net, settings)
    ));

    output
}

/// Format every category's limit
pub fn format_budget_limits(view: &BudgetView, settings: &Settings) -> String {
    let rows = view.categories.iter().map(|category| LimitRow {
        category: category.to_string(),
        limit: money(view.limit(*category), settings),
    });

    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .with(Modify::new(Columns::last()).with(Alignment::right()));

    format!(
        "{}\nTotal: {}\n",
        table,
        money(view.total(), settings)
    )
}
