//! CLI commands for reports
//!
//! The dashboard and the filtered statement.

use clap::Args;

use crate::config::settings::Settings;
use crate::display::report::{format_dashboard, format_statement};
use crate::error::FinanceResult;
use crate::reports::{DashboardView, StatementView};
use crate::services::StatementQuery;
use crate::storage::Storage;

/// Arguments for the dashboard
#[derive(Args, Debug)]
pub struct DashboardArgs {
    /// Number of recent transactions to show (defaults to the setting)
    #[arg(short = 'n', long)]
    pub recent: Option<usize>,

    /// Print the view as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the statement; "All" or "Todos" means no filter
#[derive(Args, Debug)]
pub struct StatementArgs {
    /// Only this category
    #[arg(short, long)]
    pub category: Option<String>,

    /// Only Income or Expense
    #[arg(short = 't', long = "type")]
    pub kind: Option<String>,

    /// Only this month (1-12)
    #[arg(short, long)]
    pub month: Option<String>,

    /// Only this year
    #[arg(short, long)]
    pub year: Option<String>,

    /// Print the view as JSON
    #[arg(long)]
    pub json: bool,
}

impl StatementArgs {
    fn query(&self) -> StatementQuery {
        StatementQuery {
            category: self.category.clone(),
            kind: self.kind.clone(),
            month: self.month.clone(),
            year: self.year.clone(),
        }
    }
}

/// Handle the dashboard command
pub fn handle_dashboard_command(
    storage: &Storage,
    settings: &Settings,
    args: DashboardArgs,
) -> FinanceResult<()> {
    let recent = args.recent.unwrap_or(settings.recent_transactions);
    let view = DashboardView::generate(storage, recent)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        print!("{}", format_dashboard(&view, settings));
    }

    Ok(())
}

/// Handle the statement command
pub fn handle_statement_command(
    storage: &Storage,
    settings: &Settings,
    args: StatementArgs,
) -> FinanceResult<()> {
    let filter = args.query().to_filter();
    tracing::debug!(?filter, "statement filter");
    let view = StatementView::generate(storage, &filter)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        print!("{}", format_statement(&view, settings));
    }

    Ok(())
}
