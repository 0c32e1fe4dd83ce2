//! Budget CLI commands
//!
//! Implements CLI commands for viewing and setting category budget limits.

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::report::format_budget_limits;
use crate::error::{FinanceError, FinanceResult};
use crate::models::Category;
use crate::reports::BudgetView;
use crate::services::BudgetService;
use crate::storage::Storage;

/// Budget subcommands
#[derive(Subcommand)]
pub enum BudgetCommands {
    /// Show every category's limit
    Show {
        /// Print the view as JSON
        #[arg(long)]
        json: bool,
    },

    /// Set the limit of one category
    Set {
        /// Category name
        category: String,
        /// Limit (e.g., "2000" or "150.50"); 0 stops tracking the category
        limit: String,
    },

    /// Replace all limits at once; categories left out are set to 0
    Save {
        /// Entries of the form Category=limit (e.g., Food=500 Housing=2000)
        entries: Vec<String>,
    },
}

/// Split `Category=limit` entries into form fields
fn parse_entries(entries: &[String]) -> FinanceResult<Vec<(String, String)>> {
    entries
        .iter()
        .map(|entry| {
            entry
                .split_once('=')
                .map(|(key, value)| (key.trim().to_string(), value.trim().to_string()))
                .ok_or_else(|| {
                    FinanceError::Validation(format!(
                        "Invalid entry: '{}'. Use Category=limit (e.g., Food=500)",
                        entry
                    ))
                })
        })
        .collect()
}

/// Handle a budget command
pub fn handle_budget_command(
    storage: &Storage,
    settings: &Settings,
    cmd: BudgetCommands,
) -> FinanceResult<()> {
    let service = BudgetService::new(storage);

    match cmd {
        BudgetCommands::Show { json } => {
            let view = BudgetView::generate(storage)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&view)?);
            } else {
                print!("{}", format_budget_limits(&view, settings));
            }
        }

        BudgetCommands::Set { category, limit } => {
            let category: Category = category
                .parse()
                .map_err(|e| FinanceError::Validation(format!("{}", e)))?;
            let budget = service.set_limit_str(category, &limit)?;
            println!(
                "Budget for {} set to {}",
                budget.category,
                budget.limit.format_with_symbol(&settings.currency_symbol)
            );
        }

        BudgetCommands::Save { entries } => {
            let form = parse_entries(&entries)?;
            let saved = service.save_all(form)?;
            let tracked = saved.iter().filter(|b| b.is_tracked()).count();
            println!(
                "Budgets saved: {} of {} categories tracked",
                tracked,
                saved.len()
            );
        }
    }

    Ok(())
}
