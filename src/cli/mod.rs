//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod budget;
pub mod report;
pub mod transaction;

pub use budget::{handle_budget_command, BudgetCommands};
pub use report::{
    handle_dashboard_command, handle_statement_command, DashboardArgs, StatementArgs,
};
pub use transaction::{handle_transaction_command, TransactionCommands};
