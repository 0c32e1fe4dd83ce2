//! Reports module for fintrack
//!
//! The aggregate engine (balance, spending per category, budget summary)
//! and the three views built on it: dashboard, statement, and budgets.

pub mod aggregate;
pub mod budget;
pub mod dashboard;
pub mod statement;

pub use aggregate::{
    build_budget_summary, calculate_balance, calculate_spend_by_category, BudgetSummaryLine,
};
pub use budget::BudgetView;
pub use dashboard::DashboardView;
pub use statement::{month_names, StatementView};
