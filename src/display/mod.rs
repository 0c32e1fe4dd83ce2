//! Display formatting for terminal output
//!
//! Tables for transactions and the report views. Amounts use the configured
//! currency symbol and dates the configured date format.

pub mod report;
pub mod transaction;

pub use report::{
    format_budget_limits, format_budget_summary, format_dashboard, format_statement,
};
pub use transaction::{
    format_date, format_signed_amount, format_transaction_details, format_transaction_table,
};
