//! Core data models for fintrack
//!
//! Transactions, budgets, the fixed category set, and the value types they
//! are built from.

pub mod budget;
pub mod category;
pub mod ids;
pub mod money;
pub mod transaction;

pub use budget::{Budget, BudgetValidationError};
pub use category::{Category, UnknownCategory};
pub use ids::TransactionId;
pub use money::{Money, MoneyParseError, MAX_AMOUNT};
pub use transaction::{
    Transaction, TransactionFields, TransactionType, TransactionValidationError,
    MAX_DESCRIPTION_LEN,
};
