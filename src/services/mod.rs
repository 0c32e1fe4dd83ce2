//! Service layer for fintrack
//!
//! The service layer provides business logic on top of the storage layer:
//! parsing raw input, validation, filtering, and saving after each change.

pub mod budget;
pub mod transaction;

pub use budget::BudgetService;
pub use transaction::{
    Criterion, StatementQuery, TransactionFilter, TransactionInput, TransactionService,
    INPUT_DATE_FORMAT,
};
