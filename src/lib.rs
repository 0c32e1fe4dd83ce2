//! fintrack - Terminal personal finance tracker
//!
//! This library provides the core of the fintrack application: recording
//! income and expense transactions, a running balance, and spending tracked
//! against per-category budget limits.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (transactions, budgets, categories, money)
//! - `storage`: JSON file storage layer
//! - `services`: Validation, filtering and mutations
//! - `reports`: Aggregates and the dashboard/statement/budget views
//! - `display`: Terminal formatting
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use fintrack::config::paths::FinancePaths;
//! use fintrack::reports::DashboardView;
//! use fintrack::storage::Storage;
//!
//! let storage = Storage::open(FinancePaths::new()?)?;
//! let dashboard = DashboardView::generate(&storage, 5)?;
//! println!("Balance: {}", dashboard.balance);
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{FinanceError, FinanceResult};
