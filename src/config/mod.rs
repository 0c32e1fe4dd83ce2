//! Configuration module for fintrack
//!
//! - Base/data directory resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::FinancePaths;
pub use settings::Settings;
