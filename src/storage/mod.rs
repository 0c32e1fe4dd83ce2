//! Storage layer for fintrack
//!
//! JSON file storage with atomic writes. [`Storage`] is constructed
//! explicitly and handed to every service; there is no global store handle.

pub mod budgets;
pub mod file_io;
pub mod init;
pub mod transactions;

pub use budgets::BudgetRepository;
pub use file_io::{read_json, write_json_atomic};
pub use init::seed_budgets;
pub use transactions::TransactionRepository;

use crate::config::paths::FinancePaths;
use crate::error::FinanceError;

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: FinancePaths,
    pub transactions: TransactionRepository,
    pub budgets: BudgetRepository,
}

impl Storage {
    /// Create a Storage with empty in-memory repositories
    pub fn new(paths: FinancePaths) -> Result<Self, FinanceError> {
        paths.ensure_directories()?;

        Ok(Self {
            transactions: TransactionRepository::new(paths.transactions_file()),
            budgets: BudgetRepository::new(paths.budgets_file()),
            paths,
        })
    }

    /// Create, load from disk, and seed the category budgets.
    ///
    /// This is the initialization step every entry point should go through.
    pub fn open(paths: FinancePaths) -> Result<Self, FinanceError> {
        let storage = Self::new(paths)?;
        storage.load_all()?;
        seed_budgets(&storage)?;
        Ok(storage)
    }

    pub fn paths(&self) -> &FinancePaths {
        &self.paths
    }

    /// Load all data from disk
    pub fn load_all(&self) -> Result<(), FinanceError> {
        self.transactions.load()?;
        self.budgets.load()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Money, TransactionFields, TransactionType};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    #[test]
    fn test_storage_creation() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FinancePaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();

        assert!(temp_dir.path().join("data").exists());
        assert_eq!(storage.budgets.count().unwrap(), 0);
    }

    #[test]
    fn test_open_seeds_budgets() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FinancePaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::open(paths).unwrap();

        assert_eq!(storage.budgets.count().unwrap(), Category::all().len());
    }

    #[test]
    fn test_reopen_sees_saved_data() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FinancePaths::with_base_dir(temp_dir.path().to_path_buf());

        {
            let storage = Storage::open(paths.clone()).unwrap();
            storage
                .transactions
                .insert(TransactionFields {
                    description: "Salary".into(),
                    amount: Money::from_units(5000),
                    kind: TransactionType::Income,
                    date: NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
                    category: Category::Salary,
                })
                .unwrap();
            storage.transactions.save().unwrap();
        }

        let storage = Storage::open(paths).unwrap();
        assert_eq!(storage.transactions.count().unwrap(), 1);
        assert_eq!(storage.transactions.next_id().unwrap().value(), 2);
    }
}
