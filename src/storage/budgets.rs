//! Budget repository for JSON storage
//!
//! Manages loading and saving budgets to budgets.json, keyed by category.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::FinanceError;
use crate::models::{Budget, Category};

use super::file_io::{read_json, write_json_atomic};

/// On-disk layout of budgets.json
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct BudgetData {
    #[serde(default)]
    budgets: Vec<Budget>,
}

/// Repository for budget persistence
pub struct BudgetRepository {
    path: PathBuf,
    budgets: RwLock<BTreeMap<Category, Budget>>,
}

impl BudgetRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            budgets: RwLock::new(BTreeMap::new()),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, BTreeMap<Category, Budget>>, FinanceError> {
        self.budgets
            .read()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, BTreeMap<Category, Budget>>, FinanceError> {
        self.budgets
            .write()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire write lock: {}", e)))
    }

    /// Load budgets from disk
    ///
    /// If the file lists a category twice, the last entry wins.
    pub fn load(&self) -> Result<(), FinanceError> {
        let file_data: BudgetData = read_json(&self.path)?;
        let mut budgets = self.write()?;

        budgets.clear();
        for budget in file_data.budgets {
            budgets.insert(budget.category, budget);
        }

        tracing::debug!(count = budgets.len(), "loaded budgets");
        Ok(())
    }

    /// Save budgets to disk, in category order
    pub fn save(&self) -> Result<(), FinanceError> {
        let budgets = self.read()?;
        let file_data = BudgetData {
            budgets: budgets.values().cloned().collect(),
        };
        write_json_atomic(&self.path, &file_data)
    }

    pub fn get(&self, category: Category) -> Result<Option<Budget>, FinanceError> {
        Ok(self.read()?.get(&category).cloned())
    }

    /// Get all budgets in category order
    pub fn get_all(&self) -> Result<Vec<Budget>, FinanceError> {
        Ok(self.read()?.values().cloned().collect())
    }

    pub fn contains(&self, category: Category) -> Result<bool, FinanceError> {
        Ok(self.read()?.contains_key(&category))
    }

    /// Insert or replace the budget for its category
    pub fn upsert(&self, budget: Budget) -> Result<(), FinanceError> {
        self.write()?.insert(budget.category, budget);
        Ok(())
    }

    /// Replace several budgets under a single lock
    pub fn upsert_many(&self, batch: Vec<Budget>) -> Result<(), FinanceError> {
        let mut budgets = self.write()?;
        for budget in batch {
            budgets.insert(budget.category, budget);
        }
        Ok(())
    }

    pub fn count(&self) -> Result<usize, FinanceError> {
        Ok(self.read()?.len())
    }
}
