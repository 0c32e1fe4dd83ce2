//! Budget page
//!
//! The current limit of every category, ready for editing.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::FinanceResult;
use crate::models::{Category, Money};
use crate::services::BudgetService;
use crate::storage::Storage;

#[derive(Debug, Clone, Serialize)]
pub struct BudgetView {
    pub limits: BTreeMap<Category, Money>,
    pub categories: Vec<Category>,
}

impl BudgetView {
    pub fn generate(storage: &Storage) -> FinanceResult<Self> {
        let limits = BudgetService::new(storage).limits()?;

        Ok(Self {
            limits,
            categories: Category::all().to_vec(),
        })
    }

    /// Limit for a category; categories without a budget read as zero
    pub fn limit(&self, category: Category) -> Money {
        self.limits.get(&category).copied().unwrap_or_default()
    }

    /// Sum of all limits
    pub fn total(&self) -> Money {
        self.limits.values().copied().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::FinancePaths;
    use tempfile::TempDir;

    #[test]
    fn test_budget_view_lists_every_category() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FinancePaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::open(paths).unwrap();
        BudgetService::new(&storage)
            .save_all([("Food", "400"), ("Transport", "120.50")])
            .unwrap();

        let view = BudgetView::generate(&storage).unwrap();

        assert_eq!(view.limits.len(), 7);
        assert_eq!(view.limit(Category::Food), Money::from_units(400));
        assert_eq!(view.limit(Category::Salary), Money::zero());
        assert_eq!(view.total(), Money::from_cents(52050));
    }
}
