//! Storage initialization
//!
//! Makes sure every category in the fixed set has a budget row. Safe to run
//! on every start: categories that already have a budget are left alone.

use crate::error::FinanceError;
use crate::models::{Budget, Category};

use super::Storage;

/// Insert a zero-limit budget for each category that lacks one.
///
/// Returns the number of budgets created. Budgets are only saved when
/// something was inserted.
pub fn seed_budgets(storage: &Storage) -> Result<usize, FinanceError> {
    let mut created = 0;

    for category in Category::all() {
        if !storage.budgets.contains(*category)? {
            storage.budgets.upsert(Budget::new(*category))?;
            created += 1;
        }
    }

    if created > 0 {
        storage.budgets.save()?;
        tracing::info!(created, "seeded missing category budgets");
    }

    Ok(created)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::FinancePaths;
    use crate::models::Money;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = FinancePaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_seed_creates_one_budget_per_category() {
        let (_temp_dir, storage) = create_test_storage();
        assert_eq!(storage.budgets.count().unwrap(), 0);

        let created = seed_budgets(&storage).unwrap();

        assert_eq!(created, Category::all().len());
        assert_eq!(storage.budgets.count().unwrap(), 7);
        for category in Category::all() {
            assert!(storage.budgets.contains(*category).unwrap());
        }
        assert!(storage.paths().budgets_file().exists());
        for budget in storage.budgets.get_all().unwrap() {
            assert!(budget.limit.is_zero());
        }
    }

    #[test]
    fn test_seed_is_idempotent_and_keeps_limits() {
        let (_temp_dir, storage) = create_test_storage();
        seed_budgets(&storage).unwrap();
        storage
            .budgets
            .upsert(Budget::with_limit(Category::Housing, Money::from_units(2000)))
            .unwrap();

        let created = seed_budgets(&storage).unwrap();

        assert_eq!(created, 0);
        assert_eq!(storage.budgets.count().unwrap(), 7);
        let housing = storage.budgets.get(Category::Housing).unwrap().unwrap();
        assert_eq!(housing.limit.cents(), 200000);
    }

    #[test]
    fn test_seed_fills_gaps_only() {
        let (_temp_dir, storage) = create_test_storage();
        storage
            .budgets
            .upsert(Budget::with_limit(Category::Food, Money::from_units(400)))
            .unwrap();

        let created = seed_budgets(&storage).unwrap();

        assert_eq!(created, 6);
        let food = storage.budgets.get(Category::Food).unwrap().unwrap();
        assert_eq!(food.limit.cents(), 40000);
    }
}
