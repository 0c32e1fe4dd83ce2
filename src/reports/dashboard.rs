//! Dashboard
//!
//! Current balance, the latest transactions, and how each tracked category is
//! doing against its limit.

use serde::Serialize;

use crate::error::FinanceResult;
use crate::models::{Category, Money, Transaction};
use crate::services::{BudgetService, TransactionService};
use crate::storage::Storage;

use super::aggregate::{
    build_budget_summary, calculate_balance, calculate_spend_by_category, BudgetSummaryLine,
};

/// Everything the dashboard shows
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    /// Income minus expenses over every transaction
    pub balance: Money,
    /// Newest first
    pub recent: Vec<Transaction>,
    /// Tracked categories only
    pub budget_summary: Vec<BudgetSummaryLine>,
    pub categories: Vec<Category>,
}

impl DashboardView {
    /// Build the dashboard from one snapshot of the store
    pub fn generate(storage: &Storage, recent_count: usize) -> FinanceResult<Self> {
        let transaction_service = TransactionService::new(storage);
        let budget_service = BudgetService::new(storage);

        let transactions = transaction_service.list_all()?;
        let budgets = budget_service.list()?;

        let balance = calculate_balance(&transactions);
        let spend = calculate_spend_by_category(&transactions, Category::all());
        let budget_summary = build_budget_summary(&budgets, &spend);

        let mut recent = transactions;
        recent.truncate(recent_count);

        Ok(Self {
            balance,
            recent,
            budget_summary,
            categories: Category::all().to_vec(),
        })
    }

    pub fn overspent_count(&self) -> usize {
        self.budget_summary.iter().filter(|l| l.is_overspent()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::FinancePaths;
    use crate::services::TransactionInput;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = FinancePaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::open(paths).unwrap();
        (temp_dir, storage)
    }

    fn add(storage: &Storage, description: &str, amount: &str, kind: &str, date: &str, category: &str) {
        TransactionService::new(storage)
            .create(&TransactionInput {
                description: description.into(),
                amount: amount.into(),
                kind: kind.into(),
                date: date.into(),
                category: category.into(),
            })
            .unwrap();
    }

    #[test]
    fn test_empty_dashboard() {
        let (_temp_dir, storage) = create_test_storage();

        let view = DashboardView::generate(&storage, 5).unwrap();

        assert_eq!(view.balance, Money::zero());
        assert!(view.recent.is_empty());
        assert!(view.budget_summary.is_empty());
        assert_eq!(view.categories.len(), 7);
    }

    #[test]
    fn test_dashboard_balance_and_summary() {
        let (_temp_dir, storage) = create_test_storage();
        add(&storage, "Salary", "5000", "Income", "2024-01-05", "Salary");
        add(&storage, "Rent", "1500", "Expense", "2024-01-06", "Housing");
        add(&storage, "Movies", "30", "Expense", "2024-01-07", "Leisure");
        BudgetService::new(&storage)
            .set_limit(Category::Housing, Money::from_units(2000))
            .unwrap();

        let view = DashboardView::generate(&storage, 5).unwrap();

        assert_eq!(view.balance, Money::from_units(3470));
        assert_eq!(view.budget_summary.len(), 1);
        let housing = &view.budget_summary[0];
        assert_eq!(housing.category, Category::Housing);
        assert_eq!(housing.spent, Money::from_units(1500));
        assert_eq!(housing.remaining, Money::from_units(500));
        assert_eq!(view.overspent_count(), 0);
    }

    #[test]
    fn test_recent_is_newest_first_and_capped() {
        let (_temp_dir, storage) = create_test_storage();
        for day in 1..=7 {
            add(&storage, &format!("Coffee {day}"), "3", "Expense", &format!("2024-03-0{day}"), "Food");
        }

        let view = DashboardView::generate(&storage, 5).unwrap();

        assert_eq!(view.recent.len(), 5);
        assert_eq!(view.recent[0].description, "Coffee 7");
        assert_eq!(view.recent[4].description, "Coffee 3");
        // Balance still covers everything, not just the recent slice
        assert_eq!(view.balance, Money::from_units(-21));
    }
}
