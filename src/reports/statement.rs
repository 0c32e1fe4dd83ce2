//! Statement
//!
//! A filtered, newest-first listing of transactions with its net total.

use std::collections::BTreeMap;

use chrono::Month;
use serde::Serialize;

use crate::error::FinanceResult;
use crate::models::{Category, Money, Transaction, TransactionType};
use crate::services::{TransactionFilter, TransactionService};
use crate::storage::Storage;

use super::aggregate::calculate_balance;

/// Month number to English month name, January = 1
pub fn month_names() -> BTreeMap<u32, &'static str> {
    (1..=12u8)
        .filter_map(|n| Month::try_from(n).ok().map(|m| (u32::from(n), m.name())))
        .collect()
}

/// The statement page
#[derive(Debug, Clone, Serialize)]
pub struct StatementView {
    pub transactions: Vec<Transaction>,
    /// Income minus expenses over `transactions` only
    pub net: Money,
    pub categories: Vec<Category>,
    pub types: Vec<TransactionType>,
    pub months: BTreeMap<u32, &'static str>,
}

impl StatementView {
    pub fn generate(storage: &Storage, filter: &TransactionFilter) -> FinanceResult<Self> {
        let transactions = TransactionService::new(storage).list(filter)?;
        let net = calculate_balance(&transactions);

        Ok(Self {
            transactions,
            net,
            categories: Category::all().to_vec(),
            types: TransactionType::ALL.to_vec(),
            months: month_names(),
        })
    }

    pub fn total_income(&self) -> Money {
        self.transactions
            .iter()
            .filter(|t| t.is_income())
            .map(|t| t.amount)
            .sum()
    }

    pub fn total_expenses(&self) -> Money {
        self.transactions
            .iter()
            .filter(|t| t.is_expense())
            .map(|t| t.amount)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::FinancePaths;
    use crate::services::{StatementQuery, TransactionInput};
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = FinancePaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::open(paths).unwrap();
        (temp_dir, storage)
    }

    fn setup_test_data(storage: &Storage) {
        let service = TransactionService::new(storage);
        for (description, amount, kind, date, category) in [
            ("Salary", "5000", "Income", "2024-01-05", "Salary"),
            ("Rent", "1500", "Expense", "2024-01-06", "Housing"),
            ("Groceries", "120.25", "Expense", "2024-02-03", "Food"),
        ] {
            service
                .create(&TransactionInput {
                    description: description.into(),
                    amount: amount.into(),
                    kind: kind.into(),
                    date: date.into(),
                    category: category.into(),
                })
                .unwrap();
        }
    }

    #[test]
    fn test_month_names() {
        let months = month_names();
        assert_eq!(months.len(), 12);
        assert_eq!(months[&1], "January");
        assert_eq!(months[&12], "December");
    }

    #[test]
    fn test_unfiltered_statement() {
        let (_temp_dir, storage) = create_test_storage();
        setup_test_data(&storage);

        let view = StatementView::generate(&storage, &TransactionFilter::new()).unwrap();

        assert_eq!(view.transactions.len(), 3);
        assert_eq!(view.transactions[0].description, "Groceries");
        assert_eq!(view.net, Money::from_cents(337975));
        assert_eq!(view.total_income(), Money::from_units(5000));
        assert_eq!(view.total_expenses(), Money::from_cents(162025));
    }

    #[test]
    fn test_net_covers_filtered_set_only() {
        let (_temp_dir, storage) = create_test_storage();
        setup_test_data(&storage);

        let query = StatementQuery {
            month: Some("1".into()),
            ..StatementQuery::default()
        };
        let view = StatementView::generate(&storage, &query.to_filter()).unwrap();

        assert_eq!(view.transactions.len(), 2);
        assert_eq!(view.net, Money::from_units(3500));
    }
}
