//! Budget service
//!
//! Per-category spending limits: single updates and the all-categories form
//! save.

use std::collections::BTreeMap;

use chrono::Utc;

use crate::error::{FinanceError, FinanceResult};
use crate::models::{Budget, Category, Money};
use crate::storage::Storage;

/// Service for budget limits
pub struct BudgetService<'a> {
    storage: &'a Storage,
}

impl<'a> BudgetService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Get the budget for a category or fail with NotFound
    pub fn get(&self, category: Category) -> FinanceResult<Budget> {
        self.storage
            .budgets
            .get(category)?
            .ok_or_else(|| FinanceError::budget_not_found(category.name()))
    }

    /// All budgets in category order
    pub fn list(&self) -> FinanceResult<Vec<Budget>> {
        self.storage.budgets.get_all()
    }

    /// Category to limit, for every category with a budget
    pub fn limits(&self) -> FinanceResult<BTreeMap<Category, Money>> {
        Ok(self
            .list()?
            .into_iter()
            .map(|b| (b.category, b.limit))
            .collect())
    }

    /// Set the limit of one category
    pub fn set_limit(&self, category: Category, limit: Money) -> FinanceResult<Budget> {
        let current = self.get(category)?;
        let updated = current.with_new_limit(limit);
        updated
            .validate()
            .map_err(|e| FinanceError::Validation(e.to_string()))?;

        self.storage.budgets.upsert(updated.clone())?;
        self.storage.budgets.save()?;

        tracing::info!(category = %category, limit = limit.cents(), "set budget limit");
        Ok(updated)
    }

    /// Parse a textual limit and set it
    pub fn set_limit_str(&self, category: Category, limit: &str) -> FinanceResult<Budget> {
        self.set_limit(category, parse_limit(category, limit)?)
    }

    /// Replace every category's limit from a submitted form.
    ///
    /// Keys are category names (case-insensitive); values are amounts. A
    /// category that is missing from the form, or whose value is blank, gets
    /// a limit of zero. Every value is checked before anything is written: one
    /// bad value rejects the whole form and leaves all limits as they were.
    pub fn save_all<I, K, V>(&self, form: I) -> FinanceResult<Vec<Budget>>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut submitted: BTreeMap<Category, String> = BTreeMap::new();
        for (key, value) in form {
            match key.as_ref().parse::<Category>() {
                Ok(category) => {
                    submitted.insert(category, value.as_ref().to_string());
                }
                Err(_) => tracing::debug!(key = key.as_ref(), "ignoring unknown budget field"),
            }
        }

        let now = Utc::now();
        let mut batch = Vec::with_capacity(Category::ALL.len());
        for category in Category::all() {
            let limit = match submitted.get(category) {
                Some(raw) => parse_limit(*category, raw)?,
                None => Money::zero(),
            };
            let budget = Budget {
                category: *category,
                limit,
                updated_at: now,
            };
            budget
                .validate()
                .map_err(|e| FinanceError::Validation(e.to_string()))?;
            batch.push(budget);
        }

        self.storage.budgets.upsert_many(batch.clone())?;
        self.storage.budgets.save()?;

        tracing::info!(count = batch.len(), "saved all budget limits");
        Ok(batch)
    }
}

/// Blank means zero; anything else must be a valid amount
fn parse_limit(category: Category, raw: &str) -> FinanceResult<Money> {
    if raw.trim().is_empty() {
        return Ok(Money::zero());
    }
    Money::parse(raw).map_err(|_| {
        FinanceError::Validation(format!(
            "Invalid limit for {}: '{}'. Use a number like '2000' or '150.50'",
            category, raw
        ))
    })
}
