//! Balance and spending aggregates
//!
//! Pure functions over a snapshot of transactions. Nothing here touches
//! storage, so the same functions serve the whole ledger and filtered
//! statements alike.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::{Budget, Category, Money, Transaction};

/// Income minus expenses.
///
/// Amounts are integer cents, so the result does not depend on the order
/// of `transactions`.
pub fn calculate_balance<'a, I>(transactions: I) -> Money
where
    I: IntoIterator<Item = &'a Transaction>,
{
    transactions.into_iter().map(Transaction::signed_amount).sum()
}

/// Expense totals per category.
///
/// Every category in `categories` is present in the result, starting at
/// zero. Expenses in a category outside `categories` have no bucket and are
/// not counted; callers pass the full set to account for every expense.
pub fn calculate_spend_by_category<'a, I>(
    transactions: I,
    categories: &[Category],
) -> BTreeMap<Category, Money>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut spend: BTreeMap<Category, Money> =
        categories.iter().map(|c| (*c, Money::zero())).collect();

    for txn in transactions.into_iter().filter(|t| t.is_expense()) {
        if let Some(bucket) = spend.get_mut(&txn.category) {
            *bucket += txn.amount;
        }
    }

    spend
}

/// One tracked category on the dashboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BudgetSummaryLine {
    pub category: Category,
    pub limit: Money,
    pub spent: Money,
    /// Negative when the category is overspent
    pub remaining: Money,
}

impl BudgetSummaryLine {
    pub fn is_overspent(&self) -> bool {
        self.remaining.is_negative()
    }

    /// Spent as a percentage of the limit
    pub fn percent_used(&self) -> f64 {
        if self.limit.is_zero() {
            return 0.0;
        }
        self.spent.cents() as f64 / self.limit.cents() as f64 * 100.0
    }
}

/// Pair each budget with its spending.
///
/// Budgets with a limit of zero (or less) are not tracked and are left out.
/// Output follows the order of `budgets`.
pub fn build_budget_summary(
    budgets: &[Budget],
    spend_by_category: &BTreeMap<Category, Money>,
) -> Vec<BudgetSummaryLine> {
    budgets
        .iter()
        .filter(|b| b.is_tracked())
        .map(|b| {
            let spent = spend_by_category
                .get(&b.category)
                .copied()
                .unwrap_or_default();
            BudgetSummaryLine {
                category: b.category,
                limit: b.limit,
                spent,
                remaining: b.limit - spent,
            }
        })
        .collect()
}
