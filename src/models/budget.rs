//! Budget model
//!
//! One spending limit per category. A limit of zero means the category is
//! not tracked on the dashboard.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::Category;
use super::money::{Money, MAX_AMOUNT};

/// The spending limit for a category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Budget {
    pub category: Category,

    #[serde(default)]
    pub limit: Money,

    pub updated_at: DateTime<Utc>,
}

impl Budget {
    /// Create a budget with a zero limit
    pub fn new(category: Category) -> Self {
        Self {
            category,
            limit: Money::zero(),
            updated_at: Utc::now(),
        }
    }

    pub fn with_limit(category: Category, limit: Money) -> Self {
        Self {
            limit,
            ..Self::new(category)
        }
    }

    /// Produce a copy of this budget carrying a new limit
    pub fn with_new_limit(&self, limit: Money) -> Self {
        Self {
            category: self.category,
            limit,
            updated_at: Utc::now(),
        }
    }

    /// Whether the category shows up in the budget summary
    pub fn is_tracked(&self) -> bool {
        self.limit.is_positive()
    }

    pub fn validate(&self) -> Result<(), BudgetValidationError> {
        if self.limit.is_negative() {
            return Err(BudgetValidationError::NegativeLimit(self.category, self.limit));
        }
        if self.limit.exceeds_max() {
            return Err(BudgetValidationError::LimitTooLarge(self.category, self.limit));
        }

        Ok(())
    }
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} limit: {}", self.category, self.limit)
    }
}

/// Validation errors for budgets
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BudgetValidationError {
    NegativeLimit(Category, Money),
    LimitTooLarge(Category, Money),
}

impl fmt::Display for BudgetValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativeLimit(category, limit) => write!(
                f,
                "Budget limit for {} cannot be negative (got {})",
                category, limit
            ),
            Self::LimitTooLarge(category, limit) => write!(
                f,
                "Budget limit for {} is larger than the maximum of {} (got {})",
                category, MAX_AMOUNT, limit
            ),
        }
    }
}

impl std::error::Error for BudgetValidationError {}
