//! The fixed category set
//!
//! Categories are configuration, not user data: the set is closed and shared
//! by transactions and budgets. Every category always has exactly one budget.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A classification label for transactions and budgets
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    Food,
    Housing,
    Transport,
    Leisure,
    Health,
    Salary,
    Other,
}

impl Category {
    /// All categories in display order
    pub const ALL: [Category; 7] = [
        Self::Food,
        Self::Housing,
        Self::Transport,
        Self::Leisure,
        Self::Health,
        Self::Salary,
        Self::Other,
    ];

    pub fn all() -> &'static [Self] {
        &Self::ALL
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Food => "Food",
            Self::Housing => "Housing",
            Self::Transport => "Transport",
            Self::Leisure => "Leisure",
            Self::Health => "Health",
            Self::Salary => "Salary",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.name().eq_ignore_ascii_case(needle))
            .ok_or_else(|| UnknownCategory(needle.to_string()))
    }
}

/// A name that is not part of the category set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCategory(pub String);

impl fmt::Display for UnknownCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let known: Vec<&str> = Category::ALL.iter().map(|c| c.name()).collect();
        write!(
            f,
            "Unknown category '{}' (expected one of: {})",
            self.0,
            known.join(", ")
        )
    }
}

impl std::error::Error for UnknownCategory {}
