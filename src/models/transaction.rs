//! Transaction model
//!
//! A single recorded income or expense. The amount is always stored as a
//! positive magnitude; whether it adds to or subtracts from the balance is
//! decided by [`TransactionType`].

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::category::Category;
use super::ids::TransactionId;
use super::money::{Money, MAX_AMOUNT};

/// Longest accepted description, in characters
pub const MAX_DESCRIPTION_LEN: usize = 100;

/// Whether a transaction brings money in or takes it out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub const ALL: [TransactionType; 2] = [Self::Income, Self::Expense];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Income => "Income",
            Self::Expense => "Expense",
        }
    }

    /// Apply this type's sign to a magnitude
    pub fn signed(&self, amount: Money) -> Money {
        match self {
            Self::Income => amount,
            Self::Expense => -amount,
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TransactionType {
    type Err = TransactionValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.name().eq_ignore_ascii_case(needle))
            .ok_or_else(|| TransactionValidationError::UnknownType(needle.to_string()))
    }
}

/// The five user-editable fields of a transaction, already parsed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionFields {
    pub description: String,
    pub amount: Money,
    pub kind: TransactionType,
    pub date: NaiveDate,
    pub category: Category,
}

impl TransactionFields {
    /// Check the invariants that parsing alone doesn't guarantee
    pub fn validate(&self) -> Result<(), TransactionValidationError> {
        let description = self.description.trim();
        if description.is_empty() {
            return Err(TransactionValidationError::EmptyDescription);
        }

        let len = description.chars().count();
        if len > MAX_DESCRIPTION_LEN {
            return Err(TransactionValidationError::DescriptionTooLong(len));
        }

        if !self.amount.is_positive() {
            return Err(TransactionValidationError::NonPositiveAmount(self.amount));
        }

        if self.amount.exceeds_max() {
            return Err(TransactionValidationError::AmountTooLarge(self.amount));
        }

        Ok(())
    }
}

/// A stored financial transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,

    pub description: String,

    /// Positive magnitude; see [`Transaction::signed_amount`]
    pub amount: Money,

    #[serde(rename = "type")]
    pub kind: TransactionType,

    pub date: NaiveDate,

    pub category: Category,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl Transaction {
    /// Build a transaction from validated fields and a store-assigned id
    pub fn new(id: TransactionId, fields: TransactionFields) -> Self {
        let now = Utc::now();
        Self {
            id,
            description: fields.description.trim().to_string(),
            amount: fields.amount,
            kind: fields.kind,
            date: fields.date,
            category: fields.category,
            created_at: now,
            updated_at: now,
        }
    }

    /// Produce the edited version of this transaction.
    ///
    /// All five fields are replaced; the id and creation time are kept.
    pub fn with_fields(&self, fields: TransactionFields) -> Self {
        Self {
            id: self.id,
            description: fields.description.trim().to_string(),
            amount: fields.amount,
            kind: fields.kind,
            date: fields.date,
            category: fields.category,
            created_at: self.created_at,
            updated_at: Utc::now(),
        }
    }

    /// The contribution of this transaction to the balance
    pub fn signed_amount(&self) -> Money {
        self.kind.signed(self.amount)
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionType::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionType::Expense
    }

    /// The editable fields of this transaction
    pub fn fields(&self) -> TransactionFields {
        TransactionFields {
            description: self.description.clone(),
            amount: self.amount,
            kind: self.kind,
            date: self.date,
            category: self.category,
        }
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} {} {} {}",
            self.id,
            self.date.format("%Y-%m-%d"),
            self.description,
            self.signed_amount()
        )
    }
}

/// Validation errors for transactions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionValidationError {
    EmptyDescription,
    DescriptionTooLong(usize),
    NonPositiveAmount(Money),
    AmountTooLarge(Money),
    UnknownType(String),
}

impl fmt::Display for TransactionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyDescription => write!(f, "Description cannot be empty"),
            Self::DescriptionTooLong(len) => write!(
                f,
                "Description too long ({} chars, max {})",
                len, MAX_DESCRIPTION_LEN
            ),
            Self::NonPositiveAmount(amount) => {
                write!(f, "Amount must be a positive number, got {}", amount)
            }
            Self::AmountTooLarge(amount) => {
                write!(f, "Amount {} is larger than the maximum of {}", amount, MAX_AMOUNT)
            }
            Self::UnknownType(s) => {
                write!(f, "Unknown transaction type '{}' (expected Income or Expense)", s)
            }
        }
    }
}

impl std::error::Error for TransactionValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields() -> TransactionFields {
        TransactionFields {
            description: "Rent".into(),
            amount: Money::from_units(1500),
            kind: TransactionType::Expense,
            date: NaiveDate::from_ymd_opt(2024, 1, 6).unwrap(),
            category: Category::Housing,
        }
    }

    #[test]
    fn test_new_transaction() {
        let txn = Transaction::new(TransactionId::FIRST, fields());
        assert_eq!(txn.id, TransactionId::FIRST);
        assert_eq!(txn.description, "Rent");
        assert_eq!(txn.amount.cents(), 150000);
        assert_eq!(txn.created_at, txn.updated_at);
        assert_eq!(txn.fields(), fields());
    }

    #[test]
    fn test_signed_amount() {
        let expense = Transaction::new(TransactionId::FIRST, fields());
        assert_eq!(expense.signed_amount().cents(), -150000);
        assert!(expense.is_expense());

        let income = Transaction::new(
            TransactionId::new(2),
            TransactionFields {
                kind: TransactionType::Income,
                ..fields()
            },
        );
        assert_eq!(income.signed_amount().cents(), 150000);
        assert!(income.is_income());
    }

    #[test]
    fn test_with_fields_keeps_identity() {
        let original = Transaction::new(TransactionId::new(3), fields());
        let edited = original.with_fields(TransactionFields {
            amount: Money::from_units(1600),
            category: Category::Other,
            ..fields()
        });

        assert_eq!(edited.id, original.id);
        assert_eq!(edited.created_at, original.created_at);
        assert_eq!(edited.amount.cents(), 160000);
        assert_eq!(edited.category, Category::Other);
        assert_eq!(edited.description, original.description);
    }

    #[test]
    fn test_validate() {
        assert!(fields().validate().is_ok());

        let blank = TransactionFields {
            description: "   ".into(),
            ..fields()
        };
        assert_eq!(blank.validate(), Err(TransactionValidationError::EmptyDescription));

        let zero = TransactionFields {
            amount: Money::zero(),
            ..fields()
        };
        assert!(matches!(
            zero.validate(),
            Err(TransactionValidationError::NonPositiveAmount(_))
        ));

        let long = TransactionFields {
            description: "x".repeat(MAX_DESCRIPTION_LEN + 1),
            ..fields()
        };
        assert_eq!(
            long.validate(),
            Err(TransactionValidationError::DescriptionTooLong(MAX_DESCRIPTION_LEN + 1))
        );
    }

    #[test]
    fn test_amount_above_cap_rejected() {
        let at_cap = TransactionFields {
            amount: MAX_AMOUNT,
            ..fields()
        };
        assert!(at_cap.validate().is_ok());

        let huge = TransactionFields {
            amount: Money::from_units(50_000_000_000_000_000),
            ..fields()
        };
        assert!(matches!(
            huge.validate(),
            Err(TransactionValidationError::AmountTooLarge(_))
        ));
    }

    #[test]
    fn test_type_parse() {
        assert_eq!("income".parse::<TransactionType>().unwrap(), TransactionType::Income);
        assert_eq!("EXPENSE".parse::<TransactionType>().unwrap(), TransactionType::Expense);
        assert!("Transfer".parse::<TransactionType>().is_err());
    }

    #[test]
    fn test_serializes_type_field() {
        let txn = Transaction::new(TransactionId::FIRST, fields());
        let json = serde_json::to_value(&txn).unwrap();
        assert_eq!(json["type"], "Expense");
        assert_eq!(json["category"], "Housing");
        assert_eq!(json["amount"], 150000);
        assert_eq!(json["date"], "2024-01-06");
    }
}
