//! Transaction service
//!
//! Validated create/edit/delete of transactions and the statement query.
//! Input arrives as raw text, the way a form or the command line submits it;
//! every field is parsed and checked before anything is written.

use chrono::{Datelike, NaiveDate};

use crate::error::{FinanceError, FinanceResult};
use crate::models::{
    Category, Money, Transaction, TransactionFields, TransactionId, TransactionType,
};
use crate::storage::Storage;

/// Date format accepted on input
pub const INPUT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Filter values meaning "no criterion"
const ANY_SENTINELS: [&str; 2] = ["Todos", "All"];

/// Raw transaction input, one string per field
#[derive(Debug, Clone, Default)]
pub struct TransactionInput {
    pub description: String,
    pub amount: String,
    pub kind: String,
    pub date: String,
    pub category: String,
}

impl TransactionInput {
    /// Parse and validate all five fields
    pub fn parse(&self) -> FinanceResult<TransactionFields> {
        let amount = Money::parse(&self.amount).map_err(|_| {
            FinanceError::Validation(format!(
                "Invalid amount: '{}'. Use a positive number like '50' or '1500.75'",
                self.amount
            ))
        })?;

        let kind: TransactionType = self
            .kind
            .parse()
            .map_err(|e| FinanceError::Validation(format!("{}", e)))?;

        let date = NaiveDate::parse_from_str(self.date.trim(), INPUT_DATE_FORMAT).map_err(|_| {
            FinanceError::Validation(format!(
                "Invalid date: '{}'. Use YYYY-MM-DD",
                self.date
            ))
        })?;

        let category: Category = self
            .category
            .parse()
            .map_err(|e| FinanceError::Validation(format!("{}", e)))?;

        let fields = TransactionFields {
            description: self.description.trim().to_string(),
            amount,
            kind,
            date,
            category,
        };
        fields
            .validate()
            .map_err(|e| FinanceError::Validation(e.to_string()))?;

        Ok(fields)
    }
}

/// One equality criterion of a filter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Criterion<T> {
    /// Matches everything
    Any,
    /// Matches values equal to this one
    Is(T),
    /// A value that names nothing known; matches nothing
    Unmatchable,
}

impl<T: PartialEq> Criterion<T> {
    pub fn matches(&self, value: &T) -> bool {
        match self {
            Self::Any => true,
            Self::Is(expected) => expected == value,
            Self::Unmatchable => false,
        }
    }
}

impl<T> Default for Criterion<T> {
    fn default() -> Self {
        Self::Any
    }
}

/// Typed statement filter; all criteria must hold
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    pub category: Criterion<Category>,
    pub kind: Criterion<TransactionType>,
    /// Calendar month, 1-12
    pub month: Option<u32>,
    pub year: Option<i32>,
    /// Maximum number of transactions to return
    pub limit: Option<usize>,
}

impl TransactionFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(mut self, category: Category) -> Self {
        self.category = Criterion::Is(category);
        self
    }

    pub fn kind(mut self, kind: TransactionType) -> Self {
        self.kind = Criterion::Is(kind);
        self
    }

    pub fn month(mut self, month: u32) -> Self {
        self.month = Some(month);
        self
    }

    pub fn year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn matches(&self, txn: &Transaction) -> bool {
        self.category.matches(&txn.category)
            && self.kind.matches(&txn.kind)
            && self.month.map_or(true, |m| txn.date.month() == m)
            && self.year.map_or(true, |y| txn.date.year() == y)
    }
}

/// Raw statement criteria as submitted by the user
#[derive(Debug, Clone, Default)]
pub struct StatementQuery {
    pub category: Option<String>,
    pub kind: Option<String>,
    pub month: Option<String>,
    pub year: Option<String>,
}

impl StatementQuery {
    /// Convert to a typed filter.
    ///
    /// Never fails: blank and sentinel values are dropped, month/year values
    /// that aren't valid numbers are dropped, and unrecognized category or
    /// type names become criteria that match nothing.
    pub fn to_filter(&self) -> TransactionFilter {
        TransactionFilter {
            category: text_criterion(self.category.as_deref()),
            kind: text_criterion(self.kind.as_deref()),
            month: self
                .month
                .as_deref()
                .and_then(parse_digits::<u32>)
                .filter(|m| (1..=12).contains(m)),
            year: self.year.as_deref().and_then(parse_digits::<i32>),
            limit: None,
        }
    }
}

/// Plain unsigned decimal: no sign, no spaces inside, at least one digit
fn parse_digits<T: std::str::FromStr>(raw: &str) -> Option<T> {
    let raw = raw.trim();
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}

fn text_criterion<T: std::str::FromStr>(raw: Option<&str>) -> Criterion<T> {
    let Some(raw) = raw.map(str::trim) else {
        return Criterion::Any;
    };
    if raw.is_empty() || ANY_SENTINELS.iter().any(|s| s.eq_ignore_ascii_case(raw)) {
        return Criterion::Any;
    }
    match raw.parse() {
        Ok(value) => Criterion::Is(value),
        Err(_) => {
            tracing::debug!(value = raw, "filter value matches no known name");
            Criterion::Unmatchable
        }
    }
}

/// Service for transaction management
pub struct TransactionService<'a> {
    storage: &'a Storage,
}

impl<'a> TransactionService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Validate and record a new transaction
    pub fn create(&self, input: &TransactionInput) -> FinanceResult<Transaction> {
        let fields = input.parse()?;

        let txn = self.storage.transactions.insert(fields)?;
        self.storage.transactions.save()?;

        tracing::info!(id = %txn.id, kind = %txn.kind, category = %txn.category, "created transaction");
        Ok(txn)
    }

    pub fn get(&self, id: TransactionId) -> FinanceResult<Option<Transaction>> {
        self.storage.transactions.get(id)
    }

    /// Get a transaction or fail with NotFound
    pub fn require(&self, id: TransactionId) -> FinanceResult<Transaction> {
        self.storage
            .transactions
            .get(id)?
            .ok_or_else(|| FinanceError::transaction_not_found(id.to_string()))
    }

    /// Overwrite all five fields of an existing transaction
    pub fn update(&self, id: TransactionId, input: &TransactionInput) -> FinanceResult<Transaction> {
        let existing = self.require(id)?;
        let fields = input.parse()?;

        let updated = existing.with_fields(fields);
        self.storage.transactions.update(updated.clone())?;
        self.storage.transactions.save()?;

        tracing::info!(id = %id, "updated transaction");
        Ok(updated)
    }

    /// Remove a transaction; deleting a missing id is an error
    pub fn delete(&self, id: TransactionId) -> FinanceResult<Transaction> {
        let txn = self.require(id)?;

        if !self.storage.transactions.delete(id)? {
            return Err(FinanceError::transaction_not_found(id.to_string()));
        }
        self.storage.transactions.save()?;

        tracing::info!(id = %id, "deleted transaction");
        Ok(txn)
    }

    /// Matching transactions, newest date first, then newest id first
    pub fn list(&self, filter: &TransactionFilter) -> FinanceResult<Vec<Transaction>> {
        self.storage
            .transactions
            .find_ordered(|t| filter.matches(t), filter.limit)
    }

    /// Permissive statement listing from raw criteria
    pub fn statement(&self, query: &StatementQuery) -> FinanceResult<Vec<Transaction>> {
        self.list(&query.to_filter())
    }

    /// The most recent `count` transactions
    pub fn recent(&self, count: usize) -> FinanceResult<Vec<Transaction>> {
        self.list(&TransactionFilter::new().limit(count))
    }

    pub fn list_all(&self) -> FinanceResult<Vec<Transaction>> {
        self.storage.transactions.get_all()
    }
}
