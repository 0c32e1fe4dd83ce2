//! Transaction repository for JSON storage
//!
//! Manages loading and saving transactions to transactions.json. The file
//! also carries the id counter so ids stay unique across deletes and restarts.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::FinanceError;
use crate::models::{Transaction, TransactionFields, TransactionId};

use super::file_io::{read_json, write_json_atomic};

/// On-disk layout of transactions.json
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct TransactionData {
    #[serde(default)]
    next_id: u64,
    #[serde(default)]
    transactions: Vec<Transaction>,
}

struct TransactionTable {
    next_id: TransactionId,
    rows: HashMap<TransactionId, Transaction>,
}

impl Default for TransactionTable {
    fn default() -> Self {
        Self {
            next_id: TransactionId::FIRST,
            rows: HashMap::new(),
        }
    }
}

/// Statement order: newest date first, later-created first on the same date
pub fn newest_first(a: &Transaction, b: &Transaction) -> Ordering {
    b.date.cmp(&a.date).then_with(|| b.id.cmp(&a.id))
}

/// Repository for transaction persistence
pub struct TransactionRepository {
    path: PathBuf,
    table: RwLock<TransactionTable>,
}

impl TransactionRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            table: RwLock::new(TransactionTable::default()),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, TransactionTable>, FinanceError> {
        self.table
            .read()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, TransactionTable>, FinanceError> {
        self.table
            .write()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire write lock: {}", e)))
    }

    /// Load transactions from disk, replacing whatever is in memory
    pub fn load(&self) -> Result<(), FinanceError> {
        let file_data: TransactionData = read_json(&self.path)?;
        let mut table = self.write()?;

        let highest = file_data
            .transactions
            .iter()
            .map(|t| t.id)
            .max()
            .map(|id| id.next())
            .unwrap_or(TransactionId::FIRST);
        // A hand-edited or older file may carry a stale counter
        table.next_id = highest.max(TransactionId::new(file_data.next_id));

        table.rows = file_data
            .transactions
            .into_iter()
            .map(|t| (t.id, t))
            .collect();

        tracing::debug!(
            count = table.rows.len(),
            next_id = %table.next_id,
            "loaded transactions"
        );
        Ok(())
    }

    /// Save transactions to disk
    pub fn save(&self) -> Result<(), FinanceError> {
        let table = self.read()?;

        let mut transactions: Vec<_> = table.rows.values().cloned().collect();
        transactions.sort_by(newest_first);

        let file_data = TransactionData {
            next_id: table.next_id.value(),
            transactions,
        };
        write_json_atomic(&self.path, &file_data)
    }

    /// Get a transaction by ID
    pub fn get(&self, id: TransactionId) -> Result<Option<Transaction>, FinanceError> {
        Ok(self.read()?.rows.get(&id).cloned())
    }

    /// Get all transactions, newest first
    pub fn get_all(&self) -> Result<Vec<Transaction>, FinanceError> {
        self.find_ordered(|_| true, None)
    }

    /// Get the transactions matching a predicate, in no particular order
    pub fn find_where<F>(&self, predicate: F) -> Result<Vec<Transaction>, FinanceError>
    where
        F: Fn(&Transaction) -> bool,
    {
        let table = self.read()?;
        Ok(table.rows.values().filter(|t| predicate(t)).cloned().collect())
    }

    /// Get the transactions matching a predicate, newest first, optionally capped
    pub fn find_ordered<F>(
        &self,
        predicate: F,
        limit: Option<usize>,
    ) -> Result<Vec<Transaction>, FinanceError>
    where
        F: Fn(&Transaction) -> bool,
    {
        let mut transactions = self.find_where(predicate)?;
        transactions.sort_by(newest_first);
        if let Some(limit) = limit {
            transactions.truncate(limit);
        }
        Ok(transactions)
    }

    /// Insert a new transaction, assigning the next id
    pub fn insert(&self, fields: TransactionFields) -> Result<Transaction, FinanceError> {
        let mut table = self.write()?;

        let id = table.next_id;
        table.next_id = id.next();

        let txn = Transaction::new(id, fields);
        table.rows.insert(id, txn.clone());
        Ok(txn)
    }

    /// Replace an existing transaction
    pub fn update(&self, txn: Transaction) -> Result<(), FinanceError> {
        let mut table = self.write()?;

        match table.rows.get_mut(&txn.id) {
            Some(slot) => {
                *slot = txn;
                Ok(())
            }
            None => Err(FinanceError::transaction_not_found(txn.id.to_string())),
        }
    }

    /// Delete a transaction, returning whether it existed
    pub fn delete(&self, id: TransactionId) -> Result<bool, FinanceError> {
        Ok(self.write()?.rows.remove(&id).is_some())
    }

    pub fn count(&self) -> Result<usize, FinanceError> {
        Ok(self.read()?.rows.len())
    }

    /// The id the next insert will receive
    pub fn next_id(&self) -> Result<TransactionId, FinanceError> {
        Ok(self.read()?.next_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Money, TransactionType};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, TransactionRepository) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("transactions.json");
        let repo = TransactionRepository::new(path);
        (temp_dir, repo)
    }

    fn expense(description: &str, cents: i64, day: u32) -> TransactionFields {
        TransactionFields {
            description: description.into(),
            amount: Money::from_cents(cents),
            kind: TransactionType::Expense,
            date: NaiveDate::from_ymd_opt(2025, 1, day).unwrap(),
            category: Category::Food,
        }
    }

    #[test]
    fn test_empty_load() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();
        assert_eq!(repo.count().unwrap(), 0);
        assert_eq!(repo.next_id().unwrap(), TransactionId::FIRST);
    }

    #[test]
    fn test_insert_assigns_sequential_ids() {
        let (_temp_dir, repo) = create_test_repo();

        let a = repo.insert(expense("Bread", 500, 1)).unwrap();
        let b = repo.insert(expense("Milk", 300, 1)).unwrap();

        assert_eq!(a.id.value(), 1);
        assert_eq!(b.id.value(), 2);
        assert_eq!(repo.get(b.id).unwrap().unwrap().description, "Milk");
    }

    #[test]
    fn test_ordering_date_desc_then_id_desc() {
        let (_temp_dir, repo) = create_test_repo();

        let old = repo.insert(expense("Old", 100, 1)).unwrap();
        let first_same_day = repo.insert(expense("First", 100, 10)).unwrap();
        let second_same_day = repo.insert(expense("Second", 100, 10)).unwrap();

        let ids: Vec<_> = repo.get_all().unwrap().into_iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![second_same_day.id, first_same_day.id, old.id]);

        let top = repo.find_ordered(|_| true, Some(1)).unwrap();
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].id, second_same_day.id);
    }

    #[test]
    fn test_update_missing_is_not_found() {
        let (_temp_dir, repo) = create_test_repo();
        let txn = Transaction::new(TransactionId::new(99), expense("Ghost", 100, 1));

        let err = repo.update(txn).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_delete() {
        let (_temp_dir, repo) = create_test_repo();
        let txn = repo.insert(expense("Bread", 500, 1)).unwrap();

        assert!(repo.delete(txn.id).unwrap());
        assert!(!repo.delete(txn.id).unwrap());
        assert_eq!(repo.count().unwrap(), 0);
    }

    #[test]
    fn test_ids_survive_delete_and_reload() {
        let (temp_dir, repo) = create_test_repo();
        repo.insert(expense("A", 100, 1)).unwrap();
        let b = repo.insert(expense("B", 200, 2)).unwrap();
        repo.delete(b.id).unwrap();
        repo.save().unwrap();

        let reloaded = TransactionRepository::new(temp_dir.path().join("transactions.json"));
        reloaded.load().unwrap();
        assert_eq!(reloaded.count().unwrap(), 1);

        let c = reloaded.insert(expense("C", 300, 3)).unwrap();
        assert_eq!(c.id.value(), 3);
    }

    #[test]
    fn test_stale_counter_is_corrected_on_load() {
        let (temp_dir, repo) = create_test_repo();
        let path = temp_dir.path().join("transactions.json");
        let txn = Transaction::new(TransactionId::new(7), expense("Imported", 100, 1));
        let data = TransactionData {
            next_id: 2,
            transactions: vec![txn],
        };
        write_json_atomic(&path, &data).unwrap();

        repo.load().unwrap();
        assert_eq!(repo.next_id().unwrap().value(), 8);
    }

    #[test]
    fn test_find_where() {
        let (_temp_dir, repo) = create_test_repo();
        repo.insert(expense("Cheap", 100, 1)).unwrap();
        repo.insert(expense("Pricey", 90000, 2)).unwrap();

        let found = repo
            .find_where(|t| t.amount > Money::from_cents(1000))
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].description, "Pricey");
    }
}
