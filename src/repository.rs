use std::sync::{Arc, Mutex, MutexGuard};

use uuid::Uuid;

use crate::error::Result;
use crate::models::Transaction;
use crate::store::RecordStore;

pub fn generate_id() -> String {
    Uuid::new_v4().to_string()
}

/// CRUD over the stored transaction sequence.
///
/// Every mutation reads the whole sequence, changes it in memory and writes it
/// back. The internal lock serializes those cycles so the last write wins
/// deterministically within one process.
pub struct TransactionRepository {
    store: Arc<RecordStore>,
    write_lock: Mutex<()>,
}

impl TransactionRepository {
    pub fn new(store: Arc<RecordStore>) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, ()> {
        self.write_lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn list(&self) -> Vec<Transaction> {
        self.store.read_transactions()
    }

    pub fn get(&self, id: &str) -> Option<Transaction> {
        self.list().into_iter().find(|t| t.id == id)
    }

    /// Append `txn`, assigning a fresh id when it has none. Returns the record
    /// as stored.
    pub fn add(&self, mut txn: Transaction) -> Result<Transaction> {
        if !txn.has_id() {
            txn.id = generate_id();
        }
        let _guard = self.lock();
        let mut transactions = self.store.read_transactions();
        transactions.push(txn.clone());
        self.store.write_transactions(&transactions)?;
        log::debug!("Added transaction {}", txn.id);
        Ok(txn)
    }

    /// Replace the stored record with the same id, keeping its position.
    /// Returns `false` without writing anything when no record matches.
    pub fn update(&self, txn: &Transaction) -> Result<bool> {
        let _guard = self.lock();
        let mut transactions = self.store.read_transactions();
        let Some(slot) = transactions.iter_mut().find(|t| t.id == txn.id) else {
            log::debug!("Update skipped, no transaction with id {}", txn.id);
            return Ok(false);
        };
        *slot = txn.clone();
        self.store.write_transactions(&transactions)?;
        Ok(true)
    }

    /// Remove every record with the same id. Returns how many were removed.
    pub fn delete(&self, txn: &Transaction) -> Result<usize> {
        self.delete_by_id(&txn.id)
    }

    pub fn delete_by_id(&self, id: &str) -> Result<usize> {
        let _guard = self.lock();
        let mut transactions = self.store.read_transactions();
        let before = transactions.len();
        transactions.retain(|t| t.id != id);
        let removed = before - transactions.len();
        self.store.write_transactions(&transactions)?;
        Ok(removed)
    }

    /// Swap in a whole new sequence, as a restore does.
    pub fn replace_all(&self, transactions: &[Transaction]) -> Result<()> {
        let _guard = self.lock();
        self.store.write_transactions(transactions)
    }
}
