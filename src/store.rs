use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use rusqlite::Connection;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::db::{get_connection, get_record, init_db, put_record};
use crate::error::{PocketError, Result};
use crate::models::Transaction;

pub const KEY_TRANSACTIONS: &str = "transactions";
pub const KEY_MONTHLY_BUDGET: &str = "monthly_budget";
pub const KEY_SELECTED_CURRENCY: &str = "selected_currency";
pub const KEY_DARK_MODE: &str = "dark_mode";
pub const KEY_IS_LOGGED_IN: &str = "is_logged_in";

pub const DEFAULT_NAMESPACE: &str = "pocket";

/// Durable key-value storage for one namespace: the transaction sequence plus
/// the scalar settings, each stored as a JSON value.
///
/// Reads never fail: a missing, corrupt, or unreadable value comes back as the
/// caller's default. Writes replace the whole value and report failures as
/// errors.
pub struct RecordStore {
    conn: Mutex<Connection>,
    path: Option<PathBuf>,
}

impl RecordStore {
    /// Open (or create) `<dir>/<namespace>.db`.
    pub fn open(dir: &Path, namespace: &str) -> Result<Self> {
        std::fs::create_dir_all(dir)?;
        let path = dir.join(format!("{namespace}.db"));
        let conn = get_connection(&path)?;
        init_db(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
            path: Some(path),
        })
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        init_db(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
            path: None,
        })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn conn(&self) -> MutexGuard<'_, Connection> {
        // Every write is a single statement, so a poisoned lock is still usable.
        self.conn.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn read_transactions(&self) -> Vec<Transaction> {
        self.read_scalar(KEY_TRANSACTIONS, Vec::new())
    }

    pub fn write_transactions(&self, transactions: &[Transaction]) -> Result<()> {
        self.write_scalar(KEY_TRANSACTIONS, &transactions)
    }

    pub fn read_scalar<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        let raw = match get_record(&self.conn(), key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return default,
            Err(e) => {
                log::warn!("Failed to read '{key}', using default: {e}");
                return default;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                log::warn!("Stored value for '{key}' is corrupt, using default: {e}");
                default
            }
        }
    }

    pub fn write_scalar<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let json = serde_json::to_string(value).map_err(|e| {
            log::error!("Failed to serialize '{key}': {e}");
            PocketError::from(e)
        })?;
        put_record(&self.conn(), key, &json).map_err(|e| {
            log::error!("Failed to write '{key}': {e}");
            e
        })
    }

    /// Store raw text under `key` without serializing it.
    #[cfg(test)]
    pub(crate) fn write_raw(&self, key: &str, raw: &str) -> Result<()> {
        put_record(&self.conn(), key, raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Kind;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn sample(id: &str, amount: Decimal) -> Transaction {
        let mut txn = Transaction::new("Lunch", amount, "Food", Kind::Expense, 1_700_000_000_000);
        txn.id = id.to_string();
        txn
    }

    #[test]
    fn test_missing_transactions_read_as_empty() {
        let store = RecordStore::open_in_memory().unwrap();
        assert!(store.read_transactions().is_empty());
    }

    #[test]
    fn test_corrupt_transactions_read_as_empty() {
        let store = RecordStore::open_in_memory().unwrap();
        store.write_raw(KEY_TRANSACTIONS, "[{not json").unwrap();
        assert!(store.read_transactions().is_empty());
    }

    #[test]
    fn test_wrong_shape_reads_as_default() {
        let store = RecordStore::open_in_memory().unwrap();
        store.write_raw(KEY_DARK_MODE, "\"yes\"").unwrap();
        assert!(!store.read_scalar(KEY_DARK_MODE, false));
    }

    #[test]
    fn test_write_replaces_whole_sequence() {
        let store = RecordStore::open_in_memory().unwrap();
        store.write_transactions(&[sample("a", dec!(1)), sample("b", dec!(2))]).unwrap();
        store.write_transactions(&[sample("c", dec!(3))]).unwrap();
        let stored = store.read_transactions();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].id, "c");
    }

    #[test]
    fn test_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        {
            let store = RecordStore::open(dir.path(), "prefs").unwrap();
            store.write_transactions(&[sample("a", dec!(12.34))]).unwrap();
            store.write_scalar(KEY_SELECTED_CURRENCY, "EUR").unwrap();
        }
        let store = RecordStore::open(dir.path(), "prefs").unwrap();
        assert!(dir.path().join("prefs.db").exists());
        assert_eq!(store.read_transactions(), vec![sample("a", dec!(12.34))]);
        assert_eq!(store.read_scalar(KEY_SELECTED_CURRENCY, "$".to_string()), "EUR");
    }

    #[test]
    fn test_high_precision_amounts_survive_storage() {
        let store = RecordStore::open_in_memory().unwrap();
        let amount = dec!(1234567890123.456789);
        store.write_transactions(&[sample("a", amount)]).unwrap();
        store.write_scalar(KEY_MONTHLY_BUDGET, &dec!(98765432109876.54321)).unwrap();
        assert_eq!(store.read_transactions()[0].amount, amount);
        assert_eq!(
            store.read_scalar(KEY_MONTHLY_BUDGET, Decimal::ZERO),
            dec!(98765432109876.54321)
        );
    }

    #[test]
    fn test_namespaces_are_isolated() {
        let dir = tempfile::tempdir().unwrap();
        let one = RecordStore::open(dir.path(), "one").unwrap();
        let two = RecordStore::open(dir.path(), "two").unwrap();
        one.write_scalar(KEY_IS_LOGGED_IN, &true).unwrap();
        assert!(one.read_scalar(KEY_IS_LOGGED_IN, false));
        assert!(!two.read_scalar(KEY_IS_LOGGED_IN, false));
    }
}
