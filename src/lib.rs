//! Local transaction store and spending reports for a personal finance
//! tracker.
//!
//! [`Pocket`] is the entry point: it opens one [`store::RecordStore`] and
//! hands it to the repository, the settings and the backup service. The
//! aggregation functions in [`reports`] are pure and take a transaction slice
//! fetched from [`Pocket::list_transactions`].

pub mod backup;
pub mod config;
pub mod db;
pub mod error;
pub mod fmt;
pub mod models;
pub mod reports;
pub mod repository;
pub mod settings;
pub mod store;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, TimeZone};
use rust_decimal::Decimal;

use crate::backup::{BackupService, RestoreReport};
use crate::config::Config;
use crate::error::Result;
use crate::models::{BackupFile, Snapshot, Transaction};
use crate::reports::Summary;
use crate::repository::TransactionRepository;
use crate::settings::Settings;
use crate::store::RecordStore;

pub const CATEGORIES: &[&str] = &[
    "Food",
    "Transport",
    "Bills",
    "Entertainment",
    "Shopping",
    "Health",
    "Salary",
    "Other",
];

pub struct Pocket {
    store: Arc<RecordStore>,
    repository: Arc<TransactionRepository>,
    settings: Arc<Settings>,
    backups: BackupService,
}

impl Pocket {
    pub fn open(config: &Config) -> Result<Self> {
        let store = RecordStore::open(&config.data_path(), &config.namespace)?;
        Ok(Self::with_store(store, config.backups_dir()))
    }

    pub fn with_store(store: RecordStore, backups_dir: PathBuf) -> Self {
        let store = Arc::new(store);
        let repository = Arc::new(TransactionRepository::new(Arc::clone(&store)));
        let settings = Arc::new(Settings::new(Arc::clone(&store)));
        let backups = BackupService::new(Arc::clone(&repository), Arc::clone(&settings), backups_dir);
        Self {
            store,
            repository,
            settings,
            backups,
        }
    }

    pub fn store_path(&self) -> Option<&Path> {
        self.store.path()
    }

    // Transactions

    pub fn list_transactions(&self) -> Vec<Transaction> {
        self.repository.list()
    }

    pub fn find_transaction(&self, id: &str) -> Option<Transaction> {
        self.repository.get(id)
    }

    pub fn add_transaction(&self, txn: Transaction) -> Result<Transaction> {
        self.repository.add(txn)
    }

    /// `Ok(false)` when no stored transaction has the same id.
    pub fn update_transaction(&self, txn: &Transaction) -> Result<bool> {
        self.repository.update(txn)
    }

    pub fn delete_transaction(&self, txn: &Transaction) -> Result<usize> {
        self.repository.delete(txn)
    }

    // Settings

    pub fn budget(&self) -> Decimal {
        self.settings.monthly_budget()
    }

    pub fn set_budget(&self, budget: Decimal) -> Result<()> {
        self.settings.set_monthly_budget(budget)
    }

    pub fn currency(&self) -> String {
        self.settings.currency()
    }

    pub fn set_currency(&self, currency: &str) -> Result<()> {
        self.settings.set_currency(currency)
    }

    pub fn dark_mode(&self) -> bool {
        self.settings.dark_mode()
    }

    pub fn set_dark_mode(&self, enabled: bool) -> Result<()> {
        self.settings.set_dark_mode(enabled)
    }

    pub fn logged_in(&self) -> bool {
        self.settings.logged_in()
    }

    pub fn set_logged_in(&self, logged_in: bool) -> Result<()> {
        self.settings.set_logged_in(logged_in)
    }

    pub fn categories(&self) -> Vec<String> {
        CATEGORIES.iter().map(|c| c.to_string()).collect()
    }

    // Backups

    pub fn snapshot(&self) -> Snapshot {
        self.backups.snapshot()
    }

    pub fn create_backup(&self) -> Result<BackupFile> {
        self.backups.create_backup()
    }

    pub fn list_backups(&self) -> Vec<BackupFile> {
        self.backups.list_backups()
    }

    pub fn restore_backup(&self, path: &Path) -> Result<RestoreReport> {
        self.backups.restore(path)
    }

    // Reports

    pub fn summary<Tz: TimeZone>(&self, reference: &DateTime<Tz>) -> Summary {
        Summary::from_transactions(&self.list_transactions(), self.budget(), reference)
    }
}
