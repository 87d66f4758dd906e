use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde_json::{Map, Value};

use crate::error::{PocketError, Result};
use crate::models::{BackupFile, Snapshot, Transaction};
use crate::repository::TransactionRepository;
use crate::settings::Settings;

const PREFIX: &str = "backup_";
const EXTENSION: &str = ".json";
const STAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Which fields a restore actually applied.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RestoreReport {
    pub transactions: Option<usize>,
    pub budget: Option<Decimal>,
    pub currency: Option<String>,
}

pub struct BackupService {
    repository: Arc<TransactionRepository>,
    settings: Arc<Settings>,
    dir: PathBuf,
}

impl BackupService {
    pub fn new(repository: Arc<TransactionRepository>, settings: Arc<Settings>, dir: PathBuf) -> Self {
        Self {
            repository,
            settings,
            dir,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            transactions: self.repository.list(),
            budget: self.settings.monthly_budget(),
            currency: self.settings.currency(),
        }
    }

    pub fn create_backup(&self) -> Result<BackupFile> {
        self.write_backup().map_err(|e| {
            log::error!("Error creating backup in {}: {e}", self.dir.display());
            e
        })
    }

    fn write_backup(&self) -> Result<BackupFile> {
        std::fs::create_dir_all(&self.dir)?;
        let json = serde_json::to_string_pretty(&self.snapshot())?;

        let stamp = chrono::Local::now().format(STAMP_FORMAT).to_string();
        let mut suffix = 0u32;
        loop {
            let name = if suffix == 0 {
                format!("{PREFIX}{stamp}{EXTENSION}")
            } else {
                format!("{PREFIX}{stamp}_{suffix}{EXTENSION}")
            };
            let path = self.dir.join(name);
            // create_new keeps earlier backups immutable and names unique.
            let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(file) => file,
                Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                    suffix += 1;
                    continue;
                }
                Err(e) => return Err(e.into()),
            };
            file.write_all(json.as_bytes())?;
            file.write_all(b"\n")?;
            file.sync_all()?;
            log::info!("Backup created at {}", path.display());
            return Ok(describe(&path));
        }
    }

    /// Backups in the backup area, most recently modified first. Creates the
    /// area when it does not exist yet.
    pub fn list_backups(&self) -> Vec<BackupFile> {
        if !self.dir.exists() {
            if let Err(e) = std::fs::create_dir_all(&self.dir) {
                log::warn!("Could not create backup dir {}: {e}", self.dir.display());
            }
            return Vec::new();
        }
        let entries = match std::fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) => {
                log::error!("Error listing backups in {}: {e}", self.dir.display());
                return Vec::new();
            }
        };
        let mut backups: Vec<BackupFile> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_file() && is_backup_name(path))
            .map(|path| describe(&path))
            .collect();
        backups.sort_by(|a, b| {
            b.modified
                .cmp(&a.modified)
                .then_with(|| sequence_key(&b.path).cmp(&sequence_key(&a.path)))
        });
        backups
    }

    /// Apply a backup payload. `transactions` replaces the whole sequence;
    /// `budget` and `currency` overwrite their settings. Absent or null keys
    /// leave the current value alone. Fields are applied in that order and a
    /// failure part way through keeps whatever was already applied.
    pub fn restore(&self, path: &Path) -> Result<RestoreReport> {
        self.apply(path).map_err(|e| {
            log::error!("Error restoring from backup {}: {e}", path.display());
            e
        })
    }

    fn apply(&self, path: &Path) -> Result<RestoreReport> {
        let content = std::fs::read_to_string(path)?;
        let payload: Value = serde_json::from_str(&content)?;
        let Value::Object(fields) = payload else {
            return Err(PocketError::Backup("payload is not a JSON object".to_string()));
        };

        let mut report = RestoreReport::default();

        if let Some(value) = present(&fields, "transactions") {
            let transactions: Vec<Transaction> = serde_json::from_value(value.clone())?;
            self.repository.replace_all(&transactions)?;
            report.transactions = Some(transactions.len());
        }

        if let Some(value) = present(&fields, "budget") {
            let budget: Decimal = serde_json::from_value(value.clone())?;
            self.settings.set_monthly_budget(budget)?;
            report.budget = Some(budget);
        }

        if let Some(value) = present(&fields, "currency") {
            let Some(currency) = value.as_str() else {
                return Err(PocketError::Backup("currency is not a string".to_string()));
            };
            self.settings.set_currency(currency)?;
            report.currency = Some(currency.to_string());
        }

        log::info!("Restored backup {}: {report:?}", path.display());
        Ok(report)
    }
}

fn present<'a>(fields: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    fields.get(key).filter(|v| !v.is_null())
}

fn is_backup_name(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with(PREFIX) && n.ends_with(EXTENSION))
}

/// Sort key for same-mtime ties: the stamp, then the numeric `_N` suffix a
/// same-second backup gets, so `_10` ranks above `_9`.
fn sequence_key(path: &Path) -> (String, u32) {
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
    let body = name
        .strip_prefix(PREFIX)
        .and_then(|n| n.strip_suffix(EXTENSION))
        .unwrap_or(name);
    let (stamp, rest) = match (body.get(..15), body.get(15..)) {
        (Some(stamp), Some(rest)) => (stamp, rest),
        _ => (body, ""),
    };
    let n = rest.strip_prefix('_').and_then(|n| n.parse().ok()).unwrap_or(0);
    (stamp.to_string(), n)
}

fn parse_created_at(path: &Path) -> Option<NaiveDateTime> {
    let name = path.file_name()?.to_str()?;
    let stamp = name.strip_prefix(PREFIX)?.get(..15)?;
    NaiveDateTime::parse_from_str(stamp, STAMP_FORMAT).ok()
}

fn describe(path: &Path) -> BackupFile {
    BackupFile {
        path: path.to_path_buf(),
        created_at: parse_created_at(path),
        modified: std::fs::metadata(path).and_then(|m| m.modified()).ok(),
    }
}
