use std::path::PathBuf;
use std::time::SystemTime;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Kind {
    Income,
    Expense,
}

impl Kind {
    pub fn label(self) -> &'static str {
        match self {
            Kind::Income => "INCOME",
            Kind::Expense => "EXPENSE",
        }
    }
}

/// A single income or expense record. The sign of a gain or loss lives in
/// `kind`; `amount` is never negative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Empty until the repository assigns one on add.
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    pub amount: Decimal,
    #[serde(default)]
    pub category: String,
    #[serde(rename = "type")]
    pub kind: Kind,
    /// Epoch milliseconds.
    #[serde(rename = "date")]
    pub timestamp: i64,
}

impl Transaction {
    pub fn new(title: &str, amount: Decimal, category: &str, kind: Kind, timestamp: i64) -> Self {
        Self {
            id: String::new(),
            title: title.to_string(),
            amount,
            category: category.to_string(),
            kind,
            timestamp,
        }
    }

    pub fn now(title: &str, amount: Decimal, category: &str, kind: Kind) -> Self {
        Self::new(title, amount, category, kind, chrono::Utc::now().timestamp_millis())
    }

    pub fn has_id(&self) -> bool {
        !self.id.is_empty()
    }
}

/// Point-in-time view of everything a backup carries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub transactions: Vec<Transaction>,
    pub budget: Decimal,
    pub currency: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BackupFile {
    pub path: PathBuf,
    /// Parsed from the `backup_<yyyyMMdd_HHmmss>` file name.
    pub created_at: Option<NaiveDateTime>,
    pub modified: Option<SystemTime>,
}

impl BackupFile {
    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default()
    }
}

/// One point of a chart series: the sum of all amounts sharing `timestamp`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimePoint {
    pub timestamp: i64,
    pub total: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_wire_field_names() {
        let mut txn = Transaction::new("Coffee", dec!(3.5), "Food", Kind::Expense, 1_700_000_000_000);
        txn.id = "abc".to_string();
        let value = serde_json::to_value(&txn).unwrap();
        assert_eq!(value["id"], "abc");
        assert_eq!(value["type"], "EXPENSE");
        assert_eq!(value["date"], 1_700_000_000_000i64);
        assert_eq!(value["amount"], 3.5);
        assert!(value.get("kind").is_none());
    }

    #[test]
    fn test_accepts_integer_amounts_and_missing_strings() {
        let json = r#"{"amount": 50000, "type": "INCOME", "date": 1}"#;
        let txn: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(txn.amount, dec!(50000));
        assert_eq!(txn.kind, Kind::Income);
        assert!(!txn.has_id());
        assert!(txn.title.is_empty());
    }

    #[test]
    fn test_rejects_unknown_kind() {
        let json = r#"{"amount": 1, "type": "TRANSFER", "date": 1}"#;
        assert!(serde_json::from_str::<Transaction>(json).is_err());
    }
}
