pub mod backup;
pub mod init;
pub mod preferences;
pub mod status;
pub mod summary;
pub mod transactions;

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;

use pocket::config::Config;
use pocket::error::Result;
use pocket::Pocket;

pub(crate) fn open(config: &Config) -> Result<Pocket> {
    Pocket::open(config)
}

#[derive(Parser)]
#[command(name = "pocket", about = "Track income, expenses and a monthly budget.")]
pub struct Cli {
    /// Data directory to use for this run (default: from config)
    #[arg(long = "data-dir", global = true)]
    pub data_dir: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Save the data directory to the config and create the store.
    Init,
    /// Record a transaction.
    Add {
        /// Short description
        title: String,
        /// Amount (never negative; use --income for money coming in)
        amount: Decimal,
        /// Category name
        #[arg(long, default_value = "Other")]
        category: String,
        /// Record as income instead of expense
        #[arg(long)]
        income: bool,
        /// Epoch milliseconds (default: now)
        #[arg(long)]
        date: Option<i64>,
    },
    /// List transactions in insertion order.
    List,
    /// Change fields of an existing transaction.
    Edit {
        /// Transaction ID
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        amount: Option<Decimal>,
        #[arg(long)]
        category: Option<String>,
        /// Mark as income
        #[arg(long, conflicts_with = "expense")]
        income: bool,
        /// Mark as expense
        #[arg(long)]
        expense: bool,
        /// Epoch milliseconds
        #[arg(long)]
        date: Option<i64>,
    },
    /// Delete a transaction.
    Delete {
        /// Transaction ID
        id: String,
    },
    /// Show totals, category spending and budget progress.
    Summary,
    /// Show or set the monthly budget.
    Budget {
        amount: Option<Decimal>,
    },
    /// Show or set the currency symbol.
    Currency {
        symbol: Option<String>,
    },
    /// Show or set dark mode.
    DarkMode {
        #[arg(value_parser = ["on", "off"])]
        state: Option<String>,
    },
    /// List the available categories.
    Categories,
    /// Create, list and restore backups.
    Backup {
        #[command(subcommand)]
        command: BackupCommands,
    },
    /// Show the data directory and record counts.
    Status,
}

#[derive(Subcommand)]
pub enum BackupCommands {
    /// Write a backup of transactions, budget and currency.
    Create,
    /// List backups, newest first.
    List,
    /// Restore from a backup file.
    Restore {
        /// Backup file path, or a file name inside the backups directory
        file: String,
    },
}
