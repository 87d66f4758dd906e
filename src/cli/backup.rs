use std::path::PathBuf;

use comfy_table::{Cell, Table};

use pocket::config::Config;
use pocket::error::{PocketError, Result};
use pocket::fmt::format_bytes;

pub fn create(config: &Config) -> Result<()> {
    let pocket = super::open(config)?;
    let backup = pocket.create_backup()?;
    let size = std::fs::metadata(&backup.path)?.len();
    println!("Backup saved to {}", backup.path.display());
    println!("Size: {}", format_bytes(size));
    Ok(())
}

pub fn list(config: &Config) -> Result<()> {
    let pocket = super::open(config)?;
    let backups = pocket.list_backups();
    if backups.is_empty() {
        println!("No backups in {}", config.backups_dir().display());
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["File", "Created", "Size"]);
    for b in &backups {
        let created = b
            .created_at
            .map(|at| at.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_default();
        let size = std::fs::metadata(&b.path).map(|m| m.len()).unwrap_or(0);
        table.add_row(vec![
            Cell::new(b.name()),
            Cell::new(created),
            Cell::new(format_bytes(size)),
        ]);
    }
    println!("Backups\n{table}");
    Ok(())
}

pub fn restore(config: &Config, file: &str) -> Result<()> {
    let direct = PathBuf::from(file);
    let path = if direct.is_file() {
        direct
    } else {
        config.backups_dir().join(file)
    };
    if !path.is_file() {
        return Err(PocketError::Backup(format!("No backup found at {file}")));
    }

    let pocket = super::open(config)?;
    let report = pocket.restore_backup(&path)?;
    println!("Restored from {}", path.display());
    match report.transactions {
        Some(n) => println!("  transactions: {n}"),
        None => println!("  transactions: unchanged"),
    }
    match report.budget {
        Some(b) => println!("  budget:       {b}"),
        None => println!("  budget:       unchanged"),
    }
    match report.currency {
        Some(c) => println!("  currency:     {c}"),
        None => println!("  currency:     unchanged"),
    }
    Ok(())
}
