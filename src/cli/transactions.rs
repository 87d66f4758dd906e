use colored::Colorize;
use comfy_table::{Cell, Table};
use rust_decimal::Decimal;

use pocket::config::Config;
use pocket::error::{PocketError, Result};
use pocket::fmt::{money, timestamp};
use pocket::models::{Kind, Transaction};

fn check_amount(amount: Decimal) -> Result<()> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(PocketError::Other(
            "Amount cannot be negative; use --income or --expense instead".to_string(),
        ));
    }
    Ok(())
}

pub fn add(
    config: &Config,
    title: &str,
    amount: Decimal,
    category: &str,
    income: bool,
    date: Option<i64>,
) -> Result<()> {
    check_amount(amount)?;
    let pocket = super::open(config)?;
    let kind = if income { Kind::Income } else { Kind::Expense };
    let txn = match date {
        Some(ms) => Transaction::new(title, amount, category, kind, ms),
        None => Transaction::now(title, amount, category, kind),
    };
    let stored = pocket.add_transaction(txn)?;
    println!(
        "Added {}: {} {} ({})",
        stored.kind.label().to_lowercase(),
        stored.title,
        money(stored.amount, &pocket.currency()),
        stored.id
    );
    Ok(())
}

pub fn list(config: &Config) -> Result<()> {
    let pocket = super::open(config)?;
    let currency = pocket.currency();
    let transactions = pocket.list_transactions();

    let mut table = Table::new();
    table.set_header(vec!["ID", "Date", "Title", "Category", "Amount"]);
    for t in &transactions {
        let amount = match t.kind {
            Kind::Income => money(t.amount, &currency).green(),
            Kind::Expense => format!("-{}", money(t.amount, &currency)).red(),
        };
        table.add_row(vec![
            Cell::new(&t.id),
            Cell::new(timestamp(t.timestamp)),
            Cell::new(&t.title),
            Cell::new(&t.category),
            Cell::new(amount),
        ]);
    }
    println!("Transactions ({})\n{table}", transactions.len());
    Ok(())
}

pub struct Edit {
    pub title: Option<String>,
    pub amount: Option<Decimal>,
    pub category: Option<String>,
    pub kind: Option<Kind>,
    pub date: Option<i64>,
}

pub fn edit(config: &Config, id: &str, edit: Edit) -> Result<()> {
    let pocket = super::open(config)?;
    let Some(mut txn) = pocket.find_transaction(id) else {
        println!("No transaction with ID {id}");
        return Ok(());
    };
    if let Some(title) = edit.title {
        txn.title = title;
    }
    if let Some(amount) = edit.amount {
        check_amount(amount)?;
        txn.amount = amount;
    }
    if let Some(category) = edit.category {
        txn.category = category;
    }
    if let Some(kind) = edit.kind {
        txn.kind = kind;
    }
    if let Some(date) = edit.date {
        txn.timestamp = date;
    }
    if pocket.update_transaction(&txn)? {
        println!("Updated transaction {id}");
    } else {
        println!("No transaction with ID {id}");
    }
    Ok(())
}

pub fn delete(config: &Config, id: &str) -> Result<()> {
    let pocket = super::open(config)?;
    let Some(txn) = pocket.find_transaction(id) else {
        println!("No transaction with ID {id}");
        return Ok(());
    };
    pocket.delete_transaction(&txn)?;
    println!("Deleted transaction {id}: {}", txn.title);
    Ok(())
}
