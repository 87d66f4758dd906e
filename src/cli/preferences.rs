use comfy_table::{Cell, Table};
use rust_decimal::Decimal;

use pocket::config::Config;
use pocket::error::{PocketError, Result};
use pocket::fmt::money;

pub fn budget(config: &Config, amount: Option<Decimal>) -> Result<()> {
    let pocket = super::open(config)?;
    if let Some(amount) = amount {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PocketError::Other("Budget cannot be negative".to_string()));
        }
        pocket.set_budget(amount)?;
        println!("Monthly budget set to {}", money(amount, &pocket.currency()));
    } else {
        println!("Monthly budget: {}", money(pocket.budget(), &pocket.currency()));
    }
    Ok(())
}

pub fn currency(config: &Config, symbol: Option<String>) -> Result<()> {
    let pocket = super::open(config)?;
    match symbol {
        Some(symbol) if symbol.trim().is_empty() => {
            return Err(PocketError::Other("Currency cannot be empty".to_string()));
        }
        Some(symbol) => {
            pocket.set_currency(&symbol)?;
            println!("Currency set to {symbol}");
        }
        None => println!("Currency: {}", pocket.currency()),
    }
    Ok(())
}

pub fn dark_mode(config: &Config, state: Option<String>) -> Result<()> {
    let pocket = super::open(config)?;
    if let Some(state) = state {
        pocket.set_dark_mode(state == "on")?;
    }
    println!("Dark mode: {}", if pocket.dark_mode() { "on" } else { "off" });
    Ok(())
}

pub fn categories(config: &Config) -> Result<()> {
    let pocket = super::open(config)?;
    let mut table = Table::new();
    table.set_header(vec!["Category"]);
    for name in pocket.categories() {
        table.add_row(vec![Cell::new(name)]);
    }
    println!("Categories\n{table}");
    Ok(())
}
