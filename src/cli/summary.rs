use colored::Colorize;
use comfy_table::{Cell, Table};
use rust_decimal::Decimal;

use pocket::config::Config;
use pocket::error::Result;
use pocket::fmt::money;
use pocket::reports::BudgetLevel;

pub fn run(config: &Config) -> Result<()> {
    let pocket = super::open(config)?;
    let currency = pocket.currency();
    let summary = pocket.summary(&chrono::Local::now());

    let mut table = Table::new();
    table.set_header(vec!["", "Amount"]);
    table.add_row(vec![
        Cell::new("Income".green().bold()),
        Cell::new(money(summary.total_income, &currency)),
    ]);
    table.add_row(vec![
        Cell::new("Expenses".red().bold()),
        Cell::new(money(summary.total_expense, &currency)),
    ]);
    table.add_row(vec![
        Cell::new("Balance".bold()),
        Cell::new(money(summary.balance, &currency)),
    ]);
    println!("Overview\n{table}");

    if !summary.categories.is_empty() {
        let mut cats = Table::new();
        cats.set_header(vec!["Category", "Spent", "%"]);
        for (name, total) in &summary.categories {
            let pct = (*total / summary.total_expense * Decimal::ONE_HUNDRED).round_dp(1);
            cats.add_row(vec![
                Cell::new(name),
                Cell::new(money(*total, &currency)),
                Cell::new(format!("{pct:.1}%")),
            ]);
        }
        println!("\nSpending by category\n{cats}");
    }

    println!();
    if summary.budget.is_zero() {
        println!("No monthly budget set. Use `pocket budget <amount>`.");
        return Ok(());
    }
    let status = format!("{} ({}%)", summary.level.label(), summary.progress);
    let status = match summary.level {
        BudgetLevel::Ok => status.green(),
        BudgetLevel::Alert => status.yellow(),
        BudgetLevel::Warning | BudgetLevel::Exceeded => status.red().bold(),
    };
    println!(
        "This month: {} of {}  {status}",
        money(summary.monthly_expenses, &currency),
        money(summary.budget, &currency)
    );
    let remaining = summary.remaining();
    if remaining.is_sign_negative() {
        println!("Over budget by {}", money(remaining.abs(), &currency));
    } else {
        println!("Remaining: {}", money(remaining, &currency));
    }
    Ok(())
}
