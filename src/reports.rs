use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, TimeZone};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::{Kind, TimePoint, Transaction};

// ---------------------------------------------------------------------------
// Totals
// ---------------------------------------------------------------------------

/// Sums saturate at `Decimal::MAX`/`Decimal::MIN` instead of overflowing.
fn saturating_sum(amounts: impl Iterator<Item = Decimal>) -> Decimal {
    amounts.fold(Decimal::ZERO, Decimal::saturating_add)
}

fn sum_kind(transactions: &[Transaction], kind: Kind) -> Decimal {
    saturating_sum(transactions.iter().filter(|t| t.kind == kind).map(|t| t.amount))
}

pub fn total_income(transactions: &[Transaction]) -> Decimal {
    sum_kind(transactions, Kind::Income)
}

pub fn total_expense(transactions: &[Transaction]) -> Decimal {
    sum_kind(transactions, Kind::Expense)
}

pub fn balance(transactions: &[Transaction]) -> Decimal {
    total_income(transactions).saturating_sub(total_expense(transactions))
}

// ---------------------------------------------------------------------------
// Category spending
// ---------------------------------------------------------------------------

/// Expense totals per category. Categories whose total is not strictly
/// positive are left out.
pub fn category_spending(transactions: &[Transaction]) -> BTreeMap<String, Decimal> {
    let mut totals: BTreeMap<String, Decimal> = BTreeMap::new();
    for t in transactions.iter().filter(|t| t.kind == Kind::Expense) {
        let total = totals.entry(t.category.clone()).or_default();
        *total = total.saturating_add(t.amount);
    }
    totals.retain(|_, total| *total > Decimal::ZERO);
    totals
}

// ---------------------------------------------------------------------------
// Monthly budget
// ---------------------------------------------------------------------------

/// Sum of expenses in the calendar month of `reference`, evaluated in
/// `reference`'s timezone.
pub fn monthly_expenses<Tz: TimeZone>(transactions: &[Transaction], reference: &DateTime<Tz>) -> Decimal {
    let tz = reference.timezone();
    saturating_sum(
        transactions
            .iter()
            .filter(|t| t.kind == Kind::Expense)
            .filter(|t| match tz.timestamp_millis_opt(t.timestamp).single() {
                Some(at) => at.year() == reference.year() && at.month() == reference.month(),
                None => false,
            })
            .map(|t| t.amount),
    )
}

/// Percentage of the budget spent, rounded to the nearest integer. Not
/// clamped: 150 means fifty percent over budget.
pub fn budget_progress(budget: Decimal, expenses: Decimal) -> i64 {
    if budget <= Decimal::ZERO {
        return 0;
    }
    expenses
        .checked_div(budget)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .map(|pct| pct.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|pct| pct.to_i64())
        .unwrap_or(i64::MAX)
}

/// What is left of the budget; negative once it is exceeded.
pub fn budget_remaining(budget: Decimal, expenses: Decimal) -> Decimal {
    budget.saturating_sub(expenses)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum BudgetLevel {
    Ok,
    Alert,
    Warning,
    Exceeded,
}

impl BudgetLevel {
    pub fn label(self) -> &'static str {
        match self {
            BudgetLevel::Ok => "On track",
            BudgetLevel::Alert => "Budget alert",
            BudgetLevel::Warning => "Budget warning",
            BudgetLevel::Exceeded => "Budget exceeded",
        }
    }
}

pub fn budget_level(progress: i64) -> BudgetLevel {
    match progress {
        p if p >= 100 => BudgetLevel::Exceeded,
        p if p >= 90 => BudgetLevel::Warning,
        p if p >= 70 => BudgetLevel::Alert,
        _ => BudgetLevel::Ok,
    }
}

// ---------------------------------------------------------------------------
// Chart series
// ---------------------------------------------------------------------------

fn series(transactions: &[Transaction], kind: Kind) -> Vec<TimePoint> {
    let mut buckets: BTreeMap<i64, Decimal> = BTreeMap::new();
    for t in transactions.iter().filter(|t| t.kind == kind) {
        let total = buckets.entry(t.timestamp).or_default();
        *total = total.saturating_add(t.amount);
    }
    buckets
        .into_iter()
        .map(|(timestamp, total)| TimePoint { timestamp, total })
        .collect()
}

/// Income summed per exact timestamp, ascending.
pub fn income_series(transactions: &[Transaction]) -> Vec<TimePoint> {
    series(transactions, Kind::Income)
}

/// Expenses summed per exact timestamp, ascending.
pub fn expense_series(transactions: &[Transaction]) -> Vec<TimePoint> {
    series(transactions, Kind::Expense)
}

// ---------------------------------------------------------------------------
// Summary
// ---------------------------------------------------------------------------

pub struct Summary {
    pub total_income: Decimal,
    pub total_expense: Decimal,
    pub balance: Decimal,
    pub categories: BTreeMap<String, Decimal>,
    pub budget: Decimal,
    pub monthly_expenses: Decimal,
    pub progress: i64,
    pub level: BudgetLevel,
}

impl Summary {
    pub fn from_transactions<Tz: TimeZone>(
        transactions: &[Transaction],
        budget: Decimal,
        reference: &DateTime<Tz>,
    ) -> Self {
        let total_income = total_income(transactions);
        let total_expense = total_expense(transactions);
        let monthly = monthly_expenses(transactions, reference);
        let progress = budget_progress(budget, monthly);
        Self {
            total_income,
            total_expense,
            balance: total_income.saturating_sub(total_expense),
            categories: category_spending(transactions),
            budget,
            monthly_expenses: monthly,
            progress,
            level: budget_level(progress),
        }
    }

    pub fn remaining(&self) -> Decimal {
        budget_remaining(self.budget, self.monthly_expenses)
    }
}
