use std::sync::Arc;

use rust_decimal::Decimal;

use crate::error::Result;
use crate::store::{
    RecordStore, KEY_DARK_MODE, KEY_IS_LOGGED_IN, KEY_MONTHLY_BUDGET, KEY_SELECTED_CURRENCY,
};

pub const DEFAULT_CURRENCY: &str = "$";

/// Typed accessors for the scalar settings. Each field is read and written on
/// its own; there is no cross-field invariant.
pub struct Settings {
    store: Arc<RecordStore>,
}

impl Settings {
    pub fn new(store: Arc<RecordStore>) -> Self {
        Self { store }
    }

    pub fn monthly_budget(&self) -> Decimal {
        self.store.read_scalar(KEY_MONTHLY_BUDGET, Decimal::ZERO)
    }

    pub fn set_monthly_budget(&self, budget: Decimal) -> Result<()> {
        self.store.write_scalar(KEY_MONTHLY_BUDGET, &budget)
    }

    pub fn currency(&self) -> String {
        self.store.read_scalar(KEY_SELECTED_CURRENCY, DEFAULT_CURRENCY.to_string())
    }

    pub fn set_currency(&self, currency: &str) -> Result<()> {
        self.store.write_scalar(KEY_SELECTED_CURRENCY, currency)
    }

    pub fn dark_mode(&self) -> bool {
        self.store.read_scalar(KEY_DARK_MODE, false)
    }

    pub fn set_dark_mode(&self, enabled: bool) -> Result<()> {
        self.store.write_scalar(KEY_DARK_MODE, &enabled)
    }

    pub fn logged_in(&self) -> bool {
        self.store.read_scalar(KEY_IS_LOGGED_IN, false)
    }

    pub fn set_logged_in(&self, logged_in: bool) -> Result<()> {
        self.store.write_scalar(KEY_IS_LOGGED_IN, &logged_in)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn test_settings() -> Settings {
        Settings::new(Arc::new(RecordStore::open_in_memory().unwrap()))
    }

    #[test]
    fn test_defaults_when_missing() {
        let s = test_settings();
        assert_eq!(s.monthly_budget(), Decimal::ZERO);
        assert_eq!(s.currency(), "$");
        assert!(!s.dark_mode());
        assert!(!s.logged_in());
    }

    #[test]
    fn test_fields_are_independent() {
        let s = test_settings();
        s.set_monthly_budget(dec!(1200.50)).unwrap();
        s.set_dark_mode(true).unwrap();
        assert_eq!(s.monthly_budget(), dec!(1200.50));
        assert!(s.dark_mode());
        assert_eq!(s.currency(), "$");
        assert!(!s.logged_in());

        s.set_currency("LKR").unwrap();
        s.set_logged_in(true).unwrap();
        assert_eq!(s.currency(), "LKR");
        assert!(s.logged_in());
        assert_eq!(s.monthly_budget(), dec!(1200.50));
    }

    #[test]
    fn test_negative_budget_is_stored_as_given() {
        let s = test_settings();
        s.set_monthly_budget(dec!(-5)).unwrap();
        assert_eq!(s.monthly_budget(), dec!(-5));
    }
}
