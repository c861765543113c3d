//! Monetary amounts as returned by the Storefront API.
//!
//! Shopify returns decimal amounts as strings. They are kept verbatim so that
//! `"12.00"` renders as `"12.00"` and never as `"12"`.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Monetary amount with currency code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Money {
    /// Decimal amount as string (preserves precision).
    pub amount: String,
    /// ISO 4217 currency code.
    pub currency_code: String,
}

impl Money {
    /// Create a new money value.
    #[must_use]
    pub fn new(amount: impl Into<String>, currency_code: impl Into<String>) -> Self {
        Self {
            amount: amount.into(),
            currency_code: currency_code.into(),
        }
    }

    /// Price label for display, e.g. `"12.00 USD"`.
    ///
    /// Returns an empty string when there is no money value or its amount is
    /// empty; an empty label is never shown. A missing currency code leaves
    /// just the amount.
    #[must_use]
    pub fn label(money: Option<&Self>) -> String {
        match money {
            Some(m) if m.amount.is_empty() => String::new(),
            Some(m) if m.currency_code.is_empty() => m.amount.clone(),
            Some(m) => m.to_string(),
            None => String::new(),
        }
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount, self.currency_code)
    }
}
