//! Currency amounts as returned in price fields.

use std::cmp::Ordering;
use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A decimal amount with an optional ISO 4217 currency code.
///
/// Amounts in different currencies are not ordered against each other:
/// `partial_cmp` returns `None` for them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Money {
    pub amount: Decimal,
    pub currency: Option<String>,
}

impl Money {
    #[must_use]
    pub fn new(amount: Decimal, currency: Option<&str>) -> Self {
        Self {
            amount,
            currency: currency
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(str::to_ascii_uppercase),
        }
    }

    /// Display symbol for the currency, e.g. `£` for `GBP`.
    ///
    /// Unknown codes render as the code followed by a space; a missing
    /// currency renders as an empty string.
    #[must_use]
    pub fn symbol(&self) -> String {
        let Some(code) = self.currency.as_deref() else {
            return String::new();
        };
        match code {
            "GBP" => "£".to_string(),
            "USD" => "$".to_string(),
            "EUR" => "€".to_string(),
            "AUD" => "AU $".to_string(),
            "CAD" => "C $".to_string(),
            "INR" => "Rs. ".to_string(),
            "HKD" => "HK $".to_string(),
            "SGD" => "S $".to_string(),
            other => format!("{other} "),
        }
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:.2}", self.symbol(), self.amount)
    }
}

impl PartialOrd for Money {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self.currency == other.currency {
            Some(self.amount.cmp(&other.amount))
        } else {
            None
        }
    }
}
