//! Currency codes, pairs and directly configured rates.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Currency code, e.g. `USD`.
///
/// Codes are uppercased on construction. Everything past construction
/// compares codes byte for byte.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Currency(String);

impl Currency {
    /// Create a new currency from code.
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into().trim().to_uppercase())
    }

    /// Get the currency code.
    pub fn code(&self) -> &str {
        &self.0
    }

    /// Check if the code is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Common currencies
    pub fn usd() -> Self {
        Self::new("USD")
    }

    pub fn eur() -> Self {
        Self::new("EUR")
    }

    pub fn gbp() -> Self {
        Self::new("GBP")
    }

    pub fn jpy() -> Self {
        Self::new("JPY")
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Currency {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Currency {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

/// An ordered currency pair. Also the key of the derived rate cache.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CurrencyPair {
    /// Currency being converted from.
    pub base: Currency,
    /// Currency being converted to.
    pub quote: Currency,
}

impl CurrencyPair {
    /// Create a new currency pair.
    pub fn new(base: Currency, quote: Currency) -> Self {
        Self { base, quote }
    }

}

impl fmt::Display for CurrencyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.base, self.quote)
    }
}

/// A directly configured exchange rate: one unit of `from` buys `rate`
/// units of `to`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectRate {
    pub from: Currency,
    pub to: Currency,
    pub rate: f64,
}

impl DirectRate {
    /// Create a new direct rate.
    pub fn new(from: impl Into<Currency>, to: impl Into<Currency>, rate: f64) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            rate,
        }
    }

    /// The pair this rate quotes.
    pub fn pair(&self) -> CurrencyPair {
        CurrencyPair::new(self.from.clone(), self.to.clone())
    }

    /// The reciprocal edge, `to -> from` at `1 / rate`.
    pub fn reciprocal(&self) -> Self {
        Self {
            from: self.to.clone(),
            to: self.from.clone(),
            rate: 1.0 / self.rate,
        }
    }

    /// A usable rate is positive and finite, and so is its reciprocal.
    pub fn is_valid(&self) -> bool {
        self.rate.is_finite() && self.rate > 0.0 && (1.0 / self.rate).is_finite()
    }
}

impl fmt::Display for DirectRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{} @ {}", self.from, self.to, self.rate)
    }
}
