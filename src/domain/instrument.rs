//! Watched instruments and their symbols.

use std::fmt;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;

use crate::error::{Error, Result};

/// Exchange-qualified ticker symbol (e.g. `4250.SR`).
///
/// Upper-cased on construction so the same instrument can never appear
/// in the watchlist twice under different casings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol(String);

impl Symbol {
    pub fn new(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(Error::InvalidInput {
                reason: "symbol cannot be empty".into(),
            });
        }
        Ok(Self(trimmed.to_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Symbol {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// One watchlist entry, owned exclusively by the
/// [`WatchlistStore`](crate::service::WatchlistStore).
#[derive(Debug, Clone)]
pub struct WatchedInstrument {
    pub symbol: Symbol,
    /// Alert price: an alert may fire once the price is at or below this.
    pub threshold: Decimal,
    /// Muted entries are still evaluated but never auto-fire.
    pub muted: bool,
    pub last_alert_at: Option<NaiveDateTime>,
}

impl WatchedInstrument {
    pub fn new(symbol: Symbol, threshold: Decimal) -> Self {
        Self {
            symbol,
            threshold,
            muted: false,
            last_alert_at: None,
        }
    }
}
