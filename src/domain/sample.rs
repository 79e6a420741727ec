//! Per-tick market snapshots.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;

use super::Symbol;

/// Freshly fetched price and indicator value for one symbol.
///
/// Ephemeral: produced by the indicator calculator each evaluation tick,
/// consumed by the rule and the dispatch coordinator, never persisted.
/// A price of zero means "no data" (empty fetched series), not a real quote.
#[derive(Debug, Clone)]
pub struct PriceSample {
    pub symbol: Symbol,
    pub price: Decimal,
    pub rsi: Decimal,
    pub sampled_at: NaiveDateTime,
}
