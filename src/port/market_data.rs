//! Market data port.

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::domain::Symbol;
use crate::error::Result;

/// Close-price history source for one symbol.
///
/// # Implementation Notes
///
/// - Implementations must be thread-safe (`Send + Sync`)
/// - Fetch failures are reported as
///   [`Error::DataUnavailable`](crate::error::Error::DataUnavailable) so
///   the evaluation tick can skip the symbol and continue with the rest
#[async_trait]
pub trait MarketData: Send + Sync {
    /// Daily closes, oldest first, covering at least the indicator
    /// lookback window plus the current day.
    async fn close_history(&self, symbol: &Symbol) -> Result<Vec<Decimal>>;
}
