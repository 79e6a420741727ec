//! Scripted market data for tests.

use std::collections::HashMap;

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::domain::Symbol;
use crate::error::{Error, Result};
use crate::port::MarketData;

/// Market data source returning canned close series per symbol.
/// Symbols without a scripted series report `DataUnavailable`.
#[derive(Default)]
pub struct ScriptedMarketData {
    series: HashMap<String, Vec<Decimal>>,
}

impl ScriptedMarketData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_series(mut self, symbol: &str, closes: Vec<Decimal>) -> Self {
        self.series.insert(symbol.to_uppercase(), closes);
        self
    }
}

#[async_trait]
impl MarketData for ScriptedMarketData {
    async fn close_history(&self, symbol: &Symbol) -> Result<Vec<Decimal>> {
        self.series
            .get(symbol.as_str())
            .cloned()
            .ok_or_else(|| Error::DataUnavailable {
                symbol: symbol.to_string(),
                reason: "no scripted series".into(),
            })
    }
}
