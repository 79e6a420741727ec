//! Market data over the Yahoo-style chart HTTP API.

use async_trait::async_trait;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::config::MarketDataConfig;
use crate::domain::Symbol;
use crate::error::{Error, Result};
use crate::port::MarketData;

/// Close-history fetcher for the `/v8/finance/chart/{symbol}` endpoint.
pub struct YahooMarketData {
    http: reqwest::Client,
    api_url: String,
    lookback_days: u32,
}

impl YahooMarketData {
    pub fn new(config: MarketDataConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_url: config.api_url,
            lookback_days: config.lookback_days,
        }
    }

    fn unavailable(symbol: &Symbol, reason: impl ToString) -> Error {
        Error::DataUnavailable {
            symbol: symbol.to_string(),
            reason: reason.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: Chart,
}

#[derive(Debug, Deserialize)]
struct Chart {
    #[serde(default)]
    result: Option<Vec<ChartResult>>,
    #[serde(default)]
    error: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Vec<Quote>,
}

#[derive(Debug, Deserialize)]
struct Quote {
    #[serde(default)]
    close: Vec<Option<f64>>,
}

#[async_trait]
impl MarketData for YahooMarketData {
    async fn close_history(&self, symbol: &Symbol) -> Result<Vec<Decimal>> {
        let url = format!("{}/v8/finance/chart/{}", self.api_url, symbol);
        let response = self
            .http
            .get(&url)
            .query(&[
                ("range", format!("{}d", self.lookback_days)),
                ("interval", "1d".to_string()),
            ])
            .send()
            .await
            .map_err(|e| Self::unavailable(symbol, e))?
            .error_for_status()
            .map_err(|e| Self::unavailable(symbol, e))?;

        let body: ChartResponse = response
            .json()
            .await
            .map_err(|e| Self::unavailable(symbol, e))?;

        if let Some(provider_error) = body.chart.error {
            return Err(Self::unavailable(symbol, provider_error));
        }

        let quote = body
            .chart
            .result
            .and_then(|mut results| {
                if results.is_empty() {
                    None
                } else {
                    Some(results.remove(0))
                }
            })
            .and_then(|result| result.indicators.quote.into_iter().next())
            .ok_or_else(|| Self::unavailable(symbol, "empty chart result"))?;

        // Nulls appear on non-trading days; drop them rather than zero-fill.
        Ok(quote
            .close
            .into_iter()
            .flatten()
            .filter_map(Decimal::from_f64)
            .collect())
    }
}
