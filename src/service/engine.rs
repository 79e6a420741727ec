//! Alert evaluation and dispatch.
//!
//! The engine walks the watchlist once per tick, pulls fresh data
//! through the indicator calculator, applies the evaluation rule and
//! fans every firing decision out to the configured channels and the
//! audit log. A second trigger path, manual fire, bypasses the rule
//! entirely.

use std::sync::Arc;
use std::time::Duration;

use chrono::{Datelike, Local, NaiveDateTime, Weekday};
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::domain::{
    indicator, rule, AlertDecision, AlertRecord, DispatchOutcome, DispatchReport, PriceSample,
    Trigger, WatchedInstrument,
};
use crate::error::Result;
use crate::port::{AuditLog, Channel, MarketData};
use crate::service::WatchlistStore;

/// Tunables shared by every symbol.
#[derive(Debug, Clone)]
pub struct EngineSettings {
    /// Process-wide RSI threshold; alerts require RSI at or below it.
    pub rsi_threshold: Decimal,
    /// Weekdays on which automatic alerts are withheld.
    pub suppressed_days: Vec<Weekday>,
    /// Upper bound on one channel delivery, so a stalled provider
    /// cannot stall the whole tick.
    pub channel_timeout: Duration,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            rsi_threshold: Decimal::from(30),
            suppressed_days: rule::DEFAULT_SUPPRESSED_DAYS.to_vec(),
            channel_timeout: Duration::from_secs(5),
        }
    }
}

/// The alert evaluation and dispatch engine.
pub struct AlertEngine {
    watchlist: Arc<WatchlistStore>,
    market_data: Arc<dyn MarketData>,
    channels: Vec<Arc<dyn Channel>>,
    audit_log: Arc<dyn AuditLog>,
    settings: EngineSettings,
}

impl AlertEngine {
    pub fn new(
        watchlist: Arc<WatchlistStore>,
        market_data: Arc<dyn MarketData>,
        channels: Vec<Arc<dyn Channel>>,
        audit_log: Arc<dyn AuditLog>,
        settings: EngineSettings,
    ) -> Self {
        Self {
            watchlist,
            market_data,
            channels,
            audit_log,
            settings,
        }
    }

    /// One synchronous evaluation pass over the whole watchlist.
    ///
    /// Returns one report per firing decision. A symbol whose data fetch
    /// fails is skipped for this tick with a warning; the rest of the
    /// watchlist still runs.
    pub async fn tick(&self) -> Vec<DispatchReport> {
        let entries = self.watchlist.entries();
        let recipient = self.watchlist.recipient();
        let suppressed_today =
            rule::is_suppressed_day(Local::now().weekday(), &self.settings.suppressed_days);

        let mut reports = Vec::new();
        for entry in entries {
            match self.evaluate(&entry, suppressed_today).await {
                Ok(Some(decision)) => {
                    let report = self.dispatch(&decision, &recipient).await;
                    self.watchlist
                        .mark_alerted(&decision.symbol, decision.snapshot.sampled_at);
                    reports.push(report);
                }
                Ok(None) => {}
                Err(e) => {
                    warn!(symbol = %entry.symbol, error = %e, "Skipping symbol for this tick");
                }
            }
        }
        reports
    }

    async fn evaluate(
        &self,
        entry: &WatchedInstrument,
        suppressed_today: bool,
    ) -> Result<Option<AlertDecision>> {
        let closes = self.market_data.close_history(&entry.symbol).await?;
        let sample = indicator::evaluate(entry.symbol.clone(), &closes, Local::now().naive_local());
        debug!(
            symbol = %sample.symbol,
            price = %sample.price,
            rsi = %sample.rsi,
            "Evaluated watchlist entry"
        );

        if rule::should_fire(&sample, entry, self.settings.rsi_threshold, suppressed_today) {
            Ok(Some(AlertDecision {
                symbol: entry.symbol.clone(),
                fire: true,
                trigger: Trigger::Auto,
                snapshot: sample,
            }))
        } else {
            Ok(None)
        }
    }

    /// Manual trigger for one watched symbol.
    ///
    /// Bypasses the price/RSI thresholds, the mute flag and the
    /// suppressed-day calendar; only the audit row's trigger label
    /// distinguishes it from an automatic fire. If fresh data cannot be
    /// fetched the alert still goes out with the sentinel sample.
    pub async fn fire_manual(
        &self,
        symbol: &str,
        recipient: Option<&str>,
    ) -> Result<DispatchReport> {
        let entry = self.watchlist.get(symbol)?;
        let recipient = recipient
            .map(str::to_owned)
            .unwrap_or_else(|| self.watchlist.recipient());

        let sampled_at = Local::now().naive_local();
        let sample = match self.market_data.close_history(&entry.symbol).await {
            Ok(closes) => indicator::evaluate(entry.symbol.clone(), &closes, sampled_at),
            Err(e) => {
                warn!(symbol = %entry.symbol, error = %e, "Manual fire without fresh data");
                sentinel_sample(&entry, sampled_at)
            }
        };

        let decision = AlertDecision {
            symbol: entry.symbol.clone(),
            fire: true,
            trigger: Trigger::Manual,
            snapshot: sample,
        };
        let report = self.dispatch(&decision, &recipient).await;
        self.watchlist.mark_alerted(&entry.symbol, sampled_at);
        Ok(report)
    }

    /// Reporting read path over the audit log. The engine never consults
    /// this history when deciding whether to fire.
    pub async fn audit_records(&self) -> Result<Vec<AlertRecord>> {
        self.audit_log.read_all().await
    }

    /// Fan one firing decision out to every configured channel, then
    /// append exactly one audit row.
    ///
    /// Channels are invoked at most once each, under the per-channel
    /// timeout, and a failure never aborts delivery to the others. The
    /// append happens unconditionally afterwards; if it fails the report
    /// carries the error but the notifications are not retracted.
    async fn dispatch(&self, decision: &AlertDecision, recipient: &str) -> DispatchReport {
        let message = render_message(&decision.snapshot);
        info!(
            symbol = %decision.symbol,
            trigger = %decision.trigger,
            channels = self.channels.len(),
            "Dispatching alert"
        );

        let mut outcomes = Vec::with_capacity(self.channels.len());
        for channel in &self.channels {
            let delivery =
                tokio::time::timeout(self.settings.channel_timeout, channel.send(recipient, &message));
            let outcome = match delivery.await {
                Ok(Ok(())) => DispatchOutcome::ok(channel.name()),
                Ok(Err(e)) => {
                    warn!(channel = channel.name(), error = %e, "Channel delivery failed");
                    DispatchOutcome::failed(channel.name(), e.to_string())
                }
                Err(_) => {
                    warn!(channel = channel.name(), "Channel delivery timed out");
                    DispatchOutcome::failed(
                        channel.name(),
                        format!("timed out after {:?}", self.settings.channel_timeout),
                    )
                }
            };
            outcomes.push(outcome);
        }

        let record = AlertRecord {
            at: decision.snapshot.sampled_at,
            symbol: decision.symbol.clone(),
            price: decision.snapshot.price,
            recipient: recipient.to_owned(),
            trigger: decision.trigger,
        };
        let log_error = match self.audit_log.append(&record).await {
            Ok(()) => None,
            Err(e) => {
                warn!(error = %e, "Audit append failed; alert was still delivered");
                Some(e.to_string())
            }
        };

        DispatchReport {
            symbol: decision.symbol.clone(),
            trigger: decision.trigger,
            outcomes,
            log_error,
        }
    }
}

fn sentinel_sample(entry: &WatchedInstrument, sampled_at: NaiveDateTime) -> PriceSample {
    PriceSample {
        symbol: entry.symbol.clone(),
        price: Decimal::ZERO,
        rsi: indicator::neutral_rsi(),
        sampled_at,
    }
}

/// Identical message for every channel: symbol, 2-dp price, 1-dp RSI.
fn render_message(sample: &PriceSample) -> String {
    format!(
        "{} dropped to {:.2} (RSI {:.1})",
        sample.symbol, sample.price, sample.rsi
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Symbol;
    use rust_decimal_macros::dec;

    #[test]
    fn message_carries_symbol_price_and_rsi() {
        let sample = PriceSample {
            symbol: Symbol::new("TEST.SR").unwrap(),
            price: dec!(19.5),
            rsi: dec!(25),
            sampled_at: NaiveDateTime::default(),
        };
        assert_eq!(render_message(&sample), "TEST.SR dropped to 19.50 (RSI 25.0)");
    }
}
