//! Wiring from validated configuration to a running engine.

use std::sync::Arc;
use std::time::Duration;

use rust_decimal::Decimal;
use tracing::info;

#[cfg(feature = "telegram")]
use crate::adapter::TelegramChannel;
use crate::adapter::{CsvAuditLog, TwilioChannel, YahooMarketData};
use crate::config::Config;
use crate::error::Result;
use crate::port::Channel;
use crate::service::{AlertEngine, EngineSettings, WatchlistStore};

/// The assembled application: watchlist, engine and poll schedule.
pub struct App {
    pub watchlist: Arc<WatchlistStore>,
    pub engine: AlertEngine,
    poll_interval: Duration,
}

impl App {
    /// Build the engine from a validated config: seed the watchlist and
    /// construct one adapter per configured channel.
    pub fn build(config: &Config) -> Result<Self> {
        let watchlist = Arc::new(WatchlistStore::new(config.recipient.clone()));
        for entry in &config.watchlist {
            let symbol = watchlist.add(&entry.symbol, entry.threshold)?;
            if entry.muted {
                watchlist.set_muted(symbol.as_str(), true)?;
            }
        }

        let market_data = Arc::new(YahooMarketData::new(config.market_data.clone()));

        let mut channels: Vec<Arc<dyn Channel>> = Vec::new();
        if let Some(twilio) = &config.twilio {
            channels.push(Arc::new(TwilioChannel::new(twilio.clone())));
        }
        #[cfg(feature = "telegram")]
        if let Some(telegram) = &config.telegram {
            if telegram.is_configured() {
                channels.push(Arc::new(TelegramChannel::new(
                    telegram.bot_token.clone(),
                    telegram.chat_id,
                )));
            } else {
                info!("Telegram channel not configured, skipping");
            }
        }
        if channels.is_empty() {
            info!("No notification channels configured; alerts only reach the audit log");
        }

        let audit_log = Arc::new(CsvAuditLog::new(config.audit_log.path.clone()));

        let settings = EngineSettings {
            rsi_threshold: Decimal::from(config.rsi_threshold),
            suppressed_days: config.suppressed_weekdays()?,
            channel_timeout: Duration::from_secs(config.channel_timeout_secs),
        };
        let engine = AlertEngine::new(
            watchlist.clone(),
            market_data,
            channels,
            audit_log,
            settings,
        );

        Ok(Self {
            watchlist,
            engine,
            poll_interval: Duration::from_secs(config.poll_interval_secs),
        })
    }

    /// Periodic evaluation loop. Runs until the surrounding task is
    /// cancelled (ctrl-c in the binary).
    pub async fn run(&self) -> Result<()> {
        info!(
            symbols = self.watchlist.len(),
            interval_secs = self.poll_interval.as_secs(),
            "Starting evaluation loop"
        );
        let mut interval = tokio::time::interval(self.poll_interval);
        loop {
            interval.tick().await;
            let reports = self.engine.tick().await;
            info!(fired = reports.len(), "Evaluation tick complete");
        }
    }
}
