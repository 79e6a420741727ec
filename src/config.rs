//! Configuration loading and validation.
//!
//! Configuration is loaded from a TOML file with environment-variable
//! overrides for secrets: `TWILIO_AUTH_TOKEN` and `TELEGRAM_BOT_TOKEN`
//! are only ever read from the environment, never from the file.

use std::path::{Path, PathBuf};

use chrono::Weekday;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing_subscriber::{fmt, EnvFilter};

use crate::error::{ConfigError, Result};

/// Main application configuration.
#[derive(Debug, Deserialize)]
pub struct Config {
    /// Default recipient address for alerts (e.g. `whatsapp:+9665xxxxxxx`),
    /// used unless a manual fire overrides it.
    pub recipient: String,
    /// Process-wide RSI alert threshold, valid range 10..=50.
    #[serde(default = "default_rsi_threshold")]
    pub rsi_threshold: u32,
    /// Weekday names on which automatic alerts are withheld.
    #[serde(default = "default_suppressed_days")]
    pub suppressed_days: Vec<String>,
    /// Poll interval for the `run` loop.
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,
    /// Per-channel delivery timeout.
    #[serde(default = "default_channel_timeout")]
    pub channel_timeout_secs: u64,
    /// Seed watchlist entries.
    #[serde(default)]
    pub watchlist: Vec<WatchlistEntry>,
    #[serde(default)]
    pub market_data: MarketDataConfig,
    #[serde(default)]
    pub audit_log: AuditLogConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Phone-messaging channel; omit the section to disable it.
    pub twilio: Option<TwilioConfig>,
    /// Chat-bot channel; omitting the section, the token or the chat id
    /// disables it without error.
    pub telegram: Option<TelegramConfig>,
}

/// One seeded watchlist entry.
#[derive(Debug, Clone, Deserialize)]
pub struct WatchlistEntry {
    pub symbol: String,
    pub threshold: Decimal,
    #[serde(default)]
    pub muted: bool,
}

/// Market data provider settings.
#[derive(Debug, Clone, Deserialize)]
pub struct MarketDataConfig {
    #[serde(default = "default_market_api_url")]
    pub api_url: String,
    /// Calendar days of history to request; must cover the RSI lookback.
    #[serde(default = "default_lookback_days")]
    pub lookback_days: u32,
}

impl Default for MarketDataConfig {
    fn default() -> Self {
        Self {
            api_url: default_market_api_url(),
            lookback_days: default_lookback_days(),
        }
    }
}

/// Audit log settings.
#[derive(Debug, Clone, Deserialize)]
pub struct AuditLogConfig {
    #[serde(default = "default_audit_path")]
    pub path: PathBuf,
}

impl Default for AuditLogConfig {
    fn default() -> Self {
        Self {
            path: default_audit_path(),
        }
    }
}

/// Phone-messaging provider credentials and sender identity.
#[derive(Debug, Clone, Deserialize)]
pub struct TwilioConfig {
    pub account_sid: String,
    /// Loaded from `TWILIO_AUTH_TOKEN`, never from the file.
    #[serde(skip)]
    pub auth_token: String,
    /// Sender identity, e.g. `whatsapp:+14155238886`.
    pub from: String,
}

/// Chat-bot provider settings.
#[derive(Debug, Clone, Deserialize)]
pub struct TelegramConfig {
    /// Loaded from `TELEGRAM_BOT_TOKEN`, never from the file.
    #[serde(skip)]
    pub bot_token: String,
    #[serde(default)]
    pub chat_id: i64,
}

impl TelegramConfig {
    /// A missing token or chat id means "feature disabled", not an error.
    pub fn is_configured(&self) -> bool {
        !self.bot_token.is_empty() && self.chat_id != 0
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl LoggingConfig {
    /// Initialize the tracing subscriber with this logging configuration.
    pub fn init(&self) {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.level));

        match self.format.as_str() {
            "json" => {
                fmt().json().with_env_filter(filter).init();
            }
            _ => {
                fmt().with_env_filter(filter).init();
            }
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: "pretty".into(),
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;

        let mut config: Self = toml::from_str(&content).map_err(ConfigError::Parse)?;
        config.apply_env();
        config.validate()?;

        Ok(config)
    }

    /// Pull secrets from the environment into the typed config.
    fn apply_env(&mut self) {
        if let Some(twilio) = &mut self.twilio {
            if let Ok(token) = std::env::var("TWILIO_AUTH_TOKEN") {
                twilio.auth_token = token;
            }
        }
        if let Some(telegram) = &mut self.telegram {
            if let Ok(token) = std::env::var("TELEGRAM_BOT_TOKEN") {
                telegram.bot_token = token;
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.recipient.trim().is_empty() {
            return Err(ConfigError::MissingField { field: "recipient" }.into());
        }
        if !(10..=50).contains(&self.rsi_threshold) {
            return Err(ConfigError::InvalidValue {
                field: "rsi_threshold",
                reason: format!("must be within 10..=50, got {}", self.rsi_threshold),
            }
            .into());
        }
        self.suppressed_weekdays()?;
        for entry in &self.watchlist {
            if entry.symbol.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: "watchlist.symbol",
                    reason: "symbol cannot be empty".into(),
                }
                .into());
            }
            if entry.threshold < Decimal::ZERO {
                return Err(ConfigError::InvalidValue {
                    field: "watchlist.threshold",
                    reason: format!("must be >= 0, got {} for {}", entry.threshold, entry.symbol),
                }
                .into());
            }
        }
        if let Some(twilio) = &self.twilio {
            if twilio.account_sid.trim().is_empty() {
                return Err(ConfigError::MissingField {
                    field: "twilio.account_sid",
                }
                .into());
            }
            if twilio.from.trim().is_empty() {
                return Err(ConfigError::MissingField {
                    field: "twilio.from",
                }
                .into());
            }
            if twilio.auth_token.is_empty() {
                return Err(ConfigError::MissingField {
                    field: "TWILIO_AUTH_TOKEN",
                }
                .into());
            }
        }
        Ok(())
    }

    /// Parsed suppressed-day list.
    pub fn suppressed_weekdays(&self) -> Result<Vec<Weekday>> {
        self.suppressed_days
            .iter()
            .map(|raw| {
                raw.parse::<Weekday>().map_err(|_| {
                    ConfigError::InvalidValue {
                        field: "suppressed_days",
                        reason: format!("unrecognized weekday '{raw}'"),
                    }
                    .into()
                })
            })
            .collect()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            recipient: String::new(),
            rsi_threshold: default_rsi_threshold(),
            suppressed_days: default_suppressed_days(),
            poll_interval_secs: default_poll_interval(),
            channel_timeout_secs: default_channel_timeout(),
            watchlist: Vec::new(),
            market_data: MarketDataConfig::default(),
            audit_log: AuditLogConfig::default(),
            logging: LoggingConfig::default(),
            twilio: None,
            telegram: None,
        }
    }
}

fn default_rsi_threshold() -> u32 {
    30
}

fn default_suppressed_days() -> Vec<String> {
    vec!["fri".into(), "sat".into()]
}

fn default_poll_interval() -> u64 {
    300
}

fn default_channel_timeout() -> u64 {
    5
}

fn default_market_api_url() -> String {
    "https://query1.finance.yahoo.com".into()
}

fn default_lookback_days() -> u32 {
    7
}

fn default_audit_path() -> PathBuf {
    PathBuf::from("alerts.csv")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use rust_decimal_macros::dec;

    fn minimal() -> Config {
        toml::from_str(
            r#"
            recipient = "whatsapp:+15550100"

            [[watchlist]]
            symbol = "4250.sr"
            threshold = 21.5
            "#,
        )
        .unwrap()
    }

    #[test]
    fn minimal_config_gets_defaults() {
        let config = minimal();
        assert_eq!(config.rsi_threshold, 30);
        assert_eq!(config.suppressed_days, vec!["fri", "sat"]);
        assert_eq!(config.market_data.lookback_days, 7);
        assert_eq!(config.watchlist[0].threshold, dec!(21.5));
        assert!(!config.watchlist[0].muted);
        config.validate().unwrap();
    }

    #[test]
    fn rsi_threshold_outside_range_is_rejected() {
        let mut config = minimal();
        config.rsi_threshold = 55;
        let err = config.validate().unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::InvalidValue {
                field: "rsi_threshold",
                ..
            })
        ));
    }

    #[test]
    fn negative_watchlist_threshold_is_rejected() {
        let mut config = minimal();
        config.watchlist[0].threshold = dec!(-1);
        assert!(config.validate().is_err());
    }

    #[test]
    fn unknown_suppressed_day_is_rejected() {
        let mut config = minimal();
        config.suppressed_days = vec!["someday".into()];
        assert!(config.validate().is_err());
    }

    #[test]
    fn suppressed_days_parse_to_weekdays() {
        let config = minimal();
        assert_eq!(
            config.suppressed_weekdays().unwrap(),
            vec![Weekday::Fri, Weekday::Sat]
        );
    }

    #[test]
    fn twilio_section_without_token_is_rejected() {
        let mut config = minimal();
        config.twilio = Some(TwilioConfig {
            account_sid: "AC123".into(),
            auth_token: String::new(),
            from: "whatsapp:+14155238886".into(),
        });
        let err = config.validate().unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::MissingField {
                field: "TWILIO_AUTH_TOKEN"
            })
        ));
    }

    #[test]
    fn telegram_without_credentials_is_disabled_not_an_error() {
        let mut config = minimal();
        config.telegram = Some(TelegramConfig {
            bot_token: String::new(),
            chat_id: 0,
        });
        config.validate().unwrap();
        assert!(!config.telegram.as_ref().unwrap().is_configured());
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = Config::load("definitely-not-here.toml").unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::ReadFile(_))));
    }

    #[test]
    fn load_reads_and_validates_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
            recipient = "whatsapp:+15550100"
            rsi_threshold = 25

            [audit_log]
            path = "log.csv"
            "#,
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.rsi_threshold, 25);
        assert_eq!(config.audit_log.path, PathBuf::from("log.csv"));
    }
}
