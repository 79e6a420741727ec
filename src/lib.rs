//! Oversold - stock watchlist alerting with RSI-based triggers.
//!
//! This crate polls prices for a watchlist of instruments, computes an
//! RSI-14 momentum oscillator per symbol, decides whether an alert
//! should fire and delivers it across independent notification channels
//! while appending one auditable log row per attempt.
//!
//! # Architecture
//!
//! The crate keeps the decision logic pure and pushes every provider
//! behind a port trait:
//!
//! - **`domain`** — value types, the RSI-14 calculator and the
//!   fire/no-fire evaluation rule (inclusive thresholds, mute flag,
//!   suppressed-day calendar)
//! - **`port`** — `MarketData`, `Channel` and `AuditLog` traits
//! - **`service`** — the `WatchlistStore` (shared mutable state behind a
//!   single lock) and the `AlertEngine`, whose dispatch coordinator fans
//!   a firing decision out to every configured channel, tolerating
//!   partial failure, before appending the audit row
//! - **`adapter`** — Yahoo-style chart API market data, Twilio WhatsApp
//!   and Telegram channels, CSV-file audit log
//!
//! # Modules
//!
//! - [`config`] - Configuration loading from TOML with env-var secrets
//! - [`domain`] - Value types and pure decision logic
//! - [`error`] - Error types for the crate
//! - [`port`] - Trait definitions for external collaborators
//! - [`service`] - Watchlist state and the alert engine
//! - [`adapter`] - Provider implementations of the ports
//! - [`app`] - Application wiring and the poll loop
//!
//! # Features
//!
//! - `telegram` (default) - Enable the Telegram chat channel
//! - `testkit` - Expose scripted fakes for integration tests
//!
//! # Example
//!
//! ```no_run
//! use oversold::app::App;
//! use oversold::config::Config;
//!
//! # fn main() -> oversold::error::Result<()> {
//! let config = Config::load("config.toml")?;
//! let app = App::build(&config)?;
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod app;
pub mod config;
pub mod domain;
pub mod error;
pub mod port;
pub mod service;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
