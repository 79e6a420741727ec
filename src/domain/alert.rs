//! Alert decisions, per-channel dispatch outcomes and durable audit rows.

use std::fmt;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;

use super::{PriceSample, Symbol};

/// What caused an alert to fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// The evaluation rule fired on price and RSI thresholds.
    Auto,
    /// An operator fired the alert directly, bypassing every condition.
    Manual,
}

impl Trigger {
    /// Label written to the audit log's trigger column.
    pub fn label(self) -> &'static str {
        match self {
            Trigger::Auto => "Auto",
            Trigger::Manual => "Manual",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim() {
            "Auto" => Some(Trigger::Auto),
            "Manual" => Some(Trigger::Manual),
            _ => None,
        }
    }
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A firing decision for one symbol, consumed immediately by the
/// dispatch coordinator.
#[derive(Debug, Clone)]
pub struct AlertDecision {
    pub symbol: Symbol,
    pub fire: bool,
    pub trigger: Trigger,
    pub snapshot: PriceSample,
}

/// One durable audit row per alert attempt.
///
/// Append-only and insertion-ordered; written whenever the dispatch
/// coordinator runs for a firing decision, regardless of how many
/// channels actually delivered.
#[derive(Debug, Clone, PartialEq)]
pub struct AlertRecord {
    pub at: NaiveDateTime,
    pub symbol: Symbol,
    pub price: Decimal,
    pub recipient: String,
    pub trigger: Trigger,
}

/// Result of a single channel invocation.
#[derive(Debug, Clone)]
pub struct DispatchOutcome {
    pub channel: &'static str,
    pub success: bool,
    pub error: Option<String>,
}

impl DispatchOutcome {
    pub fn ok(channel: &'static str) -> Self {
        Self {
            channel,
            success: true,
            error: None,
        }
    }

    pub fn failed(channel: &'static str, error: impl Into<String>) -> Self {
        Self {
            channel,
            success: false,
            error: Some(error.into()),
        }
    }
}

/// Aggregated result of dispatching one firing decision.
#[derive(Debug, Clone)]
pub struct DispatchReport {
    pub symbol: Symbol,
    pub trigger: Trigger,
    pub outcomes: Vec<DispatchOutcome>,
    /// Set when the audit append failed. The notifications already sent
    /// are not retracted.
    pub log_error: Option<String>,
}

impl DispatchReport {
    /// Number of channels that accepted the message.
    pub fn delivered(&self) -> usize {
        self.outcomes.iter().filter(|o| o.success).count()
    }

    /// Number of channels that failed or timed out.
    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.delivered()
    }

    /// Whether the audit row made it to the log.
    pub fn logged(&self) -> bool {
        self.log_error.is_none()
    }
}
