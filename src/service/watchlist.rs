//! Process-wide watchlist state.

use std::collections::HashMap;

use chrono::NaiveDateTime;
use parking_lot::Mutex;
use rust_decimal::Decimal;

use crate::domain::{Symbol, WatchedInstrument};
use crate::error::{Error, Result};

/// Mutable watchlist shared between the evaluation tick and any
/// manual-trigger callers.
///
/// One lock guards the whole map; request rates are low and every read
/// the dispatch path needs is snapshotted before blocking I/O starts, so
/// the lock is never held across a channel call or a log append.
pub struct WatchlistStore {
    inner: Mutex<Inner>,
}

struct Inner {
    entries: HashMap<Symbol, WatchedInstrument>,
    recipient: String,
}

impl WatchlistStore {
    pub fn new(default_recipient: impl Into<String>) -> Self {
        Self {
            inner: Mutex::new(Inner {
                entries: HashMap::new(),
                recipient: default_recipient.into(),
            }),
        }
    }

    /// Insert a symbol or overwrite its threshold, preserving the mute
    /// flag and alert history of an existing entry. The symbol is
    /// case-normalized so `4250.sr` and `4250.SR` are one entry.
    pub fn add(&self, symbol: &str, threshold: Decimal) -> Result<Symbol> {
        let symbol = Symbol::new(symbol)?;
        if threshold < Decimal::ZERO {
            return Err(Error::InvalidInput {
                reason: format!("threshold must be >= 0, got {threshold}"),
            });
        }
        let mut inner = self.inner.lock();
        inner
            .entries
            .entry(symbol.clone())
            .and_modify(|entry| entry.threshold = threshold)
            .or_insert_with(|| WatchedInstrument::new(symbol.clone(), threshold));
        Ok(symbol)
    }

    /// Explicitly remove a symbol. Entries are never removed any other way.
    pub fn remove(&self, symbol: &str) -> Result<()> {
        let symbol = Symbol::new(symbol)?;
        let mut inner = self.inner.lock();
        inner
            .entries
            .remove(&symbol)
            .map(|_| ())
            .ok_or_else(|| Error::NotFound {
                symbol: symbol.to_string(),
            })
    }

    pub fn set_muted(&self, symbol: &str, muted: bool) -> Result<()> {
        let symbol = Symbol::new(symbol)?;
        let mut inner = self.inner.lock();
        match inner.entries.get_mut(&symbol) {
            Some(entry) => {
                entry.muted = muted;
                Ok(())
            }
            None => Err(Error::NotFound {
                symbol: symbol.to_string(),
            }),
        }
    }

    pub fn get(&self, symbol: &str) -> Result<WatchedInstrument> {
        let symbol = Symbol::new(symbol)?;
        self.inner
            .lock()
            .entries
            .get(&symbol)
            .cloned()
            .ok_or_else(|| Error::NotFound {
                symbol: symbol.to_string(),
            })
    }

    /// Snapshot of every entry, sorted by symbol so a tick walks the
    /// watchlist in a stable order.
    pub fn entries(&self) -> Vec<WatchedInstrument> {
        let mut entries: Vec<_> = self.inner.lock().entries.values().cloned().collect();
        entries.sort_by(|a, b| a.symbol.cmp(&b.symbol));
        entries
    }

    /// Process-wide default recipient, used unless a caller overrides it
    /// per invocation.
    pub fn recipient(&self) -> String {
        self.inner.lock().recipient.clone()
    }

    pub fn set_recipient(&self, recipient: impl Into<String>) {
        self.inner.lock().recipient = recipient.into();
    }

    /// Record that an alert was dispatched for `symbol`. A no-op if the
    /// entry was removed while the dispatch was in flight.
    pub fn mark_alerted(&self, symbol: &Symbol, at: NaiveDateTime) {
        if let Some(entry) = self.inner.lock().entries.get_mut(symbol) {
            entry.last_alert_at = Some(at);
        }
    }

    pub fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
