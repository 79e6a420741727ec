//! Watchlist store behavior, including concurrent mutation.

use std::sync::Arc;

use oversold::error::Error;
use oversold::service::WatchlistStore;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

#[test]
fn add_is_case_normalized_and_overwrites_threshold() {
    let store = WatchlistStore::new("whatsapp:+15550100");

    store.add("4250.sr", dec!(21.5)).unwrap();
    store.add("4250.SR", dec!(22.0)).unwrap();

    let entries = store.entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].symbol.as_str(), "4250.SR");
    assert_eq!(entries[0].threshold, dec!(22.0));
}

#[test]
fn overwrite_preserves_mute_flag() {
    let store = WatchlistStore::new("whatsapp:+15550100");
    store.add("6001.SR", dec!(34.0)).unwrap();
    store.set_muted("6001.SR", true).unwrap();

    store.add("6001.sr", dec!(33.0)).unwrap();

    let entry = store.get("6001.SR").unwrap();
    assert!(entry.muted);
    assert_eq!(entry.threshold, dec!(33.0));
}

#[test]
fn negative_threshold_is_rejected_without_state_change() {
    let store = WatchlistStore::new("whatsapp:+15550100");

    let err = store.add("4161.SR", dec!(-1)).unwrap_err();

    assert!(matches!(err, Error::InvalidInput { .. }));
    assert!(store.is_empty());
}

#[test]
fn empty_symbol_is_rejected() {
    let store = WatchlistStore::new("whatsapp:+15550100");
    let err = store.add("  ", Decimal::ONE).unwrap_err();
    assert!(matches!(err, Error::InvalidInput { .. }));
}

#[test]
fn muting_an_unknown_symbol_is_not_found() {
    let store = WatchlistStore::new("whatsapp:+15550100");
    let err = store.set_muted("GHOST.SR", true).unwrap_err();
    assert!(matches!(err, Error::NotFound { .. }));
}

#[test]
fn removal_is_explicit_and_checked() {
    let store = WatchlistStore::new("whatsapp:+15550100");
    store.add("4250.SR", dec!(21.5)).unwrap();

    store.remove("4250.sr").unwrap();
    assert!(store.is_empty());

    let err = store.remove("4250.SR").unwrap_err();
    assert!(matches!(err, Error::NotFound { .. }));
}

#[test]
fn entries_are_sorted_by_symbol() {
    let store = WatchlistStore::new("whatsapp:+15550100");
    store.add("6001.SR", dec!(34.0)).unwrap();
    store.add("4161.SR", dec!(23.0)).unwrap();
    store.add("4250.SR", dec!(21.5)).unwrap();

    let symbols: Vec<_> = store
        .entries()
        .into_iter()
        .map(|e| e.symbol.to_string())
        .collect();
    assert_eq!(symbols, ["4161.SR", "4250.SR", "6001.SR"]);
}

#[test]
fn default_recipient_can_be_replaced() {
    let store = WatchlistStore::new("whatsapp:+15550100");
    assert_eq!(store.recipient(), "whatsapp:+15550100");

    store.set_recipient("whatsapp:+15550199");
    assert_eq!(store.recipient(), "whatsapp:+15550199");
}

#[test]
fn concurrent_writers_do_not_lose_entries() {
    let store = Arc::new(WatchlistStore::new("whatsapp:+15550100"));

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let store = store.clone();
            std::thread::spawn(move || {
                for j in 0..50 {
                    store
                        .add(&format!("{i}{j:02}.SR"), Decimal::from(j))
                        .unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(store.len(), 8 * 50);
}
