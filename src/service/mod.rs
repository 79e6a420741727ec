//! Watchlist state and the alert evaluation/dispatch engine.

mod engine;
mod watchlist;

pub use engine::{AlertEngine, EngineSettings};
pub use watchlist::WatchlistStore;
