//! Watchlist-agnostic domain types and pure decision logic.
//!
//! Everything in this module is side-effect free: the types carry data
//! between the watchlist, the evaluation tick and the dispatch
//! coordinator, and [`indicator`] / [`rule`] hold the pure math.

pub mod indicator;
pub mod rule;

mod alert;
mod instrument;
mod sample;

pub use alert::{AlertDecision, AlertRecord, DispatchOutcome, DispatchReport, Trigger};
pub use instrument::{Symbol, WatchedInstrument};
pub use sample::PriceSample;
