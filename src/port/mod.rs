//! Capability traits at the engine's seams.
//!
//! The engine holds every collaborator behind one of these traits so the
//! external providers (market data, messaging, the spreadsheet-style
//! log) can be swapped for fakes in tests.

mod audit;
mod channel;
mod market_data;

pub use audit::AuditLog;
pub use channel::Channel;
pub use market_data::MarketData;
