//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`market`] — scripted [`MarketData`](crate::port::MarketData) fakes.
//! - [`channel`] — recording/failing [`Channel`](crate::port::Channel) fakes.
//! - [`audit`] — in-memory [`AuditLog`](crate::port::AuditLog).

pub mod audit;
pub mod channel;
pub mod market;

pub use audit::MemoryAuditLog;
pub use channel::RecordingChannel;
pub use market::ScriptedMarketData;
