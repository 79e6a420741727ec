//! Outbound adapters for the market data, channel and audit log ports.

mod csv_log;
#[cfg(feature = "telegram")]
mod telegram;
mod twilio;
mod yahoo;

pub use csv_log::CsvAuditLog;
#[cfg(feature = "telegram")]
pub use telegram::TelegramChannel;
pub use twilio::TwilioChannel;
pub use yahoo::YahooMarketData;
