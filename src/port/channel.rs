//! Notification channel port.

use async_trait::async_trait;

use crate::error::Result;

/// One outbound notification transport.
///
/// The dispatch coordinator treats the channel set as configuration:
/// an unconfigured provider is simply absent from the set, and no
/// channel may assume any other exists.
///
/// # Implementation Notes
///
/// - Implementations must be thread-safe (`Send + Sync`)
/// - Errors are collected per channel by the coordinator; they never
///   abort delivery to the other channels or the audit append
#[async_trait]
pub trait Channel: Send + Sync {
    /// Stable identifier used in dispatch outcomes and logs.
    fn name(&self) -> &'static str;

    /// Deliver one rendered message.
    async fn send(&self, recipient: &str, message: &str) -> Result<()>;
}
