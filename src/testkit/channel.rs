//! Recording channels for dispatch tests.

use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::error::{Error, Result};
use crate::port::Channel;

/// Channel that records every delivery. Can be configured to fail each
/// send, or to stall long enough to trip the coordinator's timeout.
pub struct RecordingChannel {
    name: &'static str,
    fail: bool,
    delay: Option<Duration>,
    sent: Mutex<Vec<(String, String)>>,
}

impl RecordingChannel {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            fail: false,
            delay: None,
            sent: Mutex::new(Vec::new()),
        }
    }

    /// A channel whose every send fails.
    pub fn failing(name: &'static str) -> Self {
        Self {
            fail: true,
            ..Self::new(name)
        }
    }

    /// A channel that sleeps before accepting the message.
    pub fn stalling(name: &'static str, delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::new(name)
        }
    }

    /// Every `(recipient, message)` pair accepted so far.
    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().clone()
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().len()
    }
}

#[async_trait]
impl Channel for RecordingChannel {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn send(&self, recipient: &str, message: &str) -> Result<()> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail {
            return Err(Error::Channel {
                channel: self.name,
                reason: "scripted failure".into(),
            });
        }
        self.sent
            .lock()
            .push((recipient.to_owned(), message.to_owned()));
        Ok(())
    }
}
