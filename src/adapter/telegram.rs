//! Chat delivery over the Telegram bot API.
//!
//! Requires the `telegram` feature. The channel is only constructed when
//! a bot token and chat id are configured; "disabled" is the channel's
//! absence from the dispatch set, not a runtime branch inside `send`.

use async_trait::async_trait;
use teloxide::prelude::*;

use crate::error::{Error, Result};
use crate::port::Channel;

pub struct TelegramChannel {
    bot: Bot,
    chat_id: ChatId,
}

impl TelegramChannel {
    pub fn new(bot_token: impl Into<String>, chat_id: i64) -> Self {
        Self {
            bot: Bot::new(bot_token.into()),
            chat_id: ChatId(chat_id),
        }
    }
}

#[async_trait]
impl Channel for TelegramChannel {
    fn name(&self) -> &'static str {
        "telegram"
    }

    /// The destination is fixed by the configured chat id; the per-fire
    /// recipient address only applies to the phone channel.
    async fn send(&self, _recipient: &str, message: &str) -> Result<()> {
        self.bot
            .send_message(self.chat_id, message)
            .await
            .map_err(|e| Error::Channel {
                channel: "telegram",
                reason: e.to_string(),
            })?;
        Ok(())
    }
}
