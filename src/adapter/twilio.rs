//! WhatsApp delivery over the Twilio messaging API.

use async_trait::async_trait;

use crate::config::TwilioConfig;
use crate::error::{Error, Result};
use crate::port::Channel;

const API_BASE: &str = "https://api.twilio.com/2010-04-01";

/// Phone-messaging channel. Synchronous per send: the provider either
/// accepts the message or returns an error detail (invalid number,
/// rejected credential) that surfaces as a `Channel` failure.
pub struct TwilioChannel {
    http: reqwest::Client,
    config: TwilioConfig,
    api_base: String,
}

impl TwilioChannel {
    pub fn new(config: TwilioConfig) -> Self {
        Self::with_api_base(config, API_BASE)
    }

    pub fn with_api_base(config: TwilioConfig, api_base: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
            api_base: api_base.into(),
        }
    }

    fn failure(reason: impl ToString) -> Error {
        Error::Channel {
            channel: "twilio",
            reason: reason.to_string(),
        }
    }
}

#[async_trait]
impl Channel for TwilioChannel {
    fn name(&self) -> &'static str {
        "twilio"
    }

    async fn send(&self, recipient: &str, message: &str) -> Result<()> {
        let url = format!(
            "{}/Accounts/{}/Messages.json",
            self.api_base, self.config.account_sid
        );
        let response = self
            .http
            .post(&url)
            .basic_auth(&self.config.account_sid, Some(&self.config.auth_token))
            .form(&[
                ("From", self.config.from.as_str()),
                ("To", recipient),
                ("Body", message),
            ])
            .send()
            .await
            .map_err(|e| Self::failure(e))?;

        if !response.status().is_success() {
            let status = response.status();
            let detail = response.text().await.unwrap_or_default();
            return Err(Self::failure(format!("{status}: {detail}")));
        }
        Ok(())
    }
}
