pub mod errors;

use std::time::Duration;
use ureq::Agent;
use crate::manager_discord::errors::DiscordError;
use crate::models::discord::WebhookMessage;
use crate::worker::NotificationSink;

pub struct Discord {
    agent: Agent,
    webhook_url: String,
    username: Option<String>,
}

impl Discord {
    /// Returns a new instance of the Discord struct
    ///
    /// # Arguments
    ///
    /// * 'webhook_url' - the Discord webhook to post to
    /// * 'username' - optional author name overriding the webhook default
    pub fn new(webhook_url: String, username: Option<String>) -> Result<Self, DiscordError> {
        if !webhook_url.starts_with("https://") && !webhook_url.starts_with("http://") {
            return Err(DiscordError::InvalidWebhookUrl(webhook_url));
        }

        let config = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(10)))
            .build();

        let agent = config.into();

        Ok(Self { agent, webhook_url, username })
    }

    /// Posts a message to the webhook
    ///
    /// # Arguments
    ///
    /// * 'content' - the message text
    pub fn send_message(&self, content: &str) -> Result<(), DiscordError> {
        let json = webhook_body(content, self.username.as_deref())?;

        let _ = self.agent
            .post(&self.webhook_url)
            .content_type("application/json")
            .send(json)?;

        Ok(())
    }
}

impl NotificationSink for Discord {
    fn send(&self, message: &str) -> Result<(), DiscordError> {
        self.send_message(message)
    }
}

/// Serializes the webhook request body
fn webhook_body(content: &str, username: Option<&str>) -> Result<String, DiscordError> {
    let req = WebhookMessage {
        content: content.to_string(),
        username: username.map(|u| u.to_string()),
    };

    Ok(serde_json::to_string(&req)?)
}
