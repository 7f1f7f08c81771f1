use thiserror::Error;

#[derive(Error, Debug)]
pub enum DiscordError {
    #[error("DiscordError::InvalidWebhookUrl: {0}")]
    InvalidWebhookUrl(String),
    #[error("DiscordError::Document: {0}")]
    Document(String),
    #[error("DiscordError::Webhook: {0}")]
    Webhook(String),
}

impl From<serde_json::Error> for DiscordError {
    fn from(e: serde_json::Error) -> Self { DiscordError::Document(e.to_string()) }
}
impl From<ureq::Error> for DiscordError {
    fn from(e: ureq::Error) -> Self { DiscordError::Webhook(e.to_string()) }
}
