use serde::Serialize;

/// Discord execute-webhook body
#[derive(Serialize)]
pub struct WebhookMessage {
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}
