//! Slack delivery: the attachment-style message shape and a blocking
//! JSON POST to an incoming webhook.

use std::time::Duration;

use serde::{Deserialize, Serialize};

const TIMEOUT: Duration = Duration::from_secs(5);

/// An attachment-style Slack message. Field names match the legacy
/// incoming-webhook payload keys.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SlackMessage {
    pub fallback: String,
    pub pretext: String,
    pub color: String,
    pub fields: Vec<SlackField>,
}

/// One titled block within a message.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SlackField {
    pub title: String,
    pub value: String,
    pub short: bool,
}

/// POST a message to a Slack incoming webhook.
///
/// Fire-and-forget from the composer's point of view: callers log
/// failures and never retry, and already-recorded data is never rolled
/// back over a delivery error.
pub fn post(webhook_url: &str, message: &SlackMessage) -> anyhow::Result<()> {
    let body = serde_json::to_string(message)?;
    let agent = ureq::Agent::config_builder()
        .timeout_global(Some(TIMEOUT))
        .build()
        .new_agent();
    agent
        .post(webhook_url)
        .header("Content-Type", "application/json")
        .send(body)?;
    Ok(())
}
