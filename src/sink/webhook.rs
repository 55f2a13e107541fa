//! Webhook announcement sink.

use super::AnnouncementSink;
use crate::error::{Result, SignalError};
use crate::types::Announcement;
use std::time::Duration;
use tracing::debug;

/// POSTs each announcement as JSON to a configured URL.
pub struct WebhookSink {
    client: reqwest::Client,
    url: String,
}

impl WebhookSink {
    pub fn new(url: String) -> Self {
        let client = reqwest::Client::builder()
            .user_agent("vigil/0.1")
            .timeout(Duration::from_secs(15))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self { client, url }
    }
}

impl AnnouncementSink for WebhookSink {
    async fn deliver(&self, announcement: &Announcement) -> Result<()> {
        let response = self
            .client
            .post(&self.url)
            .json(announcement)
            .send()
            .await
            .map_err(|e| SignalError::DeliveryFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(SignalError::DeliveryFailed(format!(
                "webhook returned {}",
                response.status()
            )));
        }

        debug!(
            "delivered {} {} for {}/{}",
            announcement.verdict.label(),
            announcement.id,
            announcement.instrument,
            announcement.timeframe.label()
        );
        Ok(())
    }
}
