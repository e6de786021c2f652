//! Discord webhook delivery with retry.
//!
//! Each [`Announcement`] becomes one webhook execution carrying a single
//! embed. Failed attempts are retried after 1 s, 2 s and 4 s.

use std::time::Duration;

use async_trait::async_trait;

use crate::sink::{Announcement, AnnouncementSink, DeliveryError};

const RETRY_DELAYS_SECS: [u64; 3] = [1, 2, 4];

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Posts announcements to one Discord webhook URL.
pub struct WebhookSink {
    client: reqwest::Client,
    url: String,
    retry_delays: Vec<Duration>,
}

impl WebhookSink {
    pub fn new(url: impl Into<String>) -> Result<Self, DeliveryError> {
        let client = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            url: url.into(),
            retry_delays: RETRY_DELAYS_SECS.iter().map(|s| Duration::from_secs(*s)).collect(),
        })
    }

    /// Replace the backoff schedule.
    pub fn with_retry_delays(mut self, delays: Vec<Duration>) -> Self {
        self.retry_delays = delays;
        self
    }

    /// Discord `execute webhook` body for an announcement.
    pub fn payload(announcement: &Announcement) -> serde_json::Value {
        let mut embed = serde_json::json!({
            "title": announcement.title,
            "description": announcement.description,
            "color": announcement.color,
            "timestamp": chrono::Utc::now().to_rfc3339(),
        });
        if let Some(footer) = &announcement.footer {
            embed["footer"] = serde_json::json!({ "text": footer });
        }

        let mut body = serde_json::json!({ "embeds": [embed] });
        if let Some(content) = &announcement.content {
            body["content"] = serde_json::json!(content);
        }
        body
    }

    async fn try_send(&self, payload: &serde_json::Value) -> Result<(), DeliveryError> {
        let response = self.client.post(&self.url).json(payload).send().await?;
        if !response.status().is_success() {
            return Err(DeliveryError::HttpStatus(response.status().as_u16()));
        }
        Ok(())
    }
}

#[async_trait]
impl AnnouncementSink for WebhookSink {
    async fn announce(&self, announcement: &Announcement) -> Result<(), DeliveryError> {
        let payload = Self::payload(announcement);

        for (attempt, delay) in self.retry_delays.iter().enumerate() {
            match self.try_send(&payload).await {
                Ok(()) => return Ok(()),
                Err(e) => {
                    tracing::warn!(
                        attempt = attempt + 1,
                        title = %announcement.title,
                        error = %e,
                        "Webhook delivery attempt failed, retrying"
                    );
                    tokio::time::sleep(*delay).await;
                }
            }
        }

        self.try_send(&payload).await.inspect_err(|e| {
            tracing::error!(
                title = %announcement.title,
                error = %e,
                "Webhook delivery failed after all retries"
            );
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn payload_shape() {
        let a = Announcement::new("Daily V-Bucks Found!", "**STONEWOOD**\n...", 0x00EAFF)
            .with_footer("Total Items: 50")
            .with_content("<@&123>");
        let body = WebhookSink::payload(&a);
        assert_eq!(body["content"], "<@&123>");
        assert_eq!(body["embeds"][0]["title"], "Daily V-Bucks Found!");
        assert_eq!(body["embeds"][0]["color"], 0x00EAFF);
        assert_eq!(body["embeds"][0]["footer"]["text"], "Total Items: 50");
    }

    #[test]
    fn payload_omits_missing_parts() {
        let body = WebhookSink::payload(&Announcement::new("t", "d", 1));
        assert!(body.get("content").is_none());
        assert!(body["embeds"][0].get("footer").is_none());
    }

    #[tokio::test]
    async fn unreachable_url_fails_after_retries() {
        let sink = WebhookSink::new("http://127.0.0.1:9/webhook")
            .unwrap()
            .with_retry_delays(vec![Duration::from_millis(1)]);
        let result = sink.announce(&Announcement::new("t", "d", 1)).await;
        assert_matches!(result, Err(DeliveryError::Request(_)));
    }

    #[test]
    fn error_display() {
        assert_eq!(DeliveryError::HttpStatus(429).to_string(), "Webhook returned HTTP 429");
    }
}
