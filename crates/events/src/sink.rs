//! Announcement sinks.

use async_trait::async_trait;
use serde::Serialize;
use stormscout_core::render::AlertReport;
use tokio::sync::Mutex;

#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Webhook returned HTTP {0}")]
    HttpStatus(u16),
}

/// One chat embed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Announcement {
    /// Plain message text outside the embed (used for mentions).
    pub content: Option<String>,
    pub title: String,
    pub description: String,
    pub color: u32,
    pub footer: Option<String>,
}

impl Announcement {
    pub fn new(title: impl Into<String>, description: impl Into<String>, color: u32) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            color,
            ..Default::default()
        }
    }

    pub fn with_footer(mut self, footer: impl Into<String>) -> Self {
        self.footer = Some(footer.into());
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// One announcement per report page. Multi-page titles get a
    /// `(n/m)` suffix.
    pub fn from_report(report: &AlertReport) -> Vec<Self> {
        let pages = report.pages.len();
        report
            .pages
            .iter()
            .enumerate()
            .map(|(i, page)| {
                let title = if pages > 1 {
                    format!("{} ({}/{pages})", report.title, i + 1)
                } else {
                    report.title.clone()
                };
                Self::new(title, page.clone(), report.color).with_footer(report.footer.clone())
            })
            .collect()
    }
}

/// Destination for unsolicited messages.
#[async_trait]
pub trait AnnouncementSink: Send + Sync {
    async fn announce(&self, announcement: &Announcement) -> Result<(), DeliveryError>;

    /// Post every page of a report, stopping at the first failure.
    async fn publish_report(&self, report: &AlertReport) -> Result<(), DeliveryError> {
        for announcement in Announcement::from_report(report) {
            self.announce(&announcement).await?;
        }
        Ok(())
    }
}

/// Sink that keeps announcements in memory.
#[derive(Default)]
pub struct RecordingSink {
    sent: Mutex<Vec<Announcement>>,
    fail_with_status: Option<u16>,
}

impl RecordingSink {
    /// A sink whose every delivery fails with the given HTTP status.
    pub fn failing(status: u16) -> Self {
        Self {
            sent: Mutex::default(),
            fail_with_status: Some(status),
        }
    }

    pub async fn sent(&self) -> Vec<Announcement> {
        self.sent.lock().await.clone()
    }
}

#[async_trait]
impl AnnouncementSink for RecordingSink {
    async fn announce(&self, announcement: &Announcement) -> Result<(), DeliveryError> {
        if let Some(status) = self.fail_with_status {
            return Err(DeliveryError::HttpStatus(status));
        }
        self.sent.lock().await.push(announcement.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn report(pages: &[&str]) -> AlertReport {
        AlertReport {
            category: "currency_mtxswap".into(),
            title: "STW Alerts For: V-Bucks".into(),
            color: 0x00EAFF,
            pages: pages.iter().map(|p| p.to_string()).collect(),
            footer: "Total Items: 50".into(),
            total: 50,
            empty: false,
        }
    }

    #[test]
    fn single_page_keeps_plain_title() {
        let out = Announcement::from_report(&report(&["a"]));
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].title, "STW Alerts For: V-Bucks");
        assert_eq!(out[0].footer.as_deref(), Some("Total Items: 50"));
    }

    #[test]
    fn pages_are_numbered() {
        let out = Announcement::from_report(&report(&["a", "b"]));
        assert_eq!(out[1].title, "STW Alerts For: V-Bucks (2/2)");
        assert_eq!(out[1].description, "b");
    }

    #[tokio::test]
    async fn recording_sink_collects_pages() {
        let sink = RecordingSink::default();
        sink.publish_report(&report(&["a", "b"])).await.unwrap();
        assert_eq!(sink.sent().await.len(), 2);

        let failing = RecordingSink::failing(502);
        assert_matches!(
            failing.publish_report(&report(&["a"])).await,
            Err(DeliveryError::HttpStatus(502))
        );
    }
}
