//! Event-to-announcement routing.
//!
//! [`NotificationRouter`] subscribes to the bot event bus and posts
//! milestone and century celebrations to the milestone sink.

use std::sync::Arc;

use stormscout_core::milestones::{CENTURY_COLOR, MILESTONE_COLOR};
use stormscout_events::bus::event_types;
use stormscout_events::{Announcement, AnnouncementSink, BotEvent, DeliveryError};
use tokio::sync::broadcast;

pub const CENTURY_TITLE: &str = "🌟 Amazing Contribution!";

/// Announcement for an event, or `None` for events nobody is told about.
pub fn announcement_for(event: &BotEvent) -> Option<Announcement> {
    let user_id = event.user_id.as_deref()?;
    let mention = format!("<@{user_id}>");

    match event.event_type.as_str() {
        event_types::MILESTONE_REACHED => {
            let title = event.payload["title"].as_str()?;
            let description = event.payload["description"].as_str().unwrap_or_default();
            Some(Announcement::new(title, description, MILESTONE_COLOR).with_content(mention))
        }
        event_types::CENTURY_REACHED => {
            let count = event.payload["count"].as_i64()?;
            Some(
                Announcement::new(
                    CENTURY_TITLE,
                    format!(
                        "Hey {mention}, you have just hit **{count}** missions hosted! \
                         Thank you for your amazing support to the community!"
                    ),
                    CENTURY_COLOR,
                )
                .with_content(mention),
            )
        }
        _ => None,
    }
}

/// Posts celebration announcements for bus events.
pub struct NotificationRouter {
    sink: Arc<dyn AnnouncementSink>,
}

impl NotificationRouter {
    pub fn new(sink: Arc<dyn AnnouncementSink>) -> Self {
        Self { sink }
    }

    /// Run the routing loop until the [`EventBus`](stormscout_events::EventBus)
    /// is dropped.
    pub async fn run(self, mut receiver: broadcast::Receiver<BotEvent>) {
        loop {
            match receiver.recv().await {
                Ok(event) => {
                    if let Err(e) = self.route_event(&event).await {
                        tracing::error!(
                            error = %e,
                            event_type = %event.event_type,
                            "Failed to deliver announcement"
                        );
                    }
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "Notification router lagged");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Event bus closed, notification router shutting down");
                    break;
                }
            }
        }
    }

    async fn route_event(&self, event: &BotEvent) -> Result<(), DeliveryError> {
        let Some(announcement) = announcement_for(event) else {
            return Ok(());
        };
        self.sink.announce(&announcement).await?;
        tracing::info!(
            event_type = %event.event_type,
            user_id = ?event.user_id,
            "Celebration posted"
        );
        Ok(())
    }
}
