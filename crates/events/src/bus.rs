//! In-process event bus backed by `tokio::sync::broadcast`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Event names published by the bot.
pub mod event_types {
    pub const MISSION_RECORDED: &str = "mission.recorded";
    pub const MISSION_REMOVED: &str = "mission.removed";
    pub const MILESTONE_REACHED: &str = "milestone.reached";
    pub const CENTURY_REACHED: &str = "century.reached";
    pub const ROTATION_PUBLISHED: &str = "rotation.published";
}

/// Something that happened in the bot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotEvent {
    /// Dot-separated name, see [`event_types`].
    pub event_type: String,
    /// Discord user the event concerns, if any.
    pub user_id: Option<String>,
    pub payload: serde_json::Value,
    pub timestamp: DateTime<Utc>,
}

impl BotEvent {
    pub fn new(event_type: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            user_id: None,
            payload: serde_json::json!({}),
            timestamp: Utc::now(),
        }
    }

    pub fn for_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = payload;
        self
    }
}

const DEFAULT_CAPACITY: usize = 256;

/// Fan-out bus shared as `Arc<EventBus>`.
///
/// Slow receivers observe `RecvError::Lagged` once the buffer fills.
pub struct EventBus {
    sender: broadcast::Sender<BotEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish to current subscribers. Returns how many received it; zero
    /// subscribers is not an error.
    pub fn publish(&self, event: BotEvent) -> usize {
        self.sender.send(event).unwrap_or(0)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<BotEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn every_subscriber_receives_events() {
        let bus = EventBus::default();
        let mut a = bus.subscribe();
        let mut b = bus.subscribe();

        let delivered = bus.publish(
            BotEvent::new(event_types::MILESTONE_REACHED)
                .for_user("42")
                .with_payload(serde_json::json!({ "count": 1000 })),
        );
        assert_eq!(delivered, 2);

        let got = a.recv().await.unwrap();
        assert_eq!(got.event_type, "milestone.reached");
        assert_eq!(got.user_id.as_deref(), Some("42"));
        assert_eq!(got.payload["count"], 1000);
        assert_eq!(b.recv().await.unwrap().event_type, "milestone.reached");
    }

    #[test]
    fn publish_without_subscribers_is_fine() {
        let bus = EventBus::new(4);
        assert_eq!(bus.publish(BotEvent::new(event_types::MISSION_RECORDED)), 0);
    }

    #[tokio::test]
    async fn lagging_receiver_reports_skipped() {
        let bus = EventBus::new(2);
        let mut rx = bus.subscribe();
        for _ in 0..5 {
            bus.publish(BotEvent::new(event_types::MISSION_RECORDED));
        }
        assert!(matches!(
            rx.recv().await,
            Err(broadcast::error::RecvError::Lagged(3))
        ));
    }
}
