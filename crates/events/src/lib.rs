//! Bot events and outbound announcements.
//!
//! - [`EventBus`]: in-process broadcast of [`BotEvent`]s (missions
//!   recorded, milestones reached, rotations published).
//! - [`AnnouncementSink`]: where unsolicited messages go; the production
//!   sink is a Discord webhook ([`WebhookSink`]).

pub mod bus;
pub mod delivery;
pub mod sink;

pub use bus::{BotEvent, EventBus};
pub use delivery::webhook::WebhookSink;
pub use sink::{Announcement, AnnouncementSink, DeliveryError, RecordingSink};
