//! Classification of tracking-channel chat messages into host and leech
//! activity.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::milestones::ActivityKind;
use crate::types::SnowflakeId;

static LEECH_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(omw|oms|om my way)\s*(x2|2x)?$").expect("valid regex")
});

const LEECH_PHRASES: &[&str] = &["omw", "oms", "om my way"];

/// A chat message delivered by the gateway.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: SnowflakeId,
    pub author_id: SnowflakeId,
    #[serde(default)]
    pub author_is_bot: bool,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub mentioned_role_ids: Vec<SnowflakeId>,
    /// Set when the message replies to another message.
    #[serde(default)]
    pub is_reply: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TrackedActivity {
    Host,
    Leech { iterations: u32 },
}

impl TrackedActivity {
    pub fn kind(self) -> ActivityKind {
        match self {
            Self::Host => ActivityKind::Host,
            Self::Leech { .. } => ActivityKind::Leech,
        }
    }

    /// Number of records the message produces.
    pub fn iterations(self) -> u32 {
        match self {
            Self::Host => 1,
            Self::Leech { iterations } => iterations,
        }
    }
}

/// Classify a message. Host mentions take precedence over leech phrases.
pub fn classify(message: &ChatMessage, tracked_role_ids: &[SnowflakeId]) -> Option<TrackedActivity> {
    if message.author_is_bot {
        return None;
    }

    if message
        .mentioned_role_ids
        .iter()
        .any(|r| tracked_role_ids.contains(r))
    {
        return Some(TrackedActivity::Host);
    }

    let content = message.content.trim().to_lowercase();
    let is_leech = LEECH_PATTERN.is_match(&content)
        || (message.is_reply && LEECH_PHRASES.iter().any(|p| content.contains(p)));
    if !is_leech {
        return None;
    }

    let iterations = if content.contains("x2") || content.contains("2x") {
        2
    } else {
        1
    };
    Some(TrackedActivity::Leech { iterations })
}
