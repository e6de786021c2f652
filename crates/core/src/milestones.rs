//! Milestone roles for mission hosting and leeching.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    Host,
    Leech,
}

impl ActivityKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Host => "host",
            Self::Leech => "leech",
        }
    }

    pub fn past_tense(self) -> &'static str {
        match self {
            Self::Host => "hosted",
            Self::Leech => "leeched",
        }
    }
}

impl std::str::FromStr for ActivityKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "host" | "hosts" => Ok(Self::Host),
            "leech" | "leeches" => Ok(Self::Leech),
            other => Err(format!("unknown activity: {other}")),
        }
    }
}

/// Milestone tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Milestone {
    Host1k,
    Host3k,
    Leech3k,
}

/// Embed colour of milestone announcements.
pub const MILESTONE_COLOR: u32 = 0xFFA500;

/// Embed colour of century celebrations.
pub const CENTURY_COLOR: u32 = 0x3498DB;

impl Milestone {
    /// Milestone a user qualifies for at `count`, if any. Only the highest
    /// host tier applies.
    pub fn for_count(kind: ActivityKind, count: i64) -> Option<Self> {
        match kind {
            ActivityKind::Host if count >= 3000 => Some(Self::Host3k),
            ActivityKind::Host if count >= 1000 => Some(Self::Host1k),
            ActivityKind::Leech if count >= 3000 => Some(Self::Leech3k),
            _ => None,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Host1k => "🎊 1,000 Missions Hosted!",
            Self::Host3k => "🏆 3,000 Missions Hosted!",
            Self::Leech3k => "🚀 3,000 Missions Leeched!",
        }
    }

    pub fn description(self, username: &str) -> String {
        match self {
            Self::Host1k => format!("Congratulations {username}! You have hosted 1,000 missions."),
            Self::Host3k => format!("Congratulations {username}! You have hosted 3,000 missions."),
            Self::Leech3k => format!("Congratulations {username}! You have leeched 3,000 missions!"),
        }
    }
}

/// Role ids configured for each milestone.
#[derive(Debug, Clone, Default)]
pub struct MilestoneRoles {
    pub host_1k: Option<String>,
    pub host_3k: Option<String>,
    pub leech_3k: Option<String>,
}

impl MilestoneRoles {
    pub fn role_for(&self, milestone: Milestone) -> Option<&str> {
        match milestone {
            Milestone::Host1k => self.host_1k.as_deref(),
            Milestone::Host3k => self.host_3k.as_deref(),
            Milestone::Leech3k => self.leech_3k.as_deref(),
        }
    }
}

/// A role the caller should grant, with the announcement to post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoleGrant {
    pub milestone: Milestone,
    pub role_id: String,
    pub title: String,
    pub description: String,
}

/// Decide whether a member should receive a milestone role.
///
/// Returns `None` when no tier applies, the role is not configured, or the
/// member already holds it.
pub fn check_milestone(
    roles: &MilestoneRoles,
    kind: ActivityKind,
    count: i64,
    member_role_ids: &[String],
    username: &str,
) -> Option<RoleGrant> {
    let milestone = Milestone::for_count(kind, count)?;
    let role_id = roles.role_for(milestone).filter(|r| !r.is_empty())?;
    if member_role_ids.iter().any(|r| r == role_id) {
        return None;
    }
    Some(RoleGrant {
        milestone,
        role_id: role_id.to_string(),
        title: milestone.title().to_string(),
        description: milestone.description(username),
    })
}

/// Hosts celebrate every hundredth mission.
pub fn is_century(kind: ActivityKind, count: i64) -> bool {
    kind == ActivityKind::Host && count > 0 && count % 100 == 0
}
