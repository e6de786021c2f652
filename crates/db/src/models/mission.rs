//! Mission history rows.

use serde::Serialize;
use sqlx::FromRow;
use stormscout_core::types::{SnowflakeId, Timestamp};

/// A row from the `mission_history` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MissionRecord {
    pub id: i64,
    pub user_id: SnowflakeId,
    pub activity: String,
    pub message_id: Option<SnowflakeId>,
    pub bot_reply_id: Option<SnowflakeId>,
    pub recorded_at: Timestamp,
}

/// Per-user count row used by the leaderboard query.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserCount {
    pub user_id: SnowflakeId,
    pub count: i64,
}
