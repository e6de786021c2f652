//! Host/leech tracking from chat messages.
//!
//! The dispatcher forwards every tracking-channel message. Recognised
//! messages are counted, milestone and century events go on the bus, and
//! the reply text is handed back for the dispatcher to post. Deleting a
//! message removes its records and re-evaluates milestones.

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use stormscout_core::milestones::{check_milestone, is_century, ActivityKind, RoleGrant};
use stormscout_core::tracking::{classify, ChatMessage, TrackedActivity};
use stormscout_core::types::SnowflakeId;
use stormscout_db::repositories::MissionHistoryRepo;
use stormscout_events::bus::event_types;
use stormscout_events::{BotEvent, EventBus};

use crate::config::BotConfig;

/// A tracking-channel message plus the author's guild context.
#[derive(Debug, Clone, Deserialize)]
pub struct TrackMessageRequest {
    pub message: ChatMessage,
    /// Roles the author currently holds.
    #[serde(default)]
    pub member_role_ids: Vec<SnowflakeId>,
    #[serde(default)]
    pub username: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct TrackingOutcome {
    /// `None` when the message is not a host or leech post.
    pub activity: Option<TrackedActivity>,
    /// Author's count for the activity after recording.
    pub count: i64,
    /// Text the dispatcher should reply with.
    pub reply: Option<String>,
    pub role_grant: Option<RoleGrant>,
    pub century: bool,
    /// The message had been recorded before and was not counted again.
    pub duplicate: bool,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct DeletionOutcome {
    pub removed: u64,
    pub user_id: Option<SnowflakeId>,
    pub activity: Option<ActivityKind>,
    /// Bot reply the dispatcher should delete too.
    pub bot_reply_id: Option<SnowflakeId>,
    /// Author's count for the activity after removal.
    pub count: Option<i64>,
    pub role_grant: Option<RoleGrant>,
}

pub fn reply_text(kind: ActivityKind, count: i64) -> String {
    format!("-# You have now {} **{count}** missions.", kind.past_tense())
}

/// Classify and record one message.
pub async fn track_message(
    pool: &PgPool,
    config: &BotConfig,
    event_bus: &EventBus,
    request: &TrackMessageRequest,
) -> Result<TrackingOutcome, sqlx::Error> {
    let message = &request.message;
    let Some(activity) = classify(message, &config.tracked_role_ids) else {
        return Ok(TrackingOutcome::default());
    };
    let kind = activity.kind();

    let recorded = MissionHistoryRepo::record_message(
        pool,
        &message.author_id,
        kind,
        &message.id,
        i64::from(activity.iterations()),
    )
    .await?;

    let Some(count) = recorded else {
        let count = MissionHistoryRepo::count(pool, &message.author_id, kind).await?;
        tracing::debug!(message_id = %message.id, "Message already tracked");
        return Ok(TrackingOutcome {
            activity: Some(activity),
            count,
            duplicate: true,
            ..Default::default()
        });
    };

    tracing::info!(
        user_id = %message.author_id,
        activity = kind.as_str(),
        iterations = activity.iterations(),
        count,
        "Mission recorded"
    );

    event_bus.publish(
        BotEvent::new(event_types::MISSION_RECORDED)
            .for_user(message.author_id.clone())
            .with_payload(serde_json::json!({
                "activity": kind,
                "count": count,
                "message_id": message.id,
            })),
    );

    let role_grant = check_milestone(
        &config.milestone_roles,
        kind,
        count,
        &request.member_role_ids,
        &request.username,
    );
    let century = role_grant.is_none() && is_century(kind, count);

    if let Some(grant) = &role_grant {
        event_bus.publish(
            BotEvent::new(event_types::MILESTONE_REACHED)
                .for_user(message.author_id.clone())
                .with_payload(serde_json::json!({
                    "title": grant.title,
                    "description": grant.description,
                    "role_id": grant.role_id,
                    "count": count,
                })),
        );
    } else if century {
        event_bus.publish(
            BotEvent::new(event_types::CENTURY_REACHED)
                .for_user(message.author_id.clone())
                .with_payload(serde_json::json!({ "count": count })),
        );
    }

    Ok(TrackingOutcome {
        activity: Some(activity),
        count,
        reply: Some(reply_text(kind, count)),
        role_grant,
        century,
        duplicate: false,
    })
}

/// Remove every record a deleted message produced.
pub async fn forget_message(
    pool: &PgPool,
    config: &BotConfig,
    event_bus: &EventBus,
    message_id: &str,
    member_role_ids: &[SnowflakeId],
    username: &str,
) -> Result<DeletionOutcome, sqlx::Error> {
    let Some(record) = MissionHistoryRepo::find_by_message(pool, message_id).await? else {
        return Ok(DeletionOutcome::default());
    };

    let bot_reply_id = MissionHistoryRepo::bot_reply_for(pool, message_id).await?;
    let removed = MissionHistoryRepo::delete_by_message(pool, message_id).await?;

    let Ok(kind) = record.activity.parse::<ActivityKind>() else {
        tracing::warn!(activity = %record.activity, "Unknown activity on deleted record");
        return Ok(DeletionOutcome {
            removed,
            user_id: Some(record.user_id),
            bot_reply_id,
            ..Default::default()
        });
    };

    let stats = MissionHistoryRepo::user_stats(pool, &record.user_id, None).await?;
    let count = match kind {
        ActivityKind::Host => stats.hosts,
        ActivityKind::Leech => stats.leeches,
    };

    tracing::info!(
        message_id,
        user_id = %record.user_id,
        activity = kind.as_str(),
        removed,
        count,
        "Tracked message deleted"
    );

    event_bus.publish(
        BotEvent::new(event_types::MISSION_REMOVED)
            .for_user(record.user_id.clone())
            .with_payload(serde_json::json!({
                "activity": kind,
                "removed": removed,
                "count": count,
            })),
    );

    let role_grant = check_milestone(
        &config.milestone_roles,
        kind,
        count,
        member_role_ids,
        username,
    );

    Ok(DeletionOutcome {
        removed,
        user_id: Some(record.user_id),
        activity: Some(kind),
        bot_reply_id,
        count: Some(count),
        role_grant,
    })
}
