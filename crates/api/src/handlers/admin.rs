//! Handlers for the `/admin` commands.
//!
//! All handlers require an admin actor via [`AdminUser`].

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use stormscout_core::error::CoreError;
use stormscout_core::milestones::{check_milestone, ActivityKind, RoleGrant};
use stormscout_core::types::{SnowflakeId, Timestamp};
use stormscout_db::repositories::MissionHistoryRepo;
use validator::Validate;

use crate::engine::announce::CycleOutcome;
use crate::error::{AppError, AppResult};
use crate::middleware::admin::AdminUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatsAction {
    Add,
    Remove,
}

/// Request body for `POST /admin/stats`.
#[derive(Debug, Deserialize, Validate)]
pub struct ManageStatsRequest {
    #[validate(length(min = 1, message = "user_id is required"))]
    pub user_id: SnowflakeId,
    pub activity: ActivityKind,
    pub action: StatsAction,
    #[validate(range(min = 1, max = 10000, message = "amount must be between 1 and 10000"))]
    pub amount: i64,
    /// Roles the target currently holds, for the milestone check.
    #[serde(default)]
    pub member_role_ids: Vec<SnowflakeId>,
    #[serde(default)]
    pub username: String,
}

/// Request body for `POST /admin/transfer`.
#[derive(Debug, Deserialize, Validate)]
pub struct TransferRequest {
    #[validate(length(min = 1, message = "from_user_id is required"))]
    pub from_user_id: SnowflakeId,
    #[validate(length(min = 1, message = "to_user_id is required"))]
    pub to_user_id: SnowflakeId,
    #[serde(default)]
    pub member_role_ids: Vec<SnowflakeId>,
    #[serde(default)]
    pub username: String,
}

/// Request body for `POST /admin/refresh`.
#[derive(Debug, Default, Deserialize)]
pub struct RefreshRequest {
    #[serde(default)]
    pub resend_feeds: bool,
}

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct ManageStatsResponse {
    pub user_id: SnowflakeId,
    pub activity: ActivityKind,
    pub action: StatsAction,
    /// Records actually added or removed.
    pub changed: i64,
    pub count: i64,
    pub role_grant: Option<RoleGrant>,
}

#[derive(Debug, Serialize)]
pub struct TransferResponse {
    pub from_user_id: SnowflakeId,
    pub to_user_id: SnowflakeId,
    pub moved: u64,
    pub role_grants: Vec<RoleGrant>,
}

#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub synced: bool,
    pub fetched_at: Option<Timestamp>,
    pub resend: Option<CycleOutcome>,
    pub notes: Vec<String>,
}

fn validate(input: &impl Validate) -> AppResult<()> {
    input
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/admin/stats
///
/// Add or remove a user's host/leech records, then re-run the milestone
/// check on the new count.
pub async fn manage_stats(
    admin: AdminUser,
    State(state): State<AppState>,
    Json(input): Json<ManageStatsRequest>,
) -> AppResult<impl IntoResponse> {
    validate(&input)?;

    let (changed, count) = match input.action {
        StatsAction::Add => {
            let count = MissionHistoryRepo::record_many(
                &state.pool,
                &input.user_id,
                input.activity,
                input.amount,
            )
            .await?;
            (input.amount, count)
        }
        StatsAction::Remove => {
            let removed = MissionHistoryRepo::remove_latest(
                &state.pool,
                &input.user_id,
                input.activity,
                input.amount,
            )
            .await?;
            if removed == 0 {
                return Err(AppError::Core(CoreError::NotFound {
                    entity: "MissionRecord",
                    id: format!("{}:{}", input.user_id, input.activity.as_str()),
                }));
            }
            let count =
                MissionHistoryRepo::count(&state.pool, &input.user_id, input.activity).await?;
            (removed as i64, count)
        }
    };

    tracing::info!(
        admin_id = %admin.user_id,
        user_id = %input.user_id,
        activity = input.activity.as_str(),
        action = ?input.action,
        changed,
        count,
        "Stats adjusted"
    );

    let role_grant = check_milestone(
        &state.config.milestone_roles,
        input.activity,
        count,
        &input.member_role_ids,
        &input.username,
    );

    Ok(Json(DataResponse {
        data: ManageStatsResponse {
            user_id: input.user_id,
            activity: input.activity,
            action: input.action,
            changed,
            count,
            role_grant,
        },
    }))
}

/// POST /api/v1/admin/transfer
///
/// Move every record from one user to another.
pub async fn transfer_stats(
    admin: AdminUser,
    State(state): State<AppState>,
    Json(input): Json<TransferRequest>,
) -> AppResult<impl IntoResponse> {
    validate(&input)?;
    if input.from_user_id == input.to_user_id {
        return Err(AppError::Core(CoreError::Validation(
            "You cannot transfer stats to the same user.".into(),
        )));
    }

    let moved =
        MissionHistoryRepo::transfer(&state.pool, &input.from_user_id, &input.to_user_id).await?;
    if moved == 0 {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "MissionRecord",
            id: input.from_user_id,
        }));
    }

    tracing::info!(
        admin_id = %admin.user_id,
        from = %input.from_user_id,
        to = %input.to_user_id,
        moved,
        "Stats transferred"
    );

    let stats = MissionHistoryRepo::user_stats(&state.pool, &input.to_user_id, None).await?;
    let role_grants = [
        (ActivityKind::Host, stats.hosts),
        (ActivityKind::Leech, stats.leeches),
    ]
    .into_iter()
    .filter_map(|(kind, count)| {
        check_milestone(
            &state.config.milestone_roles,
            kind,
            count,
            &input.member_role_ids,
            &input.username,
        )
    })
    .collect();

    Ok(Json(DataResponse {
        data: TransferResponse {
            from_user_id: input.from_user_id,
            to_user_id: input.to_user_id,
            moved,
            role_grants,
        },
    }))
}

/// POST /api/v1/admin/refresh
///
/// Sync the world-info snapshot now and optionally re-post the rotation
/// reports regardless of the stored fingerprint.
pub async fn refresh(
    admin: AdminUser,
    State(state): State<AppState>,
    Json(input): Json<RefreshRequest>,
) -> AppResult<impl IntoResponse> {
    let mut notes = Vec::new();

    let Some(live) = &state.live_sync else {
        return Err(AppError::BadRequest(
            "Live sync is not configured (EPIC_CLIENT_BASIC is unset)".into(),
        ));
    };
    let snapshot = live.fetch_snapshot().await?;
    tracing::info!(admin_id = %admin.user_id, "Manual world info sync complete");

    let resend = if input.resend_feeds {
        match &state.announcer {
            Some(announcer) => Some(announcer.run_cycle(true).await?),
            None => {
                notes.push("Feeds not sent: ALERT_WEBHOOK_URL is not configured.".to_string());
                None
            }
        }
    } else {
        None
    };

    Ok(Json(DataResponse {
        data: RefreshResponse {
            synced: true,
            fetched_at: Some(snapshot.fetched_at),
            resend,
            notes,
        },
    }))
}
