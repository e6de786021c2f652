//! Handlers for tracking-channel messages.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use stormscout_core::error::CoreError;
use stormscout_db::repositories::MissionHistoryRepo;

use crate::engine::tracking::{forget_message, track_message, TrackMessageRequest};
use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for `DELETE /tracking/messages/{id}`.
#[derive(Debug, Default, Deserialize)]
pub struct DeleteMessageParams {
    /// Comma-separated roles the author currently holds.
    pub member_role_ids: Option<String>,
    pub username: Option<String>,
}

/// Request body for `POST /tracking/messages/{id}/reply`.
#[derive(Debug, Deserialize)]
pub struct BotReplyRequest {
    pub bot_reply_id: String,
}

/// POST /api/v1/tracking/messages
///
/// Classify a chat message and record it when it is a host or leech post.
pub async fn create_message(
    State(state): State<AppState>,
    Json(input): Json<TrackMessageRequest>,
) -> AppResult<impl IntoResponse> {
    if input.message.id.trim().is_empty() || input.message.author_id.trim().is_empty() {
        return Err(AppError::BadRequest(
            "message.id and message.author_id are required".into(),
        ));
    }

    let outcome = track_message(&state.pool, &state.config, &state.event_bus, &input).await?;
    Ok(Json(DataResponse { data: outcome }))
}

/// DELETE /api/v1/tracking/messages/{id}
pub async fn delete_message(
    State(state): State<AppState>,
    Path(message_id): Path<String>,
    Query(params): Query<DeleteMessageParams>,
) -> AppResult<impl IntoResponse> {
    let member_role_ids: Vec<String> = params
        .member_role_ids
        .as_deref()
        .unwrap_or_default()
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    let outcome = forget_message(
        &state.pool,
        &state.config,
        &state.event_bus,
        &message_id,
        &member_role_ids,
        params.username.as_deref().unwrap_or_default(),
    )
    .await?;

    Ok(Json(DataResponse { data: outcome }))
}

/// POST /api/v1/tracking/messages/{id}/reply
///
/// Remember the bot's reply so it can be removed with the message.
pub async fn set_reply(
    State(state): State<AppState>,
    Path(message_id): Path<String>,
    Json(input): Json<BotReplyRequest>,
) -> AppResult<impl IntoResponse> {
    let updated =
        MissionHistoryRepo::set_bot_reply(&state.pool, &message_id, &input.bot_reply_id).await?;
    if updated == 0 {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "TrackedMessage",
            id: message_id,
        }));
    }

    Ok(Json(DataResponse {
        data: serde_json::json!({ "message_id": message_id, "updated": updated }),
    }))
}
