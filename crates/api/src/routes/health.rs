use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;
use stormscout_core::types::Timestamp;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
    /// Fetch time of the cached snapshot, if one exists.
    pub snapshot_fetched_at: Option<Timestamp>,
    pub live_sync: bool,
    pub auto_alerts: bool,
}

/// GET /health -- returns service, database and snapshot health.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = stormscout_db::health_check(&state.pool).await.is_ok();
    let snapshot_fetched_at = state
        .snapshots
        .fetch_snapshot()
        .await
        .ok()
        .map(|s| s.fetched_at);

    let status = if db_healthy { "ok" } else { "degraded" };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        snapshot_fetched_at,
        live_sync: state.live_sync.is_some(),
        auto_alerts: state.announcer.is_some(),
    })
}

/// Mount health check routes (root-level, not under `/api/v1`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
