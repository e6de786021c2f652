//! Handler for downloading the cached world-info snapshot.

use axum::extract::{Query, State};
use axum::http::header;
use axum::response::IntoResponse;
use chrono::Utc;
use serde::Deserialize;
use stormscout_core::export::{export_snapshot, ExportFilter};
use stormscout_worldinfo::SnapshotProvider;

use crate::error::AppResult;
use crate::state::AppState;

/// Query parameters for `GET /snapshot`.
#[derive(Debug, Deserialize)]
pub struct SnapshotParams {
    pub filter: Option<String>,
}

/// GET /api/v1/snapshot?filter=normal|remove_all_mods|dev_missions
///
/// Serve the cached snapshot as a JSON attachment named after the filter
/// and today's date.
pub async fn download_snapshot(
    State(state): State<AppState>,
    Query(params): Query<SnapshotParams>,
) -> AppResult<impl IntoResponse> {
    let filter: ExportFilter = params.filter.as_deref().unwrap_or_default().parse()?;

    let snapshot = state.snapshots.fetch_snapshot().await?;
    let body = export_snapshot(&snapshot.body, filter)?;
    let file_name = filter.file_name(Utc::now().date_naive());

    tracing::debug!(filter = filter.as_str(), bytes = body.len(), "Snapshot exported");

    Ok((
        [
            (header::CONTENT_TYPE, "application/json".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{file_name}\""),
            ),
        ],
        body,
    ))
}
