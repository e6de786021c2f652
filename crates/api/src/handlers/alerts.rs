//! Handlers for alert queries.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use stormscout_core::category::categories;

use crate::engine::alerts::{query_alerts, require_category};
use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for `GET /alerts`.
#[derive(Debug, Deserialize)]
pub struct AlertQueryParams {
    pub reward: Option<String>,
}

/// One entry of the category menu.
#[derive(Debug, Serialize)]
pub struct CategoryInfo {
    pub key: &'static str,
    pub name: &'static str,
    pub color: u32,
}

/// GET /api/v1/alerts/categories
pub async fn list_categories() -> AppResult<impl IntoResponse> {
    let data: Vec<CategoryInfo> = categories()
        .iter()
        .map(|c| CategoryInfo {
            key: c.key,
            name: c.name,
            color: c.color,
        })
        .collect();
    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/alerts?reward=<key>
///
/// Scan the cached snapshot for one category and return the paginated
/// report.
pub async fn get_alerts(
    State(state): State<AppState>,
    Query(params): Query<AlertQueryParams>,
) -> AppResult<impl IntoResponse> {
    let key = params
        .reward
        .filter(|r| !r.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest("Missing reward parameter".into()))?;
    let category = require_category(key.trim())?;

    let report = query_alerts(
        state.snapshots.as_ref(),
        category,
        &state.config.render_options(),
        state.config.stale_after(),
    )
    .await?;

    Ok(Json(DataResponse { data: report }))
}
