pub mod admin;
pub mod alerts;
pub mod health;
pub mod snapshot;
pub mod stats;
pub mod tracking;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /alerts                                 alert report for ?reward=<key>
/// /alerts/categories                      category menu
///
/// /snapshot                               cached world info download
///                                         (?filter=normal|remove_all_mods|dev_missions)
///
/// /stats/{user_id}                        personal stats (?period=all|monthly)
/// /leaderboard                            top hosts (?period=all|monthly)
///
/// /tracking/messages                      record a chat message (POST)
/// /tracking/messages/{id}                 forget a deleted message (DELETE)
/// /tracking/messages/{id}/reply           remember the bot reply id (POST)
///
/// /admin/stats                            add/remove records (admin only)
/// /admin/transfer                         move records between users (admin only)
/// /admin/refresh                          live sync + optional resend (admin only)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/alerts", alerts::router())
        .nest("/snapshot", snapshot::router())
        .merge(stats::router())
        .nest("/tracking", tracking::router())
        .nest("/admin", admin::router())
}
