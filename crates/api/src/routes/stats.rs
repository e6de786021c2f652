//! Route definitions for stats and the leaderboard, merged at the API root.

use axum::routing::get;
use axum::Router;

use crate::handlers::stats;
use crate::state::AppState;

/// ```text
/// GET /stats/{user_id}  -> get_stats
/// GET /leaderboard      -> get_leaderboard
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/stats/{user_id}", get(stats::get_stats))
        .route("/leaderboard", get(stats::get_leaderboard))
}
