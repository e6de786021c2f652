//! Route definitions for admin commands, mounted at `/admin`.

use axum::routing::post;
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// ```text
/// POST /stats     -> manage_stats
/// POST /transfer  -> transfer_stats
/// POST /refresh   -> refresh
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/stats", post(admin::manage_stats))
        .route("/transfer", post(admin::transfer_stats))
        .route("/refresh", post(admin::refresh))
}
