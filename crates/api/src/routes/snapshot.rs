//! Route definitions for snapshot downloads, mounted at `/snapshot`.

use axum::routing::get;
use axum::Router;

use crate::handlers::snapshot;
use crate::state::AppState;

/// ```text
/// GET /  -> download_snapshot (?filter=normal|remove_all_mods|dev_missions)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(snapshot::download_snapshot))
}
