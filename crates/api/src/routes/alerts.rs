//! Route definitions for alert queries, mounted at `/alerts`.

use axum::routing::get;
use axum::Router;

use crate::handlers::alerts;
use crate::state::AppState;

/// ```text
/// GET /            -> get_alerts (?reward=<key>)
/// GET /categories  -> list_categories
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(alerts::get_alerts))
        .route("/categories", get(alerts::list_categories))
}
