//! Route definitions for chat-message tracking, mounted at `/tracking`.

use axum::routing::{delete, post};
use axum::Router;

use crate::handlers::tracking;
use crate::state::AppState;

/// ```text
/// POST   /messages             -> create_message
/// DELETE /messages/{id}        -> delete_message
/// POST   /messages/{id}/reply  -> set_reply
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/messages", post(tracking::create_message))
        .route("/messages/{id}", delete(tracking::delete_message))
        .route("/messages/{id}/reply", post(tracking::set_reply))
}
