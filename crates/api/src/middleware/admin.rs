//! Admin identity extractor.
//!
//! The dispatcher forwards the invoking chat user's id in the
//! `x-actor-id` header. Admin routes accept only ids listed in
//! `ADMIN_IDS`.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use stormscout_core::error::CoreError;
use stormscout_core::types::SnowflakeId;

use crate::error::AppError;
use crate::state::AppState;

pub const ACTOR_HEADER: &str = "x-actor-id";

/// An invoking user whose id is in the admin list.
///
/// ```ignore
/// async fn my_handler(admin: AdminUser) -> AppResult<Json<()>> {
///     tracing::info!(admin_id = %admin.user_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AdminUser {
    pub user_id: SnowflakeId,
}

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let actor = parts
            .headers
            .get(ACTOR_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| {
                AppError::Core(CoreError::Forbidden(format!(
                    "Missing {ACTOR_HEADER} header"
                )))
            })?;

        if !state.config.is_admin(actor) {
            tracing::warn!(actor_id = %actor, "Rejected admin command");
            return Err(AppError::Core(CoreError::Forbidden(
                "You are not authorized to use this command.".into(),
            )));
        }

        Ok(AdminUser {
            user_id: actor.to_string(),
        })
    }
}
