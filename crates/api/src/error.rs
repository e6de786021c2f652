use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use stormscout_core::error::CoreError;
use stormscout_events::DeliveryError;
use stormscout_worldinfo::SnapshotError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `stormscout_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Snapshot could not be obtained (missing cache, failed sync).
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),

    /// An announcement could not be delivered.
    #[error("Delivery failed: {0}")]
    Delivery(#[from] DeliveryError),

    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Snapshot(msg) => {
                    tracing::error!(error = %msg, "Malformed snapshot");
                    (
                        StatusCode::BAD_GATEWAY,
                        "MALFORMED_SNAPSHOT",
                        "Mission data could not be read".to_string(),
                    )
                }
                CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
            },

            // --- Database errors ---
            AppError::Database(err) => classify_sqlx_error(err),

            // --- Upstream errors ---
            AppError::Snapshot(err) => classify_snapshot_error(err),
            AppError::Delivery(err) => {
                tracing::error!(error = %err, "Announcement delivery failed");
                (StatusCode::BAD_GATEWAY, "DELIVERY_FAILED", err.to_string())
            }

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// `RowNotFound` maps to 404; everything else to 500 with a sanitized
/// message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        other => {
            tracing::error!(error = %other, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
    }
}

fn classify_snapshot_error(err: &SnapshotError) -> (StatusCode, &'static str, String) {
    match err {
        SnapshotError::Unavailable(_) => (
            StatusCode::SERVICE_UNAVAILABLE,
            "SNAPSHOT_UNAVAILABLE",
            "Mission data is not available yet. Please try again later.".to_string(),
        ),
        SnapshotError::Timeout(_) => (
            StatusCode::GATEWAY_TIMEOUT,
            "SNAPSHOT_TIMEOUT",
            err.to_string(),
        ),
        SnapshotError::Fetch(_) => {
            tracing::error!(error = %err, "World info sync failed");
            (StatusCode::BAD_GATEWAY, "SNAPSHOT_FETCH_FAILED", err.to_string())
        }
        SnapshotError::Cache(_) => {
            tracing::error!(error = %err, "Snapshot cache error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_snapshot_is_service_unavailable() {
        let response = AppError::Snapshot(SnapshotError::Unavailable("none".into())).into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn forbidden_maps_to_403() {
        let response = AppError::Core(CoreError::Forbidden("no".into())).into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn delivery_failure_is_bad_gateway() {
        let response = AppError::Delivery(DeliveryError::HttpStatus(500)).into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }
}
