#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Malformed snapshot: {0}")]
    Snapshot(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),
}
