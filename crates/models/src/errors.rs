use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("invalid metadata json: {0}")]
    Json(#[from] serde_json::Error),
}
