use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("config not found: {0}")]
    NotFound(String),
    #[error("config already exists: {0}")]
    AlreadyExists(String),
    /// Failures of repository backends that can fail; the in-memory store never returns it.
    #[error("storage error: {0}")]
    Storage(String),
    #[error("model error: {0}")]
    Model(#[from] models::errors::ModelError),
}

impl ServiceError {
    pub fn not_found(name: &str) -> Self { Self::NotFound(name.to_string()) }

    pub fn already_exists(name: &str) -> Self { Self::AlreadyExists(name.to_string()) }

    pub fn is_not_found(&self) -> bool { matches!(self, Self::NotFound(_)) }
}
