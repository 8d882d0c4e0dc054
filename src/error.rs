use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoachError {
    #[error("invalid input: {0}")]
    InputValidation(String),

    #[error("model unavailable: {0}")]
    ModelUnavailable(String),

    #[error("feature schema mismatch: {0}")]
    SchemaMismatch(String),

    #[error("upstream advice call failed: {0}")]
    Upstream(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CoachError>;
