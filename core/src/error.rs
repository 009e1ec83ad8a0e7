use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config at {path}: {reason}")]
    Config { path: String, reason: String },

    #[error("Run '{run_id}' not found")]
    RunNotFound { run_id: String },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type SimResult<T> = Result<T, SimError>;
