use thiserror::Error;

#[derive(Error, Debug)]
pub enum PulseError {
    #[error("snapshot not found: {0}")]
    SnapshotNotFound(String),

    #[error("snapshot parse error: {0}")]
    SnapshotParse(String),

    #[error("config parse error: {0}")]
    ConfigParse(String),

    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("no project found for student: {0}")]
    ProjectNotFound(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PulseError>;
