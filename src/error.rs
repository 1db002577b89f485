use thiserror::Error;

#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("Food not found: {0}")]
    UnknownFood(String),

    #[error("Food is not selected: {0}")]
    NotSelected(String),

    #[error("Unknown activity level: {0}")]
    UnknownActivity(String),

    #[error("Failed to load configuration '{name}': {reason}")]
    ConfigLoad { name: String, reason: String },

    #[error("Corrupt persisted value for '{key}': {reason}")]
    PersistenceCorrupt { key: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, TrackerError>;
