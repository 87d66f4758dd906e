use thiserror::Error;

#[derive(Error, Debug)]
pub enum PocketError {
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Backup error: {0}")]
    Backup(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, PocketError>;
