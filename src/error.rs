use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TaskdeckError {
    #[error("Project not found: {0}")]
    ProjectNotFound(String),

    #[error("Projects file not found: {0}")]
    ProjectsFileNotFound(PathBuf),

    #[error("Invalid feed line {line}: {reason}")]
    Feed { line: usize, reason: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, TaskdeckError>;
