use crate::domain::model::ParseError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ValidatorError {
    #[error("Grid parsing failed: {0}")]
    ParseError(#[from] ParseError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration file error: {0}")]
    ConfigFileError(#[from] toml::de::Error),

    #[error("Worker task failed: {0}")]
    TaskError(#[from] tokio::task::JoinError),

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

pub type Result<T> = std::result::Result<T, ValidatorError>;
