use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProvisionError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Directory operation '{operation}' failed for '{name}': {detail}")]
    DirectoryError {
        operation: String,
        name: String,
        detail: String,
    },

    #[error("Cannot read input stream '{path}': {detail}")]
    StreamError { path: String, detail: String },
}

pub type Result<T> = std::result::Result<T, ProvisionError>;
