// Error types for request catalogs

use buildit_request::RequestError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Request not found in catalog: {0}")]
    RequestNotFound(String),

    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Request error: {0}")]
    Request(#[from] RequestError),

    #[error("Environment variable error: {0}")]
    EnvError(#[from] std::env::VarError),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
