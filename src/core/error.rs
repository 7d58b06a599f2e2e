use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Invalid hex key: {0}")]
    InvalidHexKey(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid catalog entry {id}: {reason}")]
    InvalidCatalog { id: String, reason: String },
}

pub type Result<T> = std::result::Result<T, EngineError>;
