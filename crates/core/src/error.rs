//! Error types for hims core operations.

/// Errors produced by record storage and the domain services built on it.
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("record not found: {0}")]
    NotFound(String),
    #[error("failed to create storage directory: {0}")]
    StorageDirCreation(std::io::Error),
    #[error("failed to create record directory: {0}")]
    RecordDirCreation(std::io::Error),
    #[error("failed to write record file: {0}")]
    FileWrite(std::io::Error),
    #[error("failed to read record file: {0}")]
    FileRead(std::io::Error),
    #[error("failed to serialise record: {0}")]
    Serialization(serde_json::Error),
    #[error("failed to deserialise record: {0}")]
    Deserialization(serde_json::Error),
    #[error("invalid record identifier: {0}")]
    Id(#[from] hims_uuid::IdError),
    #[error("invalid text input: {0}")]
    Text(#[from] hims_types::TextError),
}

/// Result type for hims core operations.
pub type RecordResult<T> = std::result::Result<T, RecordError>;
