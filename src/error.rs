use thiserror::Error;

pub type Result<T> = std::result::Result<T, TicketingError>;

#[derive(Debug, Error)]
pub enum TicketingError {
    #[error("A ticket with project name '{0}' already exists")]
    DuplicateProjectName(String),

    #[error("Project name must not be empty")]
    EmptyProjectName,

    #[error("Invalid priority: {0}")]
    InvalidPriority(String),

    #[error("Invalid status: {0}")]
    InvalidStatus(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}
