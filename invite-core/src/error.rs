//! Error types for the invite ecosystem.

use thiserror::Error;

/// Errors that can occur in invite operations.
#[derive(Error, Debug)]
pub enum InviteError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Event document error: {0}")]
    Document(String),

    #[error("Template error: {0}")]
    Template(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Event document was never loaded")]
    NotLoaded,
}

impl From<minijinja::Error> for InviteError {
    fn from(err: minijinja::Error) -> Self {
        InviteError::Template(err.to_string())
    }
}

/// Result type alias for invite operations.
pub type InviteResult<T> = Result<T, InviteError>;
