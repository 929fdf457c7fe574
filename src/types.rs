//! Shared error and result types

use thiserror::Error;

/// Service-wide error taxonomy
///
/// Client-facing variants map to 4xx responses in the route layer; storage
/// failures surface as server errors and are never retried here.
#[derive(Debug, Error)]
pub enum HomesteadError {
    /// Property id is not a well-formed ObjectId hex string
    #[error("Invalid property id: {0}")]
    InvalidIdentifier(String),

    /// Property document does not exist
    #[error("Property not found: {0}")]
    PropertyNotFound(String),

    /// A node path was required but missing, or could not be parsed
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    /// A path index fell outside its sibling list
    #[error("Path index {index} out of range for list of length {len}")]
    OutOfRange { index: i64, len: usize },

    /// MongoDB connectivity or query failure
    #[error("Database error: {0}")]
    Database(String),

    /// Anything that should never reach a client verbatim
    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, HomesteadError>;

impl From<std::io::Error> for HomesteadError {
    fn from(e: std::io::Error) -> Self {
        HomesteadError::Internal(format!("IO error: {}", e))
    }
}
