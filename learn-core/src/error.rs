//! Error types for Learn

use thiserror::Error;

/// Result type alias for Learn operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for Learn operations
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// A node path that does not exist in the plan, or cannot be parsed
    #[error("Invalid node path: {0}")]
    InvalidPath(String),
}
