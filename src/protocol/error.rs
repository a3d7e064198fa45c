//! Error types for A2A protocol operations

use thiserror::Error;

/// Main error type for A2A protocol operations
#[derive(Debug, Error)]
pub enum A2AError {
    /// Transport-level error (network, connection, etc.)
    #[error("Transport error: {0}")]
    Transport(String),

    /// Protocol-level error (invalid message format, unexpected response, etc.)
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// Validation error (invalid request or response)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Request timeout error
    #[error("Request timeout")]
    Timeout,

    /// Task not found error
    #[error("Task not found: {task_id}")]
    TaskNotFound { task_id: String },
}

/// Result type alias for A2A operations
pub type A2AResult<T> = Result<T, A2AError>;

impl From<reqwest::Error> for A2AError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            A2AError::Timeout
        } else if err.is_connect() {
            A2AError::Transport(format!("Connection error: {}", err))
        } else {
            A2AError::Transport(err.to_string())
        }
    }
}
