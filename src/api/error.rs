//! API error types

use thiserror::Error;

use crate::utils::config::ConfigError;

/// Result type for API operations
pub type EngineResult<T> = Result<T, EngineError>;

#[derive(Debug, Error)]
pub enum EngineError {
    /// The executor stopped and no longer accepts commands
    #[error("tracking engine executor has shut down")]
    Disconnected,
    /// Invalid engine configuration
    #[error("invalid engine configuration: {0}")]
    Config(#[from] ConfigError),
    /// The executor thread could not be started
    #[error("failed to start executor thread: {0}")]
    Spawn(#[source] std::io::Error),
}

impl<T> From<std::sync::mpsc::SendError<T>> for EngineError {
    fn from(_: std::sync::mpsc::SendError<T>) -> Self {
        EngineError::Disconnected
    }
}

impl From<std::sync::mpsc::RecvError> for EngineError {
    fn from(_: std::sync::mpsc::RecvError) -> Self {
        EngineError::Disconnected
    }
}
