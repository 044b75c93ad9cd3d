use thiserror::Error as ThisError;

/// Errors that can occur while setting up a logger
#[derive(ThisError, Debug)]
pub enum Error {
    /// I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// Configuration is invalid.
    #[error("Configuration error: {0}")]
    Config(String),
    /// Initialization failed.
    #[error("Initialization error: {0}")]
    Init(String),
    /// Timestamp formatting failed.
    #[error("Time error: {0}")]
    Time(#[from] time::error::Format),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
