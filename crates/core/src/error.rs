//! Error types for the Lockwatch core crate.

use thiserror::Error;

/// Top-level error type for all Lockwatch operations.
#[derive(Debug, Error)]
pub enum LockwatchError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("authentication error: {0}")]
    Auth(String),

    #[error("fetch error: {0}")]
    Fetch(String),

    #[error("render error: {0}")]
    Render(String),
}

/// A convenience Result alias that defaults to [`LockwatchError`].
pub type Result<T> = std::result::Result<T, LockwatchError>;
