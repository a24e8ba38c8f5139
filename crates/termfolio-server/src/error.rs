//! Server error types.

use std::fmt;

use termfolio_core::ConfigError;

/// Errors that can occur in the server.
#[derive(Debug)]
pub enum ServerError {
    /// Configuration error (missing secret, unreadable project file, etc.).
    ///
    /// These are fatal errors that prevent server startup. Fix configuration
    /// and restart.
    Config(String),

    /// Transport/network error (bind failure, I/O error, etc.).
    ///
    /// Fatal when raised at startup (address in use). Per-connection I/O
    /// errors never surface here; they end only their own session.
    Transport(String),

    /// Internal error (unexpected state, logic bug, etc.).
    ///
    /// Should never happen in correct implementation. Indicates a bug.
    Internal(String),
}

impl fmt::Display for ServerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(msg) => write!(f, "configuration error: {msg}"),
            Self::Transport(msg) => write!(f, "transport error: {msg}"),
            Self::Internal(msg) => write!(f, "internal error: {msg}"),
        }
    }
}

impl std::error::Error for ServerError {}

impl From<ConfigError> for ServerError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<std::io::Error> for ServerError {
    fn from(err: std::io::Error) -> Self {
        Self::Transport(err.to_string())
    }
}
