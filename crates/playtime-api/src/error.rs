//! Error types for playtime-api

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Every way a backend call can fail.
///
/// Variants carry strings rather than the underlying client errors so that
/// test doubles can produce them too.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Connection failure, TLS failure, or request timeout
    #[error("Transport error: {0}")]
    Transport(String),

    /// The backend answered with a status other than the one expected
    #[error("Unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    /// The body did not match the expected shape
    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    pub(crate) fn transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Transport(format!("request timed out: {}", err))
        } else {
            Self::Transport(err.to_string())
        }
    }
}
