//! Mimic client errors

use thiserror::Error;

/// Errors that can occur while configuring or calling a Mimic server
#[derive(Debug, Error)]
pub enum MimicError {
    /// Server answered with a non-200 status
    #[error("Remote synthesis failed: HTTP {status} {reason}: {detail}")]
    RemoteSynthesis {
        /// HTTP status code
        status: u16,
        /// Reason phrase sent by the server
        reason: String,
        /// First line of the response body
        detail: String,
    },

    /// Invalid configuration or inconsistent capability tables
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Effect name outside the effect table
    #[error("Unknown effect: {0}")]
    UnknownEffect(String),

    /// Locale outside the locale table
    #[error("Unsupported locale: {0}")]
    UnsupportedLocale(String),

    /// Codec outside the codec table
    #[error("Unsupported codec: {0}")]
    UnsupportedCodec(String),

    /// Required per-call option was not supplied
    #[error("Missing option: {0}")]
    MissingOption(String),

    /// Failed to connect to the server
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Exchange exceeded the configured timeout
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// Request could not be sent
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Response body could not be read
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl MimicError {
    /// Whether the server could not be reached at all
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::ConnectionFailed(_) | Self::Timeout(_) | Self::RequestFailed(_)
        )
    }
}

impl From<reqwest::Error> for MimicError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err.to_string())
        } else if err.is_connect() {
            Self::ConnectionFailed(err.to_string())
        } else {
            Self::RequestFailed(err.to_string())
        }
    }
}
