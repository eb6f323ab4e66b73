//! Error types for the trip planner client

use thiserror::Error;
use trip_core::render::TRANSPORT_MESSAGE;
use trip_core::{FailureKind, ValidationError};

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur when talking to the trip planner backend
#[derive(Debug, Error)]
pub enum ClientError {
    /// No response was received (connection refused, timeout, ...)
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend answered with an error message
    #[error("Server error (status {status}): {message}")]
    Server {
        /// HTTP status code
        status: u16,
        /// Error message from the backend, verbatim
        message: String,
    },

    /// The response body could not be decoded
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// The response decoded but does not follow the API contract
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// The request could not be built (bad base URL)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Input rejected before any request was sent
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl ClientError {
    /// Create a server error from status code and message
    pub fn server(status: u16, message: impl Into<String>) -> Self {
        Self::Server {
            status,
            message: message.into(),
        }
    }

    /// Whether retrying the same request may succeed
    ///
    /// Only failures to obtain or decode a response qualify. An error the
    /// backend chose to send is never transient.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::ParseError(_))
    }

    /// The user-facing failure category
    pub fn failure_kind(&self) -> FailureKind {
        match self {
            Self::Transport(_) | Self::ParseError(_) => FailureKind::Transport,
            Self::Server { .. } => FailureKind::Server,
            Self::Protocol(_) => FailureKind::Protocol,
            Self::InvalidRequest(_) | Self::Validation(_) => FailureKind::Validation,
        }
    }

    /// Message shown to the user
    ///
    /// Server messages are passed through untouched; transport problems get
    /// a generic hint.
    pub fn user_message(&self) -> String {
        match self {
            Self::Transport(_) | Self::ParseError(_) => TRANSPORT_MESSAGE.to_string(),
            Self::Server { message, .. } => format!("Error: {}", message),
            Self::Protocol(message) => format!("Unexpected response: {}", message),
            Self::InvalidRequest(message) => format!("Invalid request: {}", message),
            Self::Validation(e) => e.to_string(),
        }
    }
}
