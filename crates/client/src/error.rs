//! Error types for the Nexus client.
//!
//! Invariants:
//! - Nothing here is retried; every variant describes one failed call.
//! - `AuthFailed` keeps the lower-level failure as its `source()`.
//! - Response bodies are kept verbatim so callers can diagnose server answers.

use thiserror::Error;

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur during Nexus client operations.
#[derive(Error, Debug)]
pub enum ClientError {
    /// The ticket authority refused or could not issue a ticket.
    #[error("Authentication failed: {message}")]
    AuthFailed {
        message: String,
        #[source]
        source: Option<Box<ClientError>>,
    },

    /// An API call was attempted before the application session was established.
    #[error("Not logged in to {app}; call login() first")]
    NotLoggedIn { app: String },

    /// Transport-level failure (DNS, TLS, connection reset, timeout).
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("HTTP {status} at {url}: {body}")]
    HttpStatus {
        status: u16,
        url: String,
        body: String,
    },

    /// The server answered successfully but the response could not be understood.
    #[error("Unexpected response from {url}: {message}")]
    Protocol {
        url: String,
        message: String,
        body: String,
    },

    /// A host or URL could not be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The request cannot be issued as described.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Local file I/O failed (uploads and downloads).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ClientError {
    pub(crate) fn auth_failed(message: impl Into<String>, source: ClientError) -> Self {
        Self::AuthFailed {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Check if this error indicates an authentication or session problem.
    pub fn is_auth_error(&self) -> bool {
        matches!(
            self,
            Self::AuthFailed { .. }
                | Self::NotLoggedIn { .. }
                | Self::HttpStatus {
                    status: 401 | 403,
                    ..
                }
        )
    }

    /// HTTP status carried by this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            Self::AuthFailed {
                source: Some(source),
                ..
            } => source.status(),
            _ => None,
        }
    }
}
