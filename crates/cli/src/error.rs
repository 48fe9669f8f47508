//! CLI exit codes for scripting and automation.
//!
//! Responsibilities:
//! - Define structured exit codes that scripts can use to distinguish error types.
//! - Map ClientError variants to appropriate exit codes.
//!
//! Does NOT handle:
//! - Error message formatting (handled by anyhow Display).
//!
//! Invariants:
//! - Exit codes 1-8 are reserved for specific error categories.
//! - Exit code 130 is reserved for SIGINT (Unix standard: 128 + SIGINT).

use nexus_client::ClientError;

/// Structured exit codes for nexus-cli.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    Success = 0,

    /// Unhandled or generic failure, including configuration errors.
    GeneralError = 1,

    /// The authority refused the credential, or the session is gone.
    ///
    /// Scripts should fix credentials rather than retry.
    AuthenticationFailed = 2,

    /// Network, timeout, DNS or URL failure.
    ///
    /// Scripts may retry with backoff.
    ConnectionError = 3,

    /// HTTP 404.
    NotFound = 4,

    /// Bad input or a response the client could not understand.
    ValidationError = 5,

    /// HTTP 403 outside of session validation.
    PermissionDenied = 6,

    /// HTTP 429.
    RateLimited = 7,

    /// HTTP 502/503/504.
    ServiceUnavailable = 8,

    /// SIGINT/Ctrl+C.
    Interrupted = 130,
}

impl ExitCode {
    pub const fn as_i32(self) -> i32 {
        self as u8 as i32
    }

    /// Whether the failure may go away on its own.
    pub const fn is_retryable(self) -> bool {
        matches!(
            self,
            ExitCode::ConnectionError | ExitCode::RateLimited | ExitCode::ServiceUnavailable
        )
    }
}

impl From<&ClientError> for ExitCode {
    fn from(err: &ClientError) -> Self {
        match err {
            ClientError::AuthFailed { .. } | ClientError::NotLoggedIn { .. } => {
                ExitCode::AuthenticationFailed
            }

            ClientError::HttpStatus { status, .. } => match status {
                401 => ExitCode::AuthenticationFailed,
                403 => ExitCode::PermissionDenied,
                404 => ExitCode::NotFound,
                400 | 422 => ExitCode::ValidationError,
                429 => ExitCode::RateLimited,
                502..=504 => ExitCode::ServiceUnavailable,
                _ => ExitCode::GeneralError,
            },

            ClientError::Transport(e) => {
                if e.is_connect() || e.is_timeout() {
                    ExitCode::ConnectionError
                } else {
                    ExitCode::GeneralError
                }
            }
            ClientError::InvalidUrl(_) => ExitCode::ConnectionError,

            ClientError::InvalidRequest(_) | ClientError::Protocol { .. } => {
                ExitCode::ValidationError
            }

            ClientError::Io(_) => ExitCode::GeneralError,
        }
    }
}

/// Extract an exit code from an `anyhow::Error` chain.
pub trait ExitCodeExt {
    /// Returns `GeneralError` when no `ClientError` is in the chain.
    fn exit_code(&self) -> ExitCode;
}

impl ExitCodeExt for anyhow::Error {
    fn exit_code(&self) -> ExitCode {
        self.chain()
            .find_map(|cause| cause.downcast_ref::<ClientError>())
            .map(ExitCode::from)
            .unwrap_or(ExitCode::GeneralError)
    }
}
