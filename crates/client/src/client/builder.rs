//! Builder for [`AppClient`] instances.
//!
//! This module is responsible for:
//! - Picking the application host (descriptor default, configuration or explicit)
//! - Normalizing the host into a base URL
//! - Fixing transport settings (TLS verification, timeout) for the client's sessions
//! - Choosing the tracing span the client logs in
//!
//! # What this module does NOT handle:
//! - The login handshake (handled in `session.rs`)
//! - Building the per-session HTTP client (built fresh at every login)
//!
//! # Invariants
//! - `skip_verify` and `timeout` default to the authority's settings
//! - `skip_verify` only affects HTTPS hosts; HTTP hosts log a warning

use std::time::Duration;

use nexus_config::Config;

use crate::apps::{AppDescriptor, AppKind, normalize_host};
use crate::auth::TicketAuthority;
use crate::client::{AppClient, SessionPhase};
use crate::error::Result;

/// Builder for creating a new [`AppClient`].
///
/// ```rust,ignore
/// let insight = AppClient::builder(AppKind::Insight, authority.clone())
///     .host("eihome.staging.example.com")
///     .timeout(Duration::from_secs(60))
///     .build()?;
/// ```
pub struct AppClientBuilder {
    descriptor: &'static AppDescriptor,
    authority: TicketAuthority,
    host: Option<String>,
    skip_verify: Option<bool>,
    timeout: Option<Duration>,
    span: Option<tracing::Span>,
}

impl AppClientBuilder {
    pub(crate) fn new(kind: AppKind, authority: TicketAuthority) -> Self {
        Self {
            descriptor: kind.descriptor(),
            authority,
            host: None,
            skip_verify: None,
            timeout: None,
            span: None,
        }
    }

    /// Override the application host; a bare host or a full base URL.
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Set whether to skip TLS certificate verification.
    ///
    /// # Security Warning
    /// Only use this against test deployments. Disabling TLS verification
    /// makes the session open to man-in-the-middle attacks.
    pub fn skip_verify(mut self, skip: bool) -> Self {
        self.skip_verify = Some(skip);
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Span the client's log events are emitted in.
    ///
    /// Defaults to an `app` span carrying the application name and host.
    pub fn span(mut self, span: tracing::Span) -> Self {
        self.span = Some(span);
        self
    }

    /// Take the application host and transport settings from configuration.
    pub fn from_config(mut self, config: &Config) -> Self {
        self.host = Some(
            self.descriptor
                .kind
                .configured_host(&config.connection)
                .to_string(),
        );
        self.skip_verify = Some(config.connection.skip_verify);
        self.timeout = Some(config.connection.timeout);
        self
    }

    /// Build the [`AppClient`].
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidUrl`](crate::ClientError::InvalidUrl) if
    /// the host cannot be normalized.
    pub fn build(self) -> Result<AppClient> {
        let host = self
            .host
            .unwrap_or_else(|| self.descriptor.default_host.to_string());
        let base_url = normalize_host(&host)?;

        let skip_verify = self
            .skip_verify
            .unwrap_or_else(|| self.authority.skip_verify());
        let timeout = self.timeout.unwrap_or_else(|| self.authority.timeout());

        if skip_verify && !base_url.starts_with("https://") {
            tracing::warn!(
                app = self.descriptor.name,
                "skip_verify=true has no effect on HTTP URLs"
            );
        }

        let span = self.span.unwrap_or_else(|| {
            tracing::info_span!("app", name = self.descriptor.name, host = %base_url)
        });

        Ok(AppClient {
            authority: self.authority,
            descriptor: self.descriptor,
            base_url,
            skip_verify,
            timeout,
            span,
            session: None,
            phase: SessionPhase::Unauthenticated,
        })
    }
}
