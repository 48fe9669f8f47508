//! Ticket granting authority client.
//!
//! Responsibilities:
//! - Hold the group-scoped credential and exchange it for a ticket granting
//!   ticket (TGT), cached for the lifetime of the authority.
//! - Issue service tickets (ST) for application session URLs.
//!
//! Does NOT handle:
//! - Application sessions or cookies (see `client::session`).
//!
//! Invariants:
//! - At most one TGT request is in flight per authority; concurrent callers
//!   wait for it and share the result.
//! - A failed TGT request leaves the cache unset.
//! - `TicketAuthority` is a cheap handle; clones share the same cache.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use nexus_config::Config;
use nexus_config::constants::{DEFAULT_AUTHORITY_HOST, DEFAULT_MAX_REDIRECTS, DEFAULT_TIMEOUT_SECS};
use secrecy::SecretString;
use tokio::sync::Mutex;
use tracing::{Instrument, debug, info, warn};

use crate::apps::normalize_host;
use crate::endpoints;
use crate::error::{ClientError, Result};

/// Group-scoped account presented to the ticket authority.
#[derive(Debug, Clone)]
pub struct Credential {
    group: String,
    username: String,
    password: SecretString,
    authority_host: String,
}

impl Credential {
    /// Create a credential against the default authority host.
    pub fn new(
        group: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            group: group.into(),
            username: username.into(),
            password: SecretString::new(password.into().into()),
            authority_host: DEFAULT_AUTHORITY_HOST.to_string(),
        }
    }

    /// Use another authority; a bare host or a full base URL.
    pub fn with_authority_host(mut self, host: impl Into<String>) -> Self {
        self.authority_host = host.into();
        self
    }

    pub fn from_config(config: &Config) -> Self {
        Self {
            group: config.credential.group.clone(),
            username: config.credential.username.clone(),
            password: config.credential.password.clone(),
            authority_host: config.connection.authority_host.clone(),
        }
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn authority_host(&self) -> &str {
        &self.authority_host
    }

    /// The login name the authority expects: `group\username`.
    pub fn principal(&self) -> String {
        format!("{}\\{}", self.group, self.username)
    }
}

/// Ticket granting ticket issued by the authority.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketGrantingTicket(String);

impl TicketGrantingTicket {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TicketGrantingTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Single-use service ticket bound to one service URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceTicket(String);

impl ServiceTicket {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ServiceTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Shared handle to the ticket authority.
///
/// Every application client built from the same handle (or its clones)
/// reuses one TGT.
#[derive(Debug, Clone)]
pub struct TicketAuthority {
    inner: Arc<AuthorityInner>,
}

#[derive(Debug)]
struct AuthorityInner {
    http: reqwest::Client,
    base_url: String,
    credential: Credential,
    skip_verify: bool,
    timeout: Duration,
    span: tracing::Span,
    ticket: Mutex<Option<TicketGrantingTicket>>,
}

impl TicketAuthority {
    /// Create an authority with default transport settings.
    pub fn new(credential: Credential) -> Result<Self> {
        Self::builder(credential).build()
    }

    pub fn builder(credential: Credential) -> TicketAuthorityBuilder {
        TicketAuthorityBuilder::new(credential)
    }

    /// Build an authority from loaded configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::builder(Credential::from_config(config))
            .skip_verify(config.connection.skip_verify)
            .timeout(config.connection.timeout)
            .build()
    }

    /// Normalized base URL of the authority.
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    pub fn credential(&self) -> &Credential {
        &self.inner.credential
    }

    pub(crate) fn skip_verify(&self) -> bool {
        self.inner.skip_verify
    }

    pub(crate) fn timeout(&self) -> Duration {
        self.inner.timeout
    }

    /// Obtain the TGT, requesting it only if none is cached.
    ///
    /// # Errors
    ///
    /// Any failure (transport, rejected credential, missing `Location`) is
    /// reported as `ClientError::AuthFailed` with the cause as its source.
    pub async fn login(&self) -> Result<TicketGrantingTicket> {
        let inner = &self.inner;
        async move {
            let mut cached = inner.ticket.lock().await;
            if let Some(ticket) = cached.as_ref() {
                debug!("reusing cached ticket granting ticket");
                return Ok(ticket.clone());
            }

            let principal = inner.credential.principal();
            let ticket = endpoints::create_ticket_granting_ticket(
                &inner.http,
                &inner.base_url,
                &principal,
                &inner.credential.password,
            )
            .await
            .map_err(|e| {
                warn!(error = %e, "ticket granting ticket request failed");
                ClientError::auth_failed(
                    format!("authority rejected login for {principal}"),
                    e,
                )
            })?;

            info!(principal = %principal, "obtained ticket granting ticket");
            *cached = Some(ticket.clone());
            Ok(ticket)
        }
        .instrument(inner.span.clone())
        .await
    }

    /// Request a service ticket for `service_url`, logging in first if needed.
    pub async fn request_service_ticket(&self, service_url: &str) -> Result<ServiceTicket> {
        let tgt = self.login().await?;
        let inner = &self.inner;

        endpoints::create_service_ticket(&inner.http, &inner.base_url, &tgt, service_url)
            .instrument(inner.span.clone())
            .await
            .map_err(|e| {
                ClientError::auth_failed(
                    format!("authority refused a service ticket for {service_url}"),
                    e,
                )
            })
    }

    /// The cached TGT, if a login has succeeded.
    pub async fn ticket(&self) -> Option<TicketGrantingTicket> {
        self.inner.ticket.lock().await.clone()
    }

    /// Drop the cached TGT so the next `login()` authenticates again.
    pub async fn forget_ticket(&self) {
        if self.inner.ticket.lock().await.take().is_some() {
            debug!(parent: &self.inner.span, "forgot ticket granting ticket");
        }
    }
}

/// Builder for [`TicketAuthority`].
pub struct TicketAuthorityBuilder {
    credential: Credential,
    skip_verify: bool,
    timeout: Duration,
    span: Option<tracing::Span>,
}

impl TicketAuthorityBuilder {
    fn new(credential: Credential) -> Self {
        Self {
            credential,
            skip_verify: false,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            span: None,
        }
    }

    /// Skip TLS certificate verification for the authority and, by default,
    /// for every application client built from it.
    pub fn skip_verify(mut self, skip: bool) -> Self {
        self.skip_verify = skip;
        self
    }

    /// Request timeout; inherited by application clients unless overridden.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Span that authority log events are emitted in.
    pub fn span(mut self, span: tracing::Span) -> Self {
        self.span = Some(span);
        self
    }

    pub fn build(self) -> Result<TicketAuthority> {
        let base_url = normalize_host(&self.credential.authority_host)?;

        let mut http_builder = reqwest::Client::builder()
            .timeout(self.timeout)
            .redirect(reqwest::redirect::Policy::limited(DEFAULT_MAX_REDIRECTS))
            .user_agent(endpoints::user_agent());

        if self.skip_verify {
            if base_url.starts_with("https://") {
                http_builder = http_builder.danger_accept_invalid_certs(true);
            } else {
                warn!("skip_verify=true has no effect on HTTP URLs");
            }
        }

        let span = self
            .span
            .unwrap_or_else(|| tracing::info_span!("authority", host = %base_url));

        Ok(TicketAuthority {
            inner: Arc::new(AuthorityInner {
                http: http_builder.build()?,
                base_url,
                credential: self.credential,
                skip_verify: self.skip_verify,
                timeout: self.timeout,
                span,
                ticket: Mutex::new(None),
            }),
        })
    }
}
