//! Application session handshake and impersonation.
//!
//! # What this module does NOT handle:
//! - Ticket granting tickets (handled by [`TicketAuthority`](crate::auth::TicketAuthority))
//! - Sending API requests (handled in `request.rs`)
//!
//! # Invariants
//! - Every login builds a fresh cookie-jar HTTP client; the old jar is never reused.
//! - A failed handshake clears the session but leaves the authority's TGT cached.
//! - The impersonation stack lives on the session, so logout empties it.

use tracing::{Instrument, debug, info, warn};

use crate::auth::ServiceTicket;
use crate::client::AppClient;
use crate::client::request::ApiRequest;
use crate::endpoints;
use crate::error::{ClientError, Result};

/// Where an application client stands in the login handshake.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Unauthenticated,
    RequestingServiceTicket,
    Validating,
    Authenticated,
    /// The last handshake failed; `login()` may be called again.
    Failed,
}

/// Identity an operator is acting as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Impersonation {
    pub group: String,
    pub user: String,
}

/// An established cookie session with one application.
#[derive(Debug)]
pub struct ApplicationSession {
    pub(crate) http: reqwest::Client,
    service_ticket: ServiceTicket,
    impersonation: Vec<Impersonation>,
}

impl ApplicationSession {
    /// The service ticket the session was opened with.
    pub fn service_ticket(&self) -> &ServiceTicket {
        &self.service_ticket
    }

    /// Active impersonations, innermost last.
    pub fn impersonation(&self) -> &[Impersonation] {
        &self.impersonation
    }
}

impl AppClient {
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn is_logged_in(&self) -> bool {
        self.session.is_some()
    }

    pub fn service_ticket(&self) -> Option<&ServiceTicket> {
        self.session.as_ref().map(ApplicationSession::service_ticket)
    }

    /// Open the application session.
    ///
    /// Obtains the TGT if needed, requests a service ticket for
    /// [`session_url()`](AppClient::session_url) and validates it there. When
    /// already logged in, returns the current ticket without I/O.
    ///
    /// # Errors
    ///
    /// - [`ClientError::AuthFailed`] if the authority refuses a ticket.
    /// - [`ClientError::HttpStatus`] if validation answers other than 2xx or 403.
    /// - [`ClientError::Transport`] on network failure.
    pub async fn login(&mut self) -> Result<ServiceTicket> {
        if let Some(session) = &self.session {
            debug!(parent: &self.span, "already logged in");
            return Ok(session.service_ticket.clone());
        }

        let span = self.span.clone();
        match self.handshake().instrument(span).await {
            Ok(session) => {
                let ticket = session.service_ticket.clone();
                self.session = Some(session);
                self.phase = SessionPhase::Authenticated;
                info!(parent: &self.span, app = self.descriptor.name, "logged in");
                Ok(ticket)
            }
            Err(e) => {
                warn!(parent: &self.span, error = %e, "login failed");
                self.session = None;
                self.phase = SessionPhase::Failed;
                Err(e)
            }
        }
    }

    async fn handshake(&mut self) -> Result<ApplicationSession> {
        let session_url = self.session_url();

        self.phase = SessionPhase::RequestingServiceTicket;
        let service_ticket = self.authority.request_service_ticket(&session_url).await?;

        self.phase = SessionPhase::Validating;
        let http = self.session_http()?;
        endpoints::validate_service_ticket(&http, &session_url, &service_ticket).await?;

        Ok(ApplicationSession {
            http,
            service_ticket,
            impersonation: Vec::new(),
        })
    }

    fn session_http(&self) -> Result<reqwest::Client> {
        let mut builder = reqwest::Client::builder()
            .cookie_store(true)
            .default_headers(endpoints::default_headers())
            .timeout(self.timeout)
            .redirect(reqwest::redirect::Policy::limited(
                nexus_config::constants::DEFAULT_MAX_REDIRECTS,
            ));

        if self.skip_verify && self.base_url.starts_with("https://") {
            builder = builder.danger_accept_invalid_certs(true);
        }

        Ok(builder.build()?)
    }

    /// Drop the application session. The authority's TGT stays cached.
    pub fn logout(&mut self) {
        if self.session.take().is_some() {
            info!(parent: &self.span, app = self.descriptor.name, "logged out");
        }
        self.phase = SessionPhase::Unauthenticated;
    }

    /// Active impersonations, innermost last; empty without a session.
    pub fn impersonation_stack(&self) -> &[Impersonation] {
        self.session
            .as_ref()
            .map(ApplicationSession::impersonation)
            .unwrap_or_default()
    }

    fn impersonation_path(&self) -> Result<&'static str> {
        self.descriptor.impersonation_path.ok_or_else(|| {
            ClientError::InvalidRequest(format!(
                "{} does not support impersonation",
                self.descriptor.name
            ))
        })
    }

    /// Act as `user` of `group` until [`exit_impersonation()`](AppClient::exit_impersonation).
    pub async fn enter_impersonation(
        &mut self,
        group: &str,
        user: &str,
    ) -> Result<serde_json::Value> {
        self.session()?;
        let path = self.impersonation_path()?;

        let request = ApiRequest::get(path)
            .query("groupName", group)
            .query("userName", user);
        let response = self.execute(request).await?;

        if let Some(session) = self.session.as_mut() {
            session.impersonation.push(Impersonation {
                group: group.to_string(),
                user: user.to_string(),
            });
        }
        info!(parent: &self.span, group, user, "entered impersonation");
        Ok(response)
    }

    /// Leave the innermost impersonation and return it.
    pub async fn exit_impersonation(&mut self) -> Result<Impersonation> {
        let depth = self.session()?.impersonation.len();
        let path = self.impersonation_path()?;
        if depth == 0 {
            return Err(ClientError::InvalidRequest(
                "no impersonation is active".to_string(),
            ));
        }

        self.execute(ApiRequest::delete(path)).await?;

        let popped = self
            .session
            .as_mut()
            .and_then(|session| session.impersonation.pop())
            .ok_or_else(|| ClientError::InvalidRequest("no impersonation is active".to_string()))?;
        info!(parent: &self.span, group = %popped.group, user = %popped.user, "left impersonation");
        Ok(popped)
    }
}
