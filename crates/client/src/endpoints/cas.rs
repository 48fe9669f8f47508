//! Ticket authority (CAS REST protocol) endpoints.
//!
//! - `POST /cas/v1/tickets` with `username`/`password` answers with a
//!   `Location` header `.../cas/v1/tickets/<TGT>`.
//! - `POST /cas/v1/tickets/<TGT>` with `service` answers with the service
//!   ticket as the plain-text body.
//! - `GET <service>?ticket=<ST>` on the application opens its cookie session.

use reqwest::Client;
use reqwest::header::LOCATION;
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;
use url::Url;

use crate::auth::{ServiceTicket, TicketGrantingTicket};
use crate::endpoints::request::{send_request, status_error};
use crate::error::{ClientError, Result};

const TICKETS_PATH: &str = "/cas/v1/tickets";

/// Exchange a principal (`group\username`) and password for a TGT.
pub async fn create_ticket_granting_ticket(
    client: &Client,
    authority_url: &str,
    principal: &str,
    password: &SecretString,
) -> Result<TicketGrantingTicket> {
    let url = format!("{}{}", authority_url, TICKETS_PATH);
    debug!(%url, principal, "requesting ticket granting ticket");

    let builder = client
        .post(&url)
        .form(&[("username", principal), ("password", password.expose_secret())]);
    let response = send_request(builder).await?;

    let location = response
        .headers()
        .get(LOCATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let protocol_error = |message: &str| ClientError::Protocol {
        url: url.clone(),
        message: message.to_string(),
        body: String::new(),
    };

    let location = location.ok_or_else(|| protocol_error("response has no Location header"))?;
    let ticket = ticket_from_location(authority_url, &location).ok_or_else(|| {
        protocol_error(&format!("Location header '{location}' does not name a ticket"))
    })?;

    Ok(TicketGrantingTicket::new(ticket))
}

/// Extract the TGT from a `Location` header.
///
/// The header must resolve to `.../cas/v1/tickets/<TGT>` with exactly one
/// non-empty segment after the collection, no trailing slash and no query.
/// Relative values are resolved against `authority_url`.
fn ticket_from_location(authority_url: &str, location: &str) -> Option<String> {
    let location = location.trim();
    let url = match Url::parse(location) {
        Ok(url) => url,
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            Url::parse(authority_url).ok()?.join(location).ok()?
        }
        Err(_) => return None,
    };
    if url.query().is_some() || url.fragment().is_some() {
        return None;
    }

    let segments: Vec<&str> = url.path_segments()?.collect();
    match segments.as_slice() {
        [.., "cas", "v1", "tickets", ticket] if !ticket.is_empty() => Some((*ticket).to_string()),
        _ => None,
    }
}

/// Ask the authority for a service ticket bound to `service_url`.
pub async fn create_service_ticket(
    client: &Client,
    authority_url: &str,
    tgt: &TicketGrantingTicket,
    service_url: &str,
) -> Result<ServiceTicket> {
    let url = format!("{}{}/{}", authority_url, TICKETS_PATH, tgt.as_str());
    debug!(service = service_url, "requesting service ticket");

    let builder = client.post(&url).form(&[("service", service_url)]);
    let response = send_request(builder).await?;
    let body = response.text().await?;

    let ticket = body.trim();
    if ticket.is_empty() {
        return Err(ClientError::Protocol {
            url,
            message: "service ticket response is empty".to_string(),
            body,
        });
    }

    Ok(ServiceTicket::new(ticket))
}

/// Present a service ticket at the application's session URL.
///
/// The cookies set along the way land in `client`'s cookie store.
pub async fn validate_service_ticket(
    client: &Client,
    session_url: &str,
    ticket: &ServiceTicket,
) -> Result<()> {
    let response = client
        .get(session_url)
        .query(&[("ticket", ticket.as_str())])
        .send()
        .await?;

    let status = response.status();
    if status.is_success() {
        return Ok(());
    }

    // The session endpoint may answer a valid ticket with 403; the cookie
    // session is usable either way.
    if status == reqwest::StatusCode::FORBIDDEN {
        debug!(session_url, "session validation answered 403, treating as established");
        return Ok(());
    }

    Err(status_error(response).await)
}
