//! Application clients bound to the ticket authority.
//!
//! # Submodules
//! - [`builder`]: construction and transport settings
//! - `session`: the service-ticket handshake and the impersonation stack
//! - `request`: authorized requests and downloads
//! - `emc`, `insight`, `recommender`: typed facades over one application each
//!
//! # What this module does NOT handle:
//! - Ticket granting tickets (delegated to [`crate::auth::TicketAuthority`])
//! - Wire-level request/response handling (delegated to [`crate::endpoints`])
//!
//! # Invariants
//! - No request is sent while the client has no application session.
//! - Operations that change the session take `&mut self`; requests take `&self`.

/// Wrap [`AppClient`] in a typed facade for one application kind.
macro_rules! app_facade {
    ($name:ident, $kind:expr) => {
        impl $name {
            /// Build a client on the application's default host.
            pub fn new(authority: $crate::auth::TicketAuthority) -> $crate::error::Result<Self> {
                $crate::client::AppClient::builder($kind, authority)
                    .build()
                    .map(Self)
            }

            /// Wrap a client built with custom settings. Fails with
            /// `InvalidRequest` if `client` targets another application.
            pub fn from_client(client: $crate::client::AppClient) -> $crate::error::Result<Self> {
                if client.kind() != $kind {
                    return Err($crate::error::ClientError::InvalidRequest(format!(
                        "{} client cannot wrap {}",
                        stringify!($name),
                        client.name()
                    )));
                }
                Ok(Self(client))
            }

            pub fn into_inner(self) -> $crate::client::AppClient {
                self.0
            }
        }

        impl std::ops::Deref for $name {
            type Target = $crate::client::AppClient;

            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl std::ops::DerefMut for $name {
            fn deref_mut(&mut self) -> &mut Self::Target {
                &mut self.0
            }
        }
    };
}

pub mod builder;
mod emc;
mod insight;
mod recommender;
mod request;
mod session;

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde_json::Value;

pub use emc::EmcClient;
pub use insight::InsightClient;
pub use recommender::RecommenderClient;
pub use request::{ApiRequest, PayloadEncoding};
pub use session::{ApplicationSession, Impersonation, SessionPhase};

use crate::apps::{AppDescriptor, AppKind, join_path};
use crate::auth::TicketAuthority;
use crate::error::{ClientError, Result};
use crate::serde_helpers::id_from_value;

/// Client for one Nexus application.
///
/// Create it with [`AppClient::builder()`], call [`login()`](AppClient::login)
/// and then issue requests. Clients built from clones of the same
/// [`TicketAuthority`] share its ticket granting ticket but each keeps its own
/// cookie session.
///
/// ```rust,ignore
/// use nexus_client::{AppClient, AppKind, Credential, TicketAuthority};
///
/// let authority = TicketAuthority::new(Credential::new("acme", "bob", "secret"))?;
/// let mut emc = AppClient::builder(AppKind::Emc, authority).build()?;
/// emc.login().await?;
/// let groups = emc.request_get("/group").await?;
/// ```
#[derive(Debug)]
pub struct AppClient {
    pub(crate) authority: TicketAuthority,
    pub(crate) descriptor: &'static AppDescriptor,
    pub(crate) base_url: String,
    pub(crate) skip_verify: bool,
    pub(crate) timeout: Duration,
    pub(crate) span: tracing::Span,
    pub(crate) session: Option<ApplicationSession>,
    pub(crate) phase: SessionPhase,
}

impl AppClient {
    pub fn builder(kind: AppKind, authority: TicketAuthority) -> builder::AppClientBuilder {
        builder::AppClientBuilder::new(kind, authority)
    }

    /// Application name, e.g. `EI3`.
    pub fn name(&self) -> &'static str {
        self.descriptor.name
    }

    pub fn kind(&self) -> AppKind {
        self.descriptor.kind
    }

    /// Normalized application host, e.g. `https://eihome.online.etunexus.com`.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn authority(&self) -> &TicketAuthority {
        &self.authority
    }

    pub fn span(&self) -> &tracing::Span {
        &self.span
    }

    /// URL the service ticket is requested for and validated at.
    pub fn session_url(&self) -> String {
        format!("{}{}", self.base_url, self.descriptor.session_path)
    }

    /// Full URL of an API path (relative to the API base, may carry a query).
    pub fn api_url(&self, path: &str) -> String {
        join_path(&format!("{}{}", self.base_url, self.descriptor.api_base), path)
    }

    /// Resolve an absolute URL or a path relative to the application host.
    pub fn host_url(&self, url: &str) -> Result<String> {
        if url.starts_with("http://") || url.starts_with("https://") {
            url::Url::parse(url).map_err(|e| ClientError::InvalidUrl(format!("{url}: {e}")))?;
            Ok(url.to_string())
        } else if url.trim().is_empty() {
            Err(ClientError::InvalidUrl("download URL is empty".to_string()))
        } else {
            Ok(join_path(&self.base_url, url))
        }
    }

    /// Decode a response into a model; a shape mismatch is a protocol error.
    pub(crate) fn decode<T: DeserializeOwned>(&self, path: &str, value: Value) -> Result<T> {
        T::deserialize(&value).map_err(|e| ClientError::Protocol {
            url: self.api_url(path),
            message: format!("unexpected response shape: {e}"),
            body: value.to_string(),
        })
    }

    /// Check that a delete echoed the id it was asked to remove.
    pub(crate) fn echoed_id(&self, path: &str, echoed: &Value, expected: i64) -> Result<i64> {
        match id_from_value(echoed) {
            Some(id) if id == expected => Ok(id),
            _ => Err(ClientError::Protocol {
                url: self.api_url(path),
                message: format!("expected id {expected} to be echoed"),
                body: echoed.to_string(),
            }),
        }
    }

    pub(crate) fn session(&self) -> Result<&ApplicationSession> {
        self.session.as_ref().ok_or_else(|| ClientError::NotLoggedIn {
            app: self.descriptor.name.to_string(),
        })
    }
}
