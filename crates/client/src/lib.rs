//! Nexus SaaS client.
//!
//! This crate authenticates against the Nexus ticket authority (CAS REST
//! protocol), opens cookie sessions with the Nexus applications (EMC2, EI3,
//! ER3) and issues authorized API calls through them.
//!
//! ```rust,ignore
//! use nexus_client::{Credential, InsightClient, TicketAuthority};
//!
//! let authority = TicketAuthority::new(Credential::new("acme", "bob", "secret"))?;
//! let mut insight = InsightClient::new(authority.clone())?;
//! insight.login().await?;
//! let categories = insight.get_band_categories().await?;
//! ```

pub mod apps;
pub mod auth;
pub mod client;
pub mod endpoints;
pub mod error;
pub mod models;
mod serde_helpers;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

pub use apps::{AppDescriptor, AppKind};
pub use auth::{Credential, ServiceTicket, TicketAuthority, TicketGrantingTicket};
pub use client::builder::AppClientBuilder;
pub use client::{
    ApiRequest, AppClient, ApplicationSession, EmcClient, Impersonation, InsightClient,
    PayloadEncoding, RecommenderClient, SessionPhase,
};
pub use endpoints::FileAttachment;
pub use error::{ClientError, Result};
