//! Configuration type definitions for Nexus clients.
//!
//! Responsibilities:
//! - Define connection settings (hosts, TLS verification, timeout).
//! - Define the credential triple used against the ticket authority.
//! - Define the partial `ProfileConfig` persisted in the profile file.
//!
//! Does NOT handle:
//! - Configuration loading from files or environment variables (see `loader` module).
//! - Actual network connections or ticket exchange (see client crate).
//!
//! Invariants:
//! - Passwords use `secrecy::SecretString` to prevent accidental logging.
//! - Serialization helpers (`secret_string`, `duration_seconds`) are private modules.

mod connection;
mod credential;
mod profile;

pub use connection::{Config, ConnectionConfig};
pub use credential::CredentialConfig;
pub use profile::ProfileConfig;
