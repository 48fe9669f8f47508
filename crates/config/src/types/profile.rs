//! Profile configuration types for Nexus clients.
//!
//! Responsibilities:
//! - Define `ProfileConfig` for storing named connection profiles.
//! - Support partial configuration (all fields optional) so environment
//!   variables and flags can fill the gaps.
//!
//! Does NOT handle:
//! - Profile loading or merging (see `loader` module).
//!
//! Invariants:
//! - All fields are optional to allow partial profile definitions.
//! - ProfileConfig uses `#[serde(default)]` so older files keep parsing.

use crate::types::credential::secret_string;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};

/// Profile configuration for storing named connection profiles.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileConfig {
    pub authority_host: Option<String>,
    pub emc_host: Option<String>,
    pub ei_host: Option<String>,
    pub er_host: Option<String>,
    pub group: Option<String>,
    pub username: Option<String>,
    #[serde(
        with = "secret_string::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub password: Option<SecretString>,
    /// Whether to skip TLS verification
    pub skip_verify: Option<bool>,
    /// Request timeout in seconds
    pub timeout_seconds: Option<u64>,
}
