//! Connection configuration types for Nexus clients.
//!
//! Responsibilities:
//! - Define per-application hosts and the ticket authority host.
//! - Define the main `Config` structure combining connection and credential.
//! - Provide serialization helpers for `Duration`.
//!
//! Does NOT handle:
//! - Configuration loading from files/env (see `loader` module).
//! - Actual network connections (see client crate).
//!
//! Invariants:
//! - Hosts are either bare host names (`https://` assumed) or absolute http(s) URLs.
//! - All duration fields are serialized as seconds (integers).

use crate::constants::{
    DEFAULT_AUTHORITY_HOST, DEFAULT_EI_HOST, DEFAULT_EMC_HOST, DEFAULT_ER_HOST,
    DEFAULT_TIMEOUT_SECS,
};
use crate::types::credential::CredentialConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Module for serializing Duration as seconds (integer).
mod duration_seconds {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        duration.as_secs().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

/// Hosts and transport settings for the Nexus services.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionConfig {
    /// Single-sign-on authority host
    pub authority_host: String,
    /// Management console (EMC2) host
    pub emc_host: String,
    /// Insight (EI3) host
    pub ei_host: String,
    /// Recommender (ER3) host
    pub er_host: String,
    /// Whether to skip TLS verification (for self-signed certificates)
    pub skip_verify: bool,
    /// Request timeout (serialized as seconds)
    #[serde(with = "duration_seconds")]
    pub timeout: Duration,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            authority_host: DEFAULT_AUTHORITY_HOST.to_string(),
            emc_host: DEFAULT_EMC_HOST.to_string(),
            ei_host: DEFAULT_EI_HOST.to_string(),
            er_host: DEFAULT_ER_HOST.to_string(),
            skip_verify: false,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Connection settings
    pub connection: ConnectionConfig,
    /// Authority credential
    pub credential: CredentialConfig,
}

impl Config {
    /// Create a config for the given credential with default production hosts.
    pub fn with_credential(credential: CredentialConfig) -> Self {
        Self {
            connection: ConnectionConfig::default(),
            credential,
        }
    }
}
