//! Environment variable parsing for configuration.
//!
//! Responsibilities:
//! - Read and parse `NEXUS_*` environment variables.
//! - Apply environment variable values to a ConfigLoader instance.
//! - Provide helper functions for reading env vars with empty/whitespace filtering.
//!
//! Does NOT handle:
//! - Loading from profile files (see profile.rs).
//! - .env file loading (handled by ConfigLoader::load_dotenv).
//!
//! Invariants:
//! - Empty or whitespace-only environment variables are treated as unset.
//! - Returned values are trimmed (leading/trailing whitespace removed).
//! - Invalid numeric or boolean values return ConfigError::InvalidValue.
//! - `NEXUS_PROFILE` and `NEXUS_CONFIG_PATH` never replace values set by builder calls.

use secrecy::SecretString;
use std::time::Duration;

use super::builder::ConfigLoader;
use super::error::ConfigError;

/// Read an environment variable, returning None if unset, empty, or whitespace-only.
/// Returns the trimmed value (leading/trailing whitespace removed) if present.
pub fn env_var_or_none(key: &str) -> Option<String> {
    std::env::var(key).ok().and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == s.len() {
            Some(s)
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Apply environment variable configuration to the loader.
pub fn apply_env(loader: &mut ConfigLoader) -> Result<(), ConfigError> {
    if let Some(host) = env_var_or_none("NEXUS_AUTHORITY_HOST") {
        loader.set_authority_host(Some(host));
    }
    if let Some(host) = env_var_or_none("NEXUS_EMC_HOST") {
        loader.set_emc_host(Some(host));
    }
    if let Some(host) = env_var_or_none("NEXUS_EI_HOST") {
        loader.set_ei_host(Some(host));
    }
    if let Some(host) = env_var_or_none("NEXUS_ER_HOST") {
        loader.set_er_host(Some(host));
    }
    if let Some(group) = env_var_or_none("NEXUS_GROUP") {
        loader.set_group(Some(group));
    }
    if let Some(username) = env_var_or_none("NEXUS_USERNAME") {
        loader.set_username(Some(username));
    }
    if let Some(password) = env_var_or_none("NEXUS_PASSWORD") {
        loader.set_password(Some(SecretString::new(password.into())));
    }
    if let Some(skip) = env_var_or_none("NEXUS_SKIP_VERIFY") {
        loader.set_skip_verify(Some(skip.parse().map_err(|_| {
            ConfigError::InvalidValue {
                var: "NEXUS_SKIP_VERIFY".to_string(),
                message: "must be true or false".to_string(),
            }
        })?));
    }
    if let Some(timeout) = env_var_or_none("NEXUS_TIMEOUT") {
        let secs: u64 = timeout.parse().map_err(|_| ConfigError::InvalidValue {
            var: "NEXUS_TIMEOUT".to_string(),
            message: "must be a number of seconds".to_string(),
        })?;
        loader.set_timeout(Some(Duration::from_secs(secs)));
    }

    if loader.config_path().is_none()
        && let Some(config_path) = env_var_or_none("NEXUS_CONFIG_PATH")
    {
        loader.set_config_path(Some(std::path::PathBuf::from(config_path)));
    }
    if loader.profile_name().is_none()
        && let Some(profile) = env_var_or_none("NEXUS_PROFILE")
    {
        loader.set_profile_name(Some(profile));
    }

    Ok(())
}
