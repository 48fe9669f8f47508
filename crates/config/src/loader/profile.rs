//! Profile file loading for configuration.
//!
//! Responsibilities:
//! - Resolve the profile file path (explicit, `NEXUS_CONFIG_PATH`, or platform default).
//! - Apply the selected profile's settings to a ConfigLoader instance.
//!
//! Does NOT handle:
//! - Environment variable parsing (see env.rs).
//! - Writing profiles (see persistence.rs).
//!
//! Invariants:
//! - Profile values only fill fields the loader has not set yet.
//! - Missing files and missing profiles are recorded for later error handling in build().

use std::time::Duration;

use super::builder::ConfigLoader;
use super::error::ConfigError;
use crate::persistence::{ProfileFile, default_config_path};
use crate::types::ProfileConfig;

/// Apply profile configuration from the profile file to the loader.
pub fn apply_profile(loader: &mut ConfigLoader) -> Result<(), ConfigError> {
    let profile_name = match loader.profile_name() {
        Some(name) => name.clone(),
        None => return Ok(()),
    };

    let config_path = match loader.config_path() {
        Some(path) => path.clone(),
        None => {
            default_config_path().map_err(|e| ConfigError::ConfigDirUnavailable(e.to_string()))?
        }
    };

    if !config_path.exists() {
        tracing::debug!(path = %config_path.display(), "profile file not found");
        loader.set_profile_missing(Some(profile_name));
        return Ok(());
    }

    let file = ProfileFile::load(&config_path)?;
    match file.profile(&profile_name) {
        Some(profile) => {
            tracing::debug!(profile = %profile_name, "applying profile");
            apply_profile_config(loader, profile);
        }
        None => loader.set_profile_missing(Some(profile_name)),
    }

    Ok(())
}

fn apply_profile_config(loader: &mut ConfigLoader, profile: &ProfileConfig) {
    if loader.authority_host().is_none() {
        loader.set_authority_host(profile.authority_host.clone());
    }
    if loader.emc_host().is_none() {
        loader.set_emc_host(profile.emc_host.clone());
    }
    if loader.ei_host().is_none() {
        loader.set_ei_host(profile.ei_host.clone());
    }
    if loader.er_host().is_none() {
        loader.set_er_host(profile.er_host.clone());
    }
    if loader.group().is_none() {
        loader.set_group(profile.group.clone());
    }
    if loader.username().is_none() {
        loader.set_username(profile.username.clone());
    }
    if !loader.has_password() {
        loader.set_password(profile.password.clone());
    }
    if loader.skip_verify().is_none() {
        loader.set_skip_verify(profile.skip_verify);
    }
    if loader.timeout().is_none() {
        loader.set_timeout(profile.timeout_seconds.map(Duration::from_secs));
    }
}
