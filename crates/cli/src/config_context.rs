//! Configuration assembly for command execution.
//!
//! Responsibilities:
//! - Merge profile file, environment and CLI flags into one `Config`.
//!
//! Does NOT handle:
//! - `.env` loading (done in `main()` before parsing).
//!
//! Invariants:
//! - Precedence, lowest to highest: defaults, profile, environment, flags.
//! - Blank `--config-path` values are ignored so the environment can apply.

use std::time::Duration;

use anyhow::{Context, Result};
use nexus_config::{Config, ConfigLoader};

use crate::args::Cli;

/// Build the configuration the commands run with.
pub(crate) fn load_config(cli: &Cli) -> Result<Config> {
    let mut loader = ConfigLoader::new();

    if let Some(ref path) = cli.config_path
        && !path.to_string_lossy().trim().is_empty()
    {
        loader = loader.with_config_path(path.clone());
    }
    if let Some(ref profile) = cli.profile {
        loader = loader.with_profile_name(profile.clone());
    }

    loader = loader
        .from_env()
        .context("Failed to load configuration from environment")?;

    if loader.profile_name().is_some() {
        loader = loader
            .from_profile()
            .context("Failed to load configuration from profile")?;
    }

    if let Some(ref host) = cli.authority_host {
        loader = loader.with_authority_host(host.clone());
    }
    if let Some(ref host) = cli.emc_host {
        loader = loader.with_emc_host(host.clone());
    }
    if let Some(ref host) = cli.ei_host {
        loader = loader.with_ei_host(host.clone());
    }
    if let Some(ref host) = cli.er_host {
        loader = loader.with_er_host(host.clone());
    }
    if let Some(ref group) = cli.group {
        loader = loader.with_group(group.clone());
    }
    if let Some(ref username) = cli.username {
        loader = loader.with_username(username.clone());
    }
    if let Some(ref password) = cli.password {
        loader = loader.with_password(password.clone());
    }
    if let Some(secs) = cli.timeout {
        loader = loader.with_timeout(Duration::from_secs(secs));
    }
    if cli.skip_verify {
        loader = loader.with_skip_verify(true);
    }

    loader.build().context("Failed to build configuration")
}
