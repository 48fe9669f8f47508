//! Configuration loader builder implementation.
//!
//! Responsibilities:
//! - Provide a builder-pattern `ConfigLoader` for hierarchical configuration merging.
//! - Support loading from environment variables, profile files, and direct builder methods.
//! - Validate and build the final `Config`.
//!
//! Does NOT handle:
//! - Direct environment variable parsing logic (delegated to env.rs).
//! - Profile file loading logic (delegated to profile.rs).
//!
//! Invariants / Assumptions:
//! - Profile values only fill fields that are still unset, so a profile never
//!   overrides environment variables or builder calls regardless of call order.
//! - `load_dotenv()` must be called explicitly to enable `.env` file loading.
//! - The `DOTENV_DISABLED` variable is checked before `dotenvy::dotenv()` is called.

use secrecy::SecretString;
use std::path::PathBuf;
use std::time::Duration;

use super::env::apply_env;
use super::error::ConfigError;
use super::profile::apply_profile;
use crate::constants::{
    DEFAULT_AUTHORITY_HOST, DEFAULT_EI_HOST, DEFAULT_EMC_HOST, DEFAULT_ER_HOST,
    DEFAULT_TIMEOUT_SECS, MAX_TIMEOUT_SECS,
};
use crate::types::{Config, ConnectionConfig, CredentialConfig};

/// Configuration loader that builds config from environment variables and profiles.
#[derive(Default)]
pub struct ConfigLoader {
    authority_host: Option<String>,
    emc_host: Option<String>,
    ei_host: Option<String>,
    er_host: Option<String>,
    group: Option<String>,
    username: Option<String>,
    password: Option<SecretString>,
    skip_verify: Option<bool>,
    timeout: Option<Duration>,
    profile_name: Option<String>,
    profile_missing: Option<String>,
    config_path: Option<PathBuf>,
}

impl ConfigLoader {
    /// Create a new configuration loader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if dotenv loading is disabled via environment variable.
    fn dotenv_disabled() -> bool {
        matches!(
            std::env::var("DOTENV_DISABLED").ok().as_deref(),
            Some("true") | Some("1")
        )
    }

    /// Load environment variables from .env file if present.
    ///
    /// If `DOTENV_DISABLED` is set to "true" or "1", the .env file is not
    /// loaded (useful for testing). Missing `.env` files are silently ignored.
    ///
    /// # Errors
    ///
    /// - `ConfigError::DotenvParse` if the file has invalid syntax
    /// - `ConfigError::DotenvIo` if it exists but cannot be read
    ///
    /// Error messages never include raw .env line contents.
    pub fn load_dotenv(self) -> Result<Self, ConfigError> {
        if Self::dotenv_disabled() {
            return Ok(self);
        }

        match dotenvy::dotenv() {
            Ok(_) => Ok(self),
            Err(e) if Self::is_not_found(&e) => Ok(self),
            Err(dotenvy::Error::LineParse(_, idx)) => {
                Err(ConfigError::DotenvParse { error_index: idx })
            }
            Err(dotenvy::Error::Io(io_err)) => Err(ConfigError::DotenvIo {
                kind: io_err.kind(),
            }),
            Err(_) => Err(ConfigError::DotenvUnknown),
        }
    }

    fn is_not_found(err: &dotenvy::Error) -> bool {
        matches!(
            err,
            dotenvy::Error::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound
        )
    }

    /// Set the active profile name to load from the config file.
    pub fn with_profile_name(mut self, name: String) -> Self {
        self.profile_name = Some(name);
        self
    }

    /// Override the config file path.
    pub fn with_config_path(mut self, path: PathBuf) -> Self {
        self.config_path = Some(path);
        self
    }

    /// Fill unset values from the selected profile.
    ///
    /// A profile that does not exist is recorded and reported by `build()`
    /// unless the remaining sources supply a complete credential.
    pub fn from_profile(mut self) -> Result<Self, ConfigError> {
        apply_profile(&mut self)?;
        Ok(self)
    }

    /// Read configuration from `NEXUS_*` environment variables.
    pub fn from_env(mut self) -> Result<Self, ConfigError> {
        apply_env(&mut self)?;
        Ok(self)
    }

    pub fn with_authority_host(mut self, host: String) -> Self {
        self.authority_host = Some(host);
        self
    }

    pub fn with_emc_host(mut self, host: String) -> Self {
        self.emc_host = Some(host);
        self
    }

    pub fn with_ei_host(mut self, host: String) -> Self {
        self.ei_host = Some(host);
        self
    }

    pub fn with_er_host(mut self, host: String) -> Self {
        self.er_host = Some(host);
        self
    }

    pub fn with_group(mut self, group: String) -> Self {
        self.group = Some(group);
        self
    }

    pub fn with_username(mut self, username: String) -> Self {
        self.username = Some(username);
        self
    }

    pub fn with_password(mut self, password: String) -> Self {
        self.password = Some(SecretString::new(password.into()));
        self
    }

    /// Set whether to skip TLS verification.
    pub fn with_skip_verify(mut self, skip: bool) -> Self {
        self.skip_verify = Some(skip);
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Active profile name, if one was selected by builder call or `NEXUS_PROFILE`.
    pub fn profile_name(&self) -> Option<&String> {
        self.profile_name.as_ref()
    }

    fn has_complete_credential(&self) -> bool {
        self.group.is_some() && self.username.is_some() && self.password.is_some()
    }

    /// Build the final configuration.
    pub fn build(self) -> Result<Config, ConfigError> {
        if let Some(ref profile_name) = self.profile_missing
            && !self.has_complete_credential()
        {
            return Err(ConfigError::ProfileNotFound(profile_name.clone()));
        }

        let connection = ConnectionConfig {
            authority_host: validate_host(
                "authority_host",
                self.authority_host.as_deref(),
                DEFAULT_AUTHORITY_HOST,
            )?,
            emc_host: validate_host("emc_host", self.emc_host.as_deref(), DEFAULT_EMC_HOST)?,
            ei_host: validate_host("ei_host", self.ei_host.as_deref(), DEFAULT_EI_HOST)?,
            er_host: validate_host("er_host", self.er_host.as_deref(), DEFAULT_ER_HOST)?,
            skip_verify: self.skip_verify.unwrap_or(false),
            timeout: self
                .timeout
                .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
        };

        Self::validate_timeout(connection.timeout)?;

        let credential = CredentialConfig {
            group: non_blank(self.group).ok_or(ConfigError::MissingCredential("group"))?,
            username: non_blank(self.username).ok_or(ConfigError::MissingCredential("username"))?,
            password: self
                .password
                .ok_or(ConfigError::MissingCredential("password"))?,
        };

        Ok(Config {
            connection,
            credential,
        })
    }

    /// Timeout must be greater than 0 and not exceed `MAX_TIMEOUT_SECS`.
    fn validate_timeout(timeout: Duration) -> Result<(), ConfigError> {
        if timeout.is_zero() {
            return Err(ConfigError::InvalidTimeout {
                message: "timeout must be greater than 0 seconds".to_string(),
            });
        }

        if timeout.as_secs() > MAX_TIMEOUT_SECS {
            return Err(ConfigError::InvalidTimeout {
                message: format!(
                    "timeout exceeds maximum allowed value of {} seconds",
                    MAX_TIMEOUT_SECS
                ),
            });
        }

        Ok(())
    }

    // Internal accessor methods for use by other loader modules

    pub(crate) fn config_path(&self) -> Option<&PathBuf> {
        self.config_path.as_ref()
    }

    pub(crate) fn set_profile_missing(&mut self, name: Option<String>) {
        self.profile_missing = name;
    }

    pub(crate) fn set_profile_name(&mut self, name: Option<String>) {
        self.profile_name = name;
    }

    pub(crate) fn set_config_path(&mut self, path: Option<PathBuf>) {
        self.config_path = path;
    }

    pub(crate) fn set_authority_host(&mut self, host: Option<String>) {
        self.authority_host = host;
    }

    pub(crate) fn set_emc_host(&mut self, host: Option<String>) {
        self.emc_host = host;
    }

    pub(crate) fn set_ei_host(&mut self, host: Option<String>) {
        self.ei_host = host;
    }

    pub(crate) fn set_er_host(&mut self, host: Option<String>) {
        self.er_host = host;
    }

    pub(crate) fn set_group(&mut self, group: Option<String>) {
        self.group = group;
    }

    pub(crate) fn set_username(&mut self, username: Option<String>) {
        self.username = username;
    }

    pub(crate) fn set_password(&mut self, password: Option<SecretString>) {
        self.password = password;
    }

    pub(crate) fn set_skip_verify(&mut self, skip: Option<bool>) {
        self.skip_verify = skip;
    }

    pub(crate) fn set_timeout(&mut self, timeout: Option<Duration>) {
        self.timeout = timeout;
    }

    pub(crate) fn authority_host(&self) -> Option<&String> {
        self.authority_host.as_ref()
    }

    pub(crate) fn emc_host(&self) -> Option<&String> {
        self.emc_host.as_ref()
    }

    pub(crate) fn ei_host(&self) -> Option<&String> {
        self.ei_host.as_ref()
    }

    pub(crate) fn er_host(&self) -> Option<&String> {
        self.er_host.as_ref()
    }

    pub(crate) fn group(&self) -> Option<&String> {
        self.group.as_ref()
    }

    pub(crate) fn username(&self) -> Option<&String> {
        self.username.as_ref()
    }

    pub(crate) fn has_password(&self) -> bool {
        self.password.is_some()
    }

    pub(crate) fn skip_verify(&self) -> Option<bool> {
        self.skip_verify
    }

    pub(crate) fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Validates a host setting and normalizes it.
///
/// Accepted forms:
/// - a bare host, optionally with a port (`emc.example.com`, `localhost:8443`)
/// - an absolute http(s) URL; trailing slashes are stripped
///
/// Unset or blank values fall back to `default`.
fn validate_host(var: &str, raw: Option<&str>, default: &str) -> Result<String, ConfigError> {
    let trimmed = match raw.map(str::trim) {
        Some(value) if !value.is_empty() => value,
        _ => return Ok(default.to_string()),
    };

    let invalid = |message: String| ConfigError::InvalidValue {
        var: var.to_string(),
        message,
    };

    if trimmed.contains("://") {
        let parsed = url::Url::parse(trimmed)
            .map_err(|e| invalid(format!("must be a host or an absolute http(s) URL: {e}")))?;

        let scheme = parsed.scheme();
        if scheme != "http" && scheme != "https" {
            return Err(invalid(format!("scheme must be http or https, got: {scheme}")));
        }
        if parsed.host_str().is_none() {
            return Err(invalid("host is required".to_string()));
        }

        return Ok(trimmed.trim_end_matches('/').to_string());
    }

    if trimmed.contains('/') || trimmed.contains(char::is_whitespace) {
        return Err(invalid(format!(
            "'{trimmed}' is not a host name; use a full URL to include a path"
        )));
    }

    url::Url::parse(&format!("https://{trimmed}"))
        .map_err(|e| invalid(format!("'{trimmed}' is not a valid host: {e}")))?;

    Ok(trimmed.to_string())
}
