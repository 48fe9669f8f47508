//! Configuration management for Nexus clients.
//!
//! This crate provides types and loaders for the connection and credential
//! settings shared by the Nexus client library and command-line tool, merged
//! from defaults, a JSON profile file, environment variables and explicit
//! overrides.

pub mod constants;
mod loader;
pub mod persistence;
pub mod types;

pub use loader::{ConfigError, ConfigLoader, env_var_or_none};
pub use persistence::{ConfigFileError, ProfileFile, default_config_path};
pub use types::{Config, ConnectionConfig, CredentialConfig, ProfileConfig};
