//! Profile file persistence.
//!
//! Responsibilities:
//! - Locate the profile file under the platform configuration directory.
//! - Read and write the `{"profiles": {...}}` JSON document.
//!
//! Does NOT handle:
//! - Merging profile values with environment variables (see `loader`).
//!
//! Invariants:
//! - Profile names are unique within a file (map keys).
//! - Writes create the parent directory when missing.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{CONFIG_DIR_NAME, CONFIG_FILE_NAME};
use crate::types::ProfileConfig;

/// Errors raised while reading or writing the profile file.
#[derive(Debug, Error)]
pub enum ConfigFileError {
    #[error("Failed to read config file at {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Failed to write config file at {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Returns the default path to the profile file.
///
/// - Linux: `~/.config/nexus/config.json`
/// - macOS: `~/Library/Application Support/nexus/config.json`
/// - Windows: `%AppData%\nexus\config\config.json`
pub fn default_config_path() -> Result<PathBuf, anyhow::Error> {
    let proj_dirs = directories::ProjectDirs::from("", "", CONFIG_DIR_NAME)
        .context("Failed to determine project directories")?;

    Ok(proj_dirs.config_dir().join(CONFIG_FILE_NAME))
}

/// On-disk collection of named profiles.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileFile {
    #[serde(default)]
    pub profiles: BTreeMap<String, ProfileConfig>,
}

impl ProfileFile {
    /// Read and parse the profile file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigFileError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigFileError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;

        serde_json::from_str(&content).map_err(|e| ConfigFileError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Serialize the profiles to `path` as pretty JSON.
    pub fn save(&self, path: &Path) -> Result<(), ConfigFileError> {
        let write_err = |source| ConfigFileError::Write {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }

        let content = serde_json::to_string_pretty(self).map_err(|e| ConfigFileError::Parse {
            path: path.to_path_buf(),
            source: e,
        })?;
        std::fs::write(path, content).map_err(write_err)
    }

    pub fn profile(&self, name: &str) -> Option<&ProfileConfig> {
        self.profiles.get(name)
    }
}
