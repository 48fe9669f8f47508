//! Centralized constants for the Nexus client workspace.
//!
//! This module contains default values used across crates to avoid
//! magic number duplication and improve maintainability.

// =============================================================================
// Hosts
// =============================================================================

/// Default single-sign-on authority host.
pub const DEFAULT_AUTHORITY_HOST: &str = "emc.online.etunexus.com";

/// Default management console (EMC2) host.
pub const DEFAULT_EMC_HOST: &str = "emc.online.etunexus.com";

/// Default insight application (EI3) host.
pub const DEFAULT_EI_HOST: &str = "eihome.online.etunexus.com";

/// Default recommender application (ER3) host.
pub const DEFAULT_ER_HOST: &str = "erhome.online.etunexus.com";

// =============================================================================
// Connection & Timeout Defaults
// =============================================================================

/// Default HTTP request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Maximum allowed request timeout in seconds (1 hour).
pub const MAX_TIMEOUT_SECS: u64 = 3600;

/// Default maximum number of HTTP redirects to follow.
///
/// Session validation usually answers with a redirect chain that sets the
/// application cookie on the way.
pub const DEFAULT_MAX_REDIRECTS: usize = 10;

// =============================================================================
// Files
// =============================================================================

/// Directory name used under the platform config directory.
pub const CONFIG_DIR_NAME: &str = "nexus";

/// File name of the profile store.
pub const CONFIG_FILE_NAME: &str = "config.json";
