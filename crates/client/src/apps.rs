//! Fixed descriptors of the Nexus applications and host normalization.
//!
//! Responsibilities:
//! - Describe where each application lives: default host, API base path,
//!   session-validation path and optional impersonation path.
//! - Turn a configured host (bare host or full URL) into a base URL.
//!
//! Invariants:
//! - Paths start with `/` and have no trailing slash.
//! - Normalized base URLs have a scheme and no trailing slash.

use nexus_config::ConnectionConfig;
use nexus_config::constants::{DEFAULT_EI_HOST, DEFAULT_EMC_HOST, DEFAULT_ER_HOST};

use crate::error::{ClientError, Result};

/// The applications reachable through the ticket authority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AppKind {
    /// Management console (EMC2).
    Emc,
    /// Insight / segmentation (EI3).
    Insight,
    /// Recommendation engine (ER3).
    Recommender,
}

impl AppKind {
    pub fn descriptor(self) -> &'static AppDescriptor {
        match self {
            Self::Emc => &EMC2,
            Self::Insight => &EI3,
            Self::Recommender => &ER3,
        }
    }

    /// Host configured for this application.
    pub fn configured_host(self, connection: &ConnectionConfig) -> &str {
        match self {
            Self::Emc => &connection.emc_host,
            Self::Insight => &connection.ei_host,
            Self::Recommender => &connection.er_host,
        }
    }
}

/// Static description of one application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppDescriptor {
    pub kind: AppKind,
    /// Short name used in logs and errors.
    pub name: &'static str,
    pub default_host: &'static str,
    pub api_base: &'static str,
    /// Path validated with `?ticket=<ST>` to open the cookie session.
    pub session_path: &'static str,
    /// Path under `api_base` accepting "su" requests, when supported.
    pub impersonation_path: Option<&'static str>,
}

pub const EMC2: AppDescriptor = AppDescriptor {
    kind: AppKind::Emc,
    name: "EMC2",
    default_host: DEFAULT_EMC_HOST,
    api_base: "/commsrv/v1",
    session_path: "/shiro-cas",
    impersonation_path: None,
};

pub const EI3: AppDescriptor = AppDescriptor {
    kind: AppKind::Insight,
    name: "EI3",
    default_host: DEFAULT_EI_HOST,
    api_base: "/EI/V3/service/v1",
    session_path: "/EI/V3/shiro-cas",
    impersonation_path: Some("/suauth"),
};

pub const ER3: AppDescriptor = AppDescriptor {
    kind: AppKind::Recommender,
    name: "ER3",
    default_host: DEFAULT_ER_HOST,
    api_base: "/ER/V3/recsrv/v1",
    session_path: "/ER/V3/shiro-cas",
    impersonation_path: None,
};

/// Normalize a host setting into a base URL.
///
/// - `"emc.example.com"` -> `"https://emc.example.com"`
/// - `"http://127.0.0.1:8080/"` -> `"http://127.0.0.1:8080"`
pub fn normalize_host(raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ClientError::InvalidUrl("host is empty".to_string()));
    }

    let base = if trimmed.contains("://") {
        trimmed.trim_end_matches('/').to_string()
    } else {
        format!("https://{}", trimmed.trim_end_matches('/'))
    };

    let parsed =
        url::Url::parse(&base).map_err(|e| ClientError::InvalidUrl(format!("{base}: {e}")))?;
    if parsed.host_str().is_none() {
        return Err(ClientError::InvalidUrl(format!("{base}: missing host")));
    }

    Ok(base)
}

/// Join a path onto a base URL, inserting the separating slash if needed.
pub(crate) fn join_path(base: &str, path: &str) -> String {
    if path.is_empty() || path.starts_with('/') || path.starts_with('?') {
        format!("{base}{path}")
    } else {
        format!("{base}/{path}")
    }
}
