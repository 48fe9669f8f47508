//! Tests for the configuration loader builder.
//!
//! Invariants:
//! - Tests use `serial_test` to prevent environment variable pollution.
//! - Tests use `env_lock()` for additional synchronization.
//! - Temporary directories are cleaned up automatically via `tempfile`.

use std::sync::Mutex;


/// Returns the global test lock for environment variable isolation.
pub fn env_lock() -> &'static Mutex<()> {
    crate::test_util::global_test_lock()
}

/// Every `NEXUS_*` variable cleared, so ambient settings cannot leak into a test.
pub fn cleared_env() -> Vec<(&'static str, Option<&'static str>)> {
    [
        "NEXUS_AUTHORITY_HOST",
        "NEXUS_EMC_HOST",
        "NEXUS_EI_HOST",
        "NEXUS_ER_HOST",
        "NEXUS_GROUP",
        "NEXUS_USERNAME",
        "NEXUS_PASSWORD",
        "NEXUS_SKIP_VERIFY",
        "NEXUS_TIMEOUT",
        "NEXUS_PROFILE",
        "NEXUS_CONFIG_PATH",
    ]
    .into_iter()
    .map(|k| (k, None))
    .collect()
}
