//! Configuration precedence as seen from the command line.

mod common;

use common::{mount_handshake, nexus_cmd};
use predicates::prelude::*;
use wiremock::MockServer;

fn write_profiles(dir: &std::path::Path, authority_host: &str) -> std::path::PathBuf {
    let path = dir.join("config.json");
    let body = serde_json::json!({
        "profiles": {
            "staging": {
                "authority_host": authority_host,
                "emc_host": authority_host,
                "group": "acme",
                "username": "bob",
                "password": "secret"
            }
        }
    });
    std::fs::write(&path, body.to_string()).unwrap();
    path
}

#[tokio::test]
async fn test_profile_supplies_hosts_and_credential() {
    let server = MockServer::start().await;
    mount_handshake(&server).await;
    let dir = tempfile::tempdir().unwrap();
    let config = write_profiles(dir.path(), &server.uri());

    nexus_cmd()
        .env_remove("NEXUS_GROUP")
        .env_remove("NEXUS_USERNAME")
        .env_remove("NEXUS_PASSWORD")
        .arg("--config-path")
        .arg(&config)
        .args(["--profile", "staging", "login"])
        .assert()
        .success()
        .stdout(predicate::str::contains("EMC2"));
}

#[test]
fn test_unknown_profile_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_profiles(dir.path(), "http://127.0.0.1:1");

    nexus_cmd()
        .env_remove("NEXUS_GROUP")
        .env_remove("NEXUS_USERNAME")
        .env_remove("NEXUS_PASSWORD")
        .arg("--config-path")
        .arg(&config)
        .args(["--profile", "missing", "login"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("missing"));
}

#[test]
fn test_invalid_timeout_is_rejected() {
    nexus_cmd()
        .args(["--timeout", "0", "login"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("timeout"));
}
