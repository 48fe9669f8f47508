//! Shared test utilities for nexus-cli integration tests.
//!
//! Invariants / Assumptions:
//! - Every command is hermetic: no `.env`, no host `NEXUS_*` leakage.
//! - One wiremock server plays the authority and all three applications.

use assert_cmd::Command;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const ST: &str = "ST-456";

/// Returns a hermetic `nexus-cli` command with the `acme\bob` credential.
pub fn nexus_cmd() -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("nexus-cli");

    cmd.env("DOTENV_DISABLED", "1");

    cmd.env("NEXUS_GROUP", "acme")
        .env("NEXUS_USERNAME", "bob")
        .env("NEXUS_PASSWORD", "secret");

    cmd.env_remove("NEXUS_AUTHORITY_HOST")
        .env_remove("NEXUS_EMC_HOST")
        .env_remove("NEXUS_EI_HOST")
        .env_remove("NEXUS_ER_HOST")
        .env_remove("NEXUS_PROFILE")
        .env_remove("NEXUS_CONFIG_PATH")
        .env_remove("NEXUS_SKIP_VERIFY")
        .env_remove("NEXUS_TIMEOUT");

    cmd
}

/// A hermetic command whose authority and application hosts are `server`.
#[allow(dead_code)]
pub fn nexus_cmd_for(server: &MockServer) -> Command {
    let mut cmd = nexus_cmd();
    cmd.env("NEXUS_AUTHORITY_HOST", server.uri())
        .env("NEXUS_EMC_HOST", server.uri())
        .env("NEXUS_EI_HOST", server.uri())
        .env("NEXUS_ER_HOST", server.uri());
    cmd
}

/// Mount the TGT, ST and session validation endpoints for every application.
#[allow(dead_code)]
pub async fn mount_handshake(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/cas/v1/tickets"))
        .respond_with(
            ResponseTemplate::new(201)
                .insert_header("Location", format!("{}/cas/v1/tickets/TGT-123", server.uri())),
        )
        .mount(server)
        .await;
    Mock::given(method("POST"))
        .and(path("/cas/v1/tickets/TGT-123"))
        .respond_with(ResponseTemplate::new(200).set_body_string(ST))
        .mount(server)
        .await;

    for session_path in ["/shiro-cas", "/EI/V3/shiro-cas", "/ER/V3/shiro-cas"] {
        Mock::given(method("GET"))
            .and(path(session_path))
            .and(query_param("ticket", ST))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("Set-Cookie", "JSESSIONID=session-abc; Path=/"),
            )
            .mount(server)
            .await;
    }
}
