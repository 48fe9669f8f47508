//! CLI command implementations.

pub mod emc;
pub mod insight;
pub mod login;
pub mod request;

use anyhow::{Context, Result};
use nexus_client::{AppClient, AppKind, ClientError, TicketAuthority};
use nexus_config::Config;
use serde_json::Value;

/// Build the application client for `kind` and open its session.
pub(crate) async fn logged_in_client(
    config: &Config,
    authority: TicketAuthority,
    kind: AppKind,
) -> Result<AppClient> {
    let mut client = AppClient::builder(kind, authority)
        .from_config(config)
        .build()
        .with_context(|| format!("Failed to set up {} client", kind.descriptor().name))?;
    client
        .login()
        .await
        .with_context(|| format!("Failed to log in to {}", client.name()))?;
    Ok(client)
}

/// Parse a `--data` argument; bad JSON is a validation failure.
pub(crate) fn parse_payload(raw: &str) -> Result<Value> {
    serde_json::from_str(raw)
        .map_err(|e| ClientError::InvalidRequest(format!("--data is not valid JSON: {e}")))
        .context("Failed to read payload")
}

/// Write a JSON value to stdout, pretty printed.
pub(crate) fn print_json(value: &impl serde::Serialize) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("Failed to render output")?;
    println!("{rendered}");
    Ok(())
}
