//! `login`: run the ticket handshake and report the sessions it opened.

use anyhow::Result;
use nexus_client::{AppKind, TicketAuthority};
use nexus_config::Config;
use serde_json::json;
use tracing::info;

use super::{logged_in_client, print_json};

const ALL_APPS: [AppKind; 3] = [AppKind::Emc, AppKind::Insight, AppKind::Recommender];

pub async fn run(config: &Config, authority: TicketAuthority, app: AppKind, all: bool) -> Result<()> {
    let kinds: Vec<AppKind> = if all { ALL_APPS.to_vec() } else { vec![app] };

    let mut sessions = Vec::with_capacity(kinds.len());
    for kind in kinds {
        let client = logged_in_client(config, authority.clone(), kind).await?;
        info!(app = client.name(), "session established");
        sessions.push(json!({
            "app": client.name(),
            "host": client.base_url(),
            "phase": format!("{:?}", client.phase()),
        }));
    }

    print_json(&json!({
        "principal": authority.credential().principal(),
        "sessions": sessions,
    }))
}
