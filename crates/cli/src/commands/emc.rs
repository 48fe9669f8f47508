//! EMC2 listing commands.

use anyhow::{Context, Result};
use nexus_client::{AppClient, EmcClient};

use super::print_json;

pub async fn groups(client: AppClient) -> Result<()> {
    let emc = EmcClient::from_client(client)?;
    let groups = emc.get_groups().await.context("Failed to list groups")?;
    print_json(&groups)
}

pub async fn users(client: AppClient, group_id: i64) -> Result<()> {
    let emc = EmcClient::from_client(client)?;
    let users = emc
        .get_users(group_id)
        .await
        .with_context(|| format!("Failed to list users of group {group_id}"))?;
    print_json(&users)
}
