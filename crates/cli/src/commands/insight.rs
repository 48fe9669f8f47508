//! EI3 listing commands.

use anyhow::{Context, Result};
use nexus_client::{AppClient, InsightClient};

use super::print_json;

pub async fn bands(client: AppClient) -> Result<()> {
    let ei = InsightClient::from_client(client)?;
    let categories = ei
        .get_band_categories()
        .await
        .context("Failed to list band categories")?;
    print_json(&categories)
}
