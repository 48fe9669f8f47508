//! Command dispatch logic.
//!
//! Responsibilities:
//! - Route parsed CLI arguments to the command handlers.
//! - Build the shared ticket authority and the application client each command needs.
//!
//! Invariants:
//! - One `TicketAuthority` per run; every application session reuses its TGT.
//! - Payloads are parsed before any network call.
//! - `groups`/`users` always talk to EMC2 and `bands` to EI3, whatever `--app` says.

use anyhow::{Context, Result};
use nexus_client::{AppKind, TicketAuthority};
use nexus_config::Config;

use crate::args::{Cli, Commands};
use crate::commands::{self, logged_in_client, parse_payload};

pub(crate) async fn run_command(cli: Cli, config: Config) -> Result<()> {
    let authority =
        TicketAuthority::from_config(&config).context("Failed to set up ticket authority")?;
    let app = AppKind::from(cli.app);

    match cli.command {
        Commands::Login { all } => {
            commands::login::run(&config, authority, app, all).await?;
        }
        Commands::Get { path, query } => {
            let client = logged_in_client(&config, authority, app).await?;
            commands::request::get(&client, &path, query).await?;
        }
        Commands::Post {
            path,
            data,
            form,
            multipart,
        } => {
            let payload = parse_payload(&data)?;
            let client = logged_in_client(&config, authority, app).await?;
            commands::request::post(&client, &path, payload, form, multipart).await?;
        }
        Commands::Upload { path, file, data } => {
            let payload = data.as_deref().map(parse_payload).transpose()?;
            let client = logged_in_client(&config, authority, app).await?;
            commands::request::upload(&client, &path, &file, payload).await?;
        }
        Commands::Delete { path } => {
            let client = logged_in_client(&config, authority, app).await?;
            commands::request::delete(&client, &path).await?;
        }
        Commands::Download { url, output } => {
            let client = logged_in_client(&config, authority, app).await?;
            commands::request::download(&client, &url, output).await?;
        }
        Commands::Groups => {
            let client = logged_in_client(&config, authority, AppKind::Emc).await?;
            commands::emc::groups(client).await?;
        }
        Commands::Users { group_id } => {
            let client = logged_in_client(&config, authority, AppKind::Emc).await?;
            commands::emc::users(client, group_id).await?;
        }
        Commands::Bands => {
            let client = logged_in_client(&config, authority, AppKind::Insight).await?;
            commands::insight::bands(client).await?;
        }
    }

    Ok(())
}
