//! CLI argument definitions and parsing.
//!
//! Responsibilities:
//! - Define the CLI structure using clap derive macros.
//! - Mirror the `NEXUS_*` environment variables as global flags.
//!
//! Non-responsibilities:
//! - Does not execute commands (see `dispatch` module).
//! - Does not merge configuration sources (see `config_context` module).

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use nexus_client::AppKind;

#[derive(Parser)]
#[command(name = "nexus-cli")]
#[command(about = "Nexus CLI - Call Nexus SaaS applications from the command line", long_about = None)]
#[command(version)]
#[command(
    after_help = "Examples:\n  nexus-cli -g acme -u bob login --all\n  nexus-cli --app ei bands\n  nexus-cli get /system/version\n  nexus-cli --app ei post /bandcategory --data '{\"name\":\"VIP\"}' --form\n  nexus-cli --profile prod users --group-id 3\n"
)]
pub struct Cli {
    /// Single-sign-on authority host (e.g., emc.online.etunexus.com)
    #[arg(long, global = true, env = "NEXUS_AUTHORITY_HOST")]
    pub authority_host: Option<String>,

    /// EMC2 host
    #[arg(long, global = true, env = "NEXUS_EMC_HOST")]
    pub emc_host: Option<String>,

    /// EI3 host
    #[arg(long, global = true, env = "NEXUS_EI_HOST")]
    pub ei_host: Option<String>,

    /// ER3 host
    #[arg(long, global = true, env = "NEXUS_ER_HOST")]
    pub er_host: Option<String>,

    /// Account group
    #[arg(short, long, global = true, env = "NEXUS_GROUP")]
    pub group: Option<String>,

    /// Account user name
    #[arg(short, long, global = true, env = "NEXUS_USERNAME")]
    pub username: Option<String>,

    /// Account password
    #[arg(short, long, global = true, env = "NEXUS_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true, env = "NEXUS_TIMEOUT")]
    pub timeout: Option<u64>,

    /// Skip TLS certificate verification (https hosts only)
    #[arg(long, global = true, env = "NEXUS_SKIP_VERIFY")]
    pub skip_verify: bool,

    /// Profile name to load from the config file
    #[arg(long, global = true, env = "NEXUS_PROFILE")]
    pub profile: Option<String>,

    /// Path to a custom configuration file (overrides default location)
    #[arg(long, global = true, env = "NEXUS_CONFIG_PATH", value_name = "FILE")]
    pub config_path: Option<PathBuf>,

    /// Application the request goes to
    #[arg(long, global = true, value_enum, default_value_t = AppArg::Emc)]
    pub app: AppArg,

    #[command(subcommand)]
    pub command: Commands,
}

/// Application selector accepted by `--app`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AppArg {
    Emc,
    Ei,
    Er,
}

impl From<AppArg> for AppKind {
    fn from(app: AppArg) -> Self {
        match app {
            AppArg::Emc => AppKind::Emc,
            AppArg::Ei => AppKind::Insight,
            AppArg::Er => AppKind::Recommender,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Open an application session and report it
    Login {
        /// Log in to EMC2, EI3 and ER3 with one ticket granting ticket
        #[arg(long)]
        all: bool,
    },

    /// GET a path under the application's API base
    Get {
        /// API path (e.g., /group)
        path: String,

        /// Query parameter as key=value (repeatable)
        #[arg(short, long = "query", value_name = "KEY=VALUE", value_parser = parse_key_value)]
        query: Vec<(String, String)>,
    },

    /// POST a JSON payload to a path under the application's API base
    Post {
        /// API path
        path: String,

        /// JSON payload
        #[arg(short, long)]
        data: String,

        /// Send the payload URL-encoded instead of as JSON
        #[arg(long, conflicts_with = "multipart")]
        form: bool,

        /// Send the payload as multipart fields
        #[arg(long)]
        multipart: bool,
    },

    /// Upload a file as the `file` part of a multipart body
    Upload {
        /// API path
        path: String,

        /// Local file to send
        #[arg(short, long)]
        file: PathBuf,

        /// JSON object whose fields travel next to the file
        #[arg(short, long)]
        data: Option<String>,
    },

    /// DELETE a path under the application's API base
    Delete {
        /// API path
        path: String,
    },

    /// Download a URL (absolute or relative to the application host) to a file
    Download {
        /// URL or host-relative path
        url: String,

        /// Destination file
        #[arg(short, long)]
        output: PathBuf,
    },

    /// List EMC2 groups
    Groups,

    /// List EMC2 users of a group
    Users {
        /// Group id
        #[arg(long = "group-id", visible_alias = "gid")]
        group_id: i64,
    },

    /// List EI3 band categories and their bands
    Bands,
}

fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected KEY=VALUE, got '{raw}'"))
}
