//! Profile indexer daemon
//!
//! Keeps the Solr profile collection in sync with the Postgres profile table.
//!
//! # Usage
//!
//! ```bash
//! profile-daemon start [--port PORT] [--database-url DSN] [--solr-url URL]
//! profile-daemon reconcile <ID> [--endpoint URL]
//! profile-daemon config
//! ```
//!
//! # Configuration
//!
//! Configuration is loaded in order (later sources override earlier):
//! 1. Built-in defaults
//! 2. Config file (~/.config/profile-indexer/config.toml)
//! 3. Environment variables (PROFILE_*)
//! 4. CLI flags

use anyhow::Result;
use clap::Parser;

use profile_daemon::{reconcile_profile, show_config, start_daemon, Cli, Commands, Overrides};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Start {
            port,
            database_url,
            solr_url,
            solr_collection,
        } => {
            let overrides = Overrides {
                port,
                database_url,
                solr_url,
                solr_collection,
                log_level: cli.log_level,
            };
            start_daemon(cli.config.as_deref(), overrides).await?;
        }
        Commands::Reconcile { id, endpoint } => {
            reconcile_profile(&endpoint, &id).await?;
        }
        Commands::Config => {
            show_config(cli.config.as_deref())?;
        }
    }

    Ok(())
}
