//! CLI argument parsing for the profile daemon.
//!
//! CLI flags override all other config sources.

use clap::{Parser, Subcommand};

use profile_client::DEFAULT_ENDPOINT;

/// Profile indexer daemon
///
/// Reconciles profile rows with the search index on WriteProfile signals.
#[derive(Parser, Debug)]
#[command(name = "profile-daemon")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to config file (overrides default ~/.config/profile-indexer/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Set log level (trace, debug, info, warn, error)
    #[arg(short, long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Daemon commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the gRPC server
    Start {
        /// Override gRPC port
        #[arg(short, long)]
        port: Option<u16>,

        /// Override Postgres connection string
        #[arg(long)]
        database_url: Option<String>,

        /// Override Solr base URL
        #[arg(long)]
        solr_url: Option<String>,

        /// Override Solr collection name
        #[arg(long)]
        solr_collection: Option<String>,
    },

    /// Send one WriteProfile signal to a running daemon
    Reconcile {
        /// Profile identifier (UUID)
        id: String,

        /// gRPC endpoint
        #[arg(short, long, default_value = DEFAULT_ENDPOINT)]
        endpoint: String,
    },

    /// Print the effective configuration as TOML
    Config,
}
