//! Profile daemon library exports.
//!
//! This crate provides the CLI daemon binary for the profile indexer.
//!
//! # Modules
//!
//! - `cli`: Command-line argument parsing with clap
//! - `commands`: Command implementations (start, reconcile, config)

pub mod cli;
pub mod commands;

pub use cli::{Cli, Commands};
pub use commands::{
    apply_overrides, reconcile_profile, render_config, show_config, start_daemon, Overrides,
};
