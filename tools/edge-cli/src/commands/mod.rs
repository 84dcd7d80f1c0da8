//! CLI command implementations.

pub mod config;
pub mod contacts;
pub mod render;

use clap::{Args, Subcommand};

/// Arguments for the render command.
#[derive(Args)]
pub struct RenderArgs {
    /// Request path, optionally with a query string.
    #[arg(default_value = "/")]
    pub path: String,

    /// User-Agent header to send.
    #[arg(short = 'A', long)]
    pub user_agent: Option<String>,

    /// Render in SPA mode regardless of config.
    #[arg(long)]
    pub spa: bool,

    /// Print status and headers only.
    #[arg(long)]
    pub head: bool,
}

/// Arguments for the contacts command.
#[derive(Args)]
pub struct ContactsArgs {
    /// Search query (fuzzy match on first or last name).
    #[arg(short, long)]
    pub query: Option<String>,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Validate the config file.
    Validate,
}
