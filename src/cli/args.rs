//! CLI argument definitions.

use clap::{Parser, Subcommand};

/// Discord-to-Roblox account linking and rank synchronization bot
#[derive(Debug, Parser)]
#[command(name = "ranklink", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Boot the bot and serve the liveness endpoint
    Start,

    /// Validate configuration, role bindings, and the link registry
    Check,

    /// Print the verified link registry
    Links,
}
