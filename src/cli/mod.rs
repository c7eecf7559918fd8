//! CLI module for ranklink
//!
//! Provides the command-line interface:
//! - start: boot the bot and serve the liveness endpoint
//! - check: validate config, bindings, and registry, then exit
//! - links: print the verified link registry

mod args;
mod commands;

pub use args::{Cli, Command};
pub use commands::run;
