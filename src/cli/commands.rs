//! CLI command dispatch.

use std::sync::Arc;

use clap::Parser;

use crate::binding::default_bindings;
use crate::commands::CommandHandler;
use crate::config::Config;
use crate::discord::NullAuditSink;
use crate::error::BotResult;
use crate::http_server;
use crate::observability::Logger;
use crate::registry::{JsonFileStore, LinkRegistry};
use crate::roblox::{RobloxApi, RobloxClient};
use crate::verify::ChallengeStore;

/// Parse arguments and run the selected command.
pub fn run() -> BotResult<()> {
    let cli = super::Cli::parse();

    match cli.command {
        super::Command::Start => start(),
        super::Command::Check => check(),
        super::Command::Links => links(),
    }
}

/// Boot the bot: load and validate all state, wire the command handler
/// for the gateway adapter, and serve the liveness endpoint.
///
/// A corrupt registry or a duplicate role binding aborts here rather
/// than serving with ambiguous state.
fn start() -> BotResult<()> {
    let config = Config::from_env()?;
    let bindings = Arc::new(default_bindings()?);
    let registry = Arc::new(LinkRegistry::open(JsonFileStore::new(&config.registry_path))?);
    let roblox = Arc::new(RobloxClient::new(
        config.group_id,
        config.roblox_cookie.clone(),
    ));

    let handler = CommandHandler::new(
        roblox,
        Arc::clone(&registry),
        bindings,
        Arc::new(ChallengeStore::new()),
        Arc::new(NullAuditSink),
        config.min_rank_to_command,
    );

    Logger::info(
        "startup",
        &[
            ("group_id", &config.group_id.to_string()),
            ("links", &registry.len().to_string()),
            ("min_rank_to_command", &config.min_rank_to_command.to_string()),
        ],
    );

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async move {
        // The gateway adapter drives the handler; it must stay alive for
        // the lifetime of the liveness server.
        let _gateway_commands = handler;
        http_server::serve(config.port).await
    })
}

/// Validate configuration, role bindings, and the registry, and confirm
/// the Roblox credential can read the group's role list.
fn check() -> BotResult<()> {
    let config = Config::from_env()?;
    let bindings = default_bindings()?;
    let registry = LinkRegistry::open(JsonFileStore::new(&config.registry_path))?;
    let roblox = RobloxClient::new(config.group_id, config.roblox_cookie.clone());

    let runtime = tokio::runtime::Runtime::new()?;
    let entries = runtime.block_on(roblox.fetch_rank_entries())?;

    Logger::info(
        "check_ok",
        &[
            ("bound_ranks", &bindings.len().to_string()),
            ("group_roles", &entries.len().to_string()),
            ("links", &registry.len().to_string()),
        ],
    );
    Ok(())
}

/// Print the verified link registry, one link per line.
fn links() -> BotResult<()> {
    let config = Config::from_env()?;
    let registry = LinkRegistry::open(JsonFileStore::new(&config.registry_path))?;

    for (identity, account_name) in registry.all() {
        println!("{}\t{}", identity, account_name);
    }
    Ok(())
}
