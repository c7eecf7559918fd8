//! # Configuration
//!
//! Runtime configuration loaded from the environment at startup.
//! Missing required variables fail initialization with the variable name
//! in the error; optional variables fall back to defaults.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{BotError, BotResult};

/// Bot configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// `.ROBLOSECURITY` cookie for the acting Roblox credential
    pub roblox_cookie: String,

    /// Roblox group whose ranks drive role synchronization
    pub group_id: u64,

    /// Discord bot token for the gateway collaborator
    pub discord_token: String,

    /// Minimum group rank required to use ranking commands (default: 9)
    #[serde(default = "default_min_rank")]
    pub min_rank_to_command: u8,

    /// Port for the liveness HTTP server (default: 3000)
    #[serde(default = "default_port")]
    pub port: u16,

    /// Path of the persisted link registry document
    #[serde(default = "default_registry_path")]
    pub registry_path: PathBuf,
}

fn default_min_rank() -> u8 {
    9
}

fn default_port() -> u16 {
    3000
}

fn default_registry_path() -> PathBuf {
    PathBuf::from("verified_users.json")
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> BotResult<Self> {
        Ok(Self {
            roblox_cookie: required_var("ROBLOX_COOKIE")?,
            group_id: parse_var("GROUP_ID", required_var("GROUP_ID")?)?,
            discord_token: required_var("DISCORD_TOKEN")?,
            min_rank_to_command: match std::env::var("MIN_RANK_TO_USE_COMMANDS") {
                Ok(v) => parse_var("MIN_RANK_TO_USE_COMMANDS", v)?,
                Err(_) => default_min_rank(),
            },
            port: match std::env::var("PORT") {
                Ok(v) => parse_var("PORT", v)?,
                Err(_) => default_port(),
            },
            registry_path: std::env::var("RANKLINK_REGISTRY_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| default_registry_path()),
        })
    }
}

fn required_var(name: &str) -> BotResult<String> {
    std::env::var(name)
        .map_err(|_| BotError::Config(format!("missing required environment variable {}", name)))
}

fn parse_var<T: std::str::FromStr>(name: &str, value: String) -> BotResult<T> {
    value
        .parse()
        .map_err(|_| BotError::Config(format!("invalid value for {}: {}", name, value)))
}
