//! ranklink - Discord-to-Roblox account linking and rank synchronization
//!
//! Links a Discord identity to a Roblox group membership via a bio-code
//! ownership challenge, and keeps the member's Discord role set in sync
//! with their numeric group rank.
//!
//! The core is pure and capability-driven: [`binding`] computes role
//! diffs, [`verify`] runs the challenge state machine, [`registry`]
//! persists confirmed links, and [`rank`] selects rank transitions. The
//! Roblox HTTP client and the Discord gateway sit behind the traits in
//! [`roblox`] and [`discord`].

pub mod binding;
pub mod cli;
pub mod commands;
pub mod config;
pub mod discord;
pub mod error;
pub mod http_server;
pub mod observability;
pub mod rank;
pub mod registry;
pub mod roblox;
pub mod verify;
