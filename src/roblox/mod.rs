//! # Roblox Capabilities
//!
//! Abstract capability surface the core consumes from the Roblox platform,
//! plus the concrete HTTP client. Core components depend only on the
//! [`RobloxApi`] trait so tests can substitute fakes; retry and rate-limit
//! policy live with the transport, never here.

mod client;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::BotResult;
use crate::rank::RankEntry;

pub use client::RobloxClient;

/// A member's standing in the configured group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Membership {
    pub rank: u8,
    pub role_name: String,
    pub role_id: u64,
}

/// Capability surface consumed by verification and ranking.
///
/// Every method returns a typed outcome: `Ok(None)` means the remote API
/// answered "no such thing", `Err` means the call itself failed.
#[async_trait]
pub trait RobloxApi: Send + Sync {
    /// Resolve a username to its account id.
    async fn resolve_account_id(&self, account_name: &str) -> BotResult<Option<u64>>;

    /// Public profile description text for an account.
    async fn fetch_profile_text(&self, account_id: u64) -> BotResult<Option<String>>;

    /// The account's rank in the configured group, if a member.
    async fn fetch_membership(&self, account_id: u64) -> BotResult<Option<Membership>>;

    /// The group's full role list, ordered as the API returns it.
    async fn fetch_rank_entries(&self) -> BotResult<Vec<RankEntry>>;

    /// Move a member onto the given group role. Returns whether the
    /// remote API reported success; it does not disambiguate cause on
    /// failure.
    async fn set_member_role(&self, account_id: u64, role_id: u64) -> BotResult<bool>;
}
