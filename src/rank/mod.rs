//! # Rank Mutation
//!
//! Pure rank-transition lookups over the group's live role list.
//!
//! The role list is the external source of truth and is fetched fresh for
//! every command invocation; these functions only select an entry from it.
//! Applying the selected role id remotely is the caller's job.
//!
//! ## Invariants
//! - RANK-1: promote/demote match `rank ± 1` exactly, never skip ahead
//!   over an unbound integer
//! - RANK-2: the self-target guard runs before any remote lookup

use serde::{Deserialize, Serialize};

use crate::error::{BotError, BotResult};

/// One role in the group's hierarchy, as returned by the group role list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankEntry {
    pub rank: u8,
    pub role_id: u64,
    pub role_name: String,
}

/// Entry one rank above `current`, exact match only.
pub fn promote(entries: &[RankEntry], current: u8) -> BotResult<&RankEntry> {
    let next = current.checked_add(1).ok_or(BotError::AtMaxRank)?;
    entries
        .iter()
        .find(|e| e.rank == next)
        .ok_or(BotError::AtMaxRank)
}

/// Entry one rank below `current`, exact match only.
pub fn demote(entries: &[RankEntry], current: u8) -> BotResult<&RankEntry> {
    let previous = current.checked_sub(1).ok_or(BotError::AtMinRank)?;
    entries
        .iter()
        .find(|e| e.rank == previous)
        .ok_or(BotError::AtMinRank)
}

/// Entry at exactly `target`, regardless of the member's current rank.
pub fn set_rank(entries: &[RankEntry], target: u8) -> BotResult<&RankEntry> {
    entries
        .iter()
        .find(|e| e.rank == target)
        .ok_or(BotError::InvalidRank(target))
}

/// Reject rank commands whose target is the actor's own linked account.
///
/// Account names compare case-insensitively everywhere in the system.
pub fn ensure_not_self(actor_account: &str, target_account: &str) -> BotResult<()> {
    if actor_account.eq_ignore_ascii_case(target_account) {
        return Err(BotError::SelfTargetDenied);
    }
    Ok(())
}
