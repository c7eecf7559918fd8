//! # Error Types
//!
//! Domain error taxonomy for ranklink.
//!
//! Every variant except the startup errors (`Config`, `DuplicateRankBinding`,
//! `RegistryCorrupt`) is recovered at the command boundary and rendered as a
//! user-visible reply; nothing here crashes the process once it is serving.

use thiserror::Error;

/// Result type for ranklink operations
pub type BotResult<T> = Result<T, BotError>;

/// Errors surfaced by linking, verification, and ranking operations
#[derive(Debug, Error)]
pub enum BotError {
    // ==================
    // Verification Errors
    // ==================

    /// Roblox username does not resolve to an account
    #[error("Roblox user not found")]
    AccountNotFound,

    /// Account exists but holds no rank in the configured group
    #[error("User is not in the group")]
    NotInGroup,

    /// `confirm` called without a prior `verify` for this identity
    #[error("No pending verification found")]
    NoPendingChallenge,

    /// Challenge expired, or the code is not present in the profile text
    /// (the two cases are not distinguished to the caller)
    #[error("Verification code not found in profile")]
    CodeNotFound,

    // ==================
    // Ranking Errors
    // ==================

    /// Actor targeted their own linked account
    #[error("You cannot change your own rank")]
    SelfTargetDenied,

    /// No group role exists one rank above the target's current rank
    #[error("User is already at max rank")]
    AtMaxRank,

    /// No group role exists one rank below the target's current rank
    #[error("User is already at lowest rank")]
    AtMinRank,

    /// Requested rank number has no role in the live group role list
    #[error("No group role exists at rank {0}")]
    InvalidRank(u8),

    /// The remote rank mutation returned non-success. The remote API does
    /// not disambiguate cause; insufficient privilege of the acting
    /// credential is the common one.
    #[error("Failed to change rank")]
    RankMutationFailed,

    /// Role diff was only partially applied. Carries the portion that did
    /// succeed so the caller can report what was actually achieved.
    #[error("Role update partially applied")]
    RoleMutationFailed {
        added: Vec<String>,
        removed: Vec<String>,
    },

    // ==================
    // Gating Errors
    // ==================

    /// Acting identity has no link record
    #[error("You must verify your Roblox account first")]
    NotLinked,

    /// Acting identity is linked but below the command rank floor
    #[error("You must hold rank {required} or higher to use this command")]
    InsufficientRank { required: u8 },

    // ==================
    // Startup Errors
    // ==================

    /// Two role bindings were configured for the same rank
    #[error("Duplicate role binding for rank {rank}")]
    DuplicateRankBinding { rank: u8 },

    /// Registry file exists but cannot be parsed. Fatal at startup; never
    /// silently replaced with an empty registry.
    #[error("Link registry is corrupt: {0}")]
    RegistryCorrupt(String),

    /// Missing or malformed configuration
    #[error("Configuration error: {0}")]
    Config(String),

    // ==================
    // Transport Errors
    // ==================

    /// Remote API transport failure
    #[error("Remote API error: {0}")]
    Transport(String),

    /// Local I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for BotError {
    fn from(err: reqwest::Error) -> Self {
        BotError::Transport(err.to_string())
    }
}
