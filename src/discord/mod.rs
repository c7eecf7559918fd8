//! # Guild Capabilities
//!
//! Capability surface the core consumes from the Discord side: reading
//! and mutating a member's role set, and recording rank-change audit
//! events. The gateway adapter implements these; the core never owns a
//! Discord connection.

use std::collections::BTreeSet;

use async_trait::async_trait;

use crate::binding::RoleDiff;
use crate::error::{BotError, BotResult};

/// A guild member whose roles the bot can read and mutate.
#[async_trait]
pub trait GuildMember: Send + Sync {
    /// Role names the member currently holds.
    fn role_names(&self) -> BTreeSet<String>;

    /// Grant the named roles.
    async fn add_roles(&self, roles: &BTreeSet<String>) -> BotResult<()>;

    /// Revoke the named roles.
    async fn remove_roles(&self, roles: &BTreeSet<String>) -> BotResult<()>;
}

/// The portion of a diff that was actually applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppliedDiff {
    pub added: Vec<String>,
    pub removed: Vec<String>,
}

/// Apply a role diff to a member, removals first.
///
/// Removing first avoids a transient state where both the old and new
/// rank's roles are held. Partial application is reported, not rolled
/// back: the error carries exactly what succeeded so the caller can
/// surface the diff actually achieved.
pub async fn apply_role_diff(member: &dyn GuildMember, diff: &RoleDiff) -> BotResult<AppliedDiff> {
    let mut applied = AppliedDiff::default();

    if !diff.to_remove.is_empty() {
        if member.remove_roles(&diff.to_remove).await.is_err() {
            return Err(BotError::RoleMutationFailed {
                added: applied.added,
                removed: applied.removed,
            });
        }
        applied.removed = diff.to_remove.iter().cloned().collect();
    }

    if !diff.to_add.is_empty() {
        if member.add_roles(&diff.to_add).await.is_err() {
            return Err(BotError::RoleMutationFailed {
                added: applied.added,
                removed: applied.removed,
            });
        }
        applied.added = diff.to_add.iter().cloned().collect();
    }

    Ok(applied)
}

/// What a rank command did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankAction {
    Promotion,
    Demotion,
    SetRank,
}

impl RankAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            RankAction::Promotion => "Promotion",
            RankAction::Demotion => "Demotion",
            RankAction::SetRank => "Set Rank",
        }
    }
}

/// One rank change, for the audit trail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankAuditEvent {
    pub actor: String,
    pub target: String,
    pub action: RankAction,
    pub old_rank: String,
    pub new_rank: String,
}

/// Sink for rank-change audit events.
///
/// Recording is best-effort: a sink failure is logged by the caller and
/// never fails the command that produced the event.
#[async_trait]
pub trait RankAuditSink: Send + Sync {
    async fn record(&self, event: &RankAuditEvent) -> BotResult<()>;
}

/// Sink that discards events, for deployments without an audit channel.
pub struct NullAuditSink;

#[async_trait]
impl RankAuditSink for NullAuditSink {
    async fn record(&self, _event: &RankAuditEvent) -> BotResult<()> {
        Ok(())
    }
}
