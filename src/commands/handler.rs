//! Command handlers.

use std::sync::Arc;

use crate::binding::RoleBindingTable;
use crate::discord::{
    apply_role_diff, GuildMember, RankAction, RankAuditEvent, RankAuditSink,
};
use crate::error::{BotError, BotResult};
use crate::observability::Logger;
use crate::rank;
use crate::registry::{LinkRegistry, LinkStore};
use crate::roblox::{Membership, RobloxApi};
use crate::verify::{ChallengeStore, VerificationSession};

use super::reply::Reply;

enum RankCommand {
    Promote,
    Demote,
    Set(u8),
}

/// All slash-command entry points, wired to the injected collaborators.
///
/// Handlers return `Err` for every domain failure; the gateway adapter
/// renders those with [`render_error`](super::render_error).
pub struct CommandHandler<A: RobloxApi, S: LinkStore> {
    roblox: Arc<A>,
    registry: Arc<LinkRegistry<S>>,
    bindings: Arc<RoleBindingTable>,
    session: VerificationSession<A>,
    audit: Arc<dyn RankAuditSink>,
    min_rank_to_command: u8,
}

impl<A: RobloxApi, S: LinkStore> CommandHandler<A, S> {
    pub fn new(
        roblox: Arc<A>,
        registry: Arc<LinkRegistry<S>>,
        bindings: Arc<RoleBindingTable>,
        challenges: Arc<ChallengeStore>,
        audit: Arc<dyn RankAuditSink>,
        min_rank_to_command: u8,
    ) -> Self {
        let session = VerificationSession::new(Arc::clone(&roblox), challenges);
        Self {
            roblox,
            registry,
            bindings,
            session,
            audit,
            min_rank_to_command,
        }
    }

    /// `/verify <username>` — issue a bio-code challenge.
    pub async fn verify(&self, identity: &str, username: &str) -> BotResult<Reply> {
        let code = self.session.begin(identity, username).await?;

        Ok(Reply::info("Verification Step 1/2")
            .field("1. Copy this code", code)
            .field(
                "2. Add it to your Roblox profile",
                "Go to Profile → About → Edit and paste the code anywhere in your \"About\" section",
            )
            .field("3. Come back here", "Run /confirmverify to complete verification")
            .footer("This code expires in 10 minutes"))
    }

    /// `/confirmverify` — confirm the challenge, persist the link, and
    /// reconcile roles immediately.
    ///
    /// A partial role application does not undo the verification: the
    /// link is already persisted, and the reply reports what applied.
    pub async fn confirm_verify(
        &self,
        identity: &str,
        member: &dyn GuildMember,
    ) -> BotResult<Reply> {
        let link = self.session.confirm(identity).await?;
        self.registry.put(identity, &link.account_name)?;

        let mut reply = Reply::success("Verification Complete")
            .field("Roblox Username", &link.account_name)
            .field(
                "Group Rank",
                format!("{} ({})", link.membership.role_name, link.membership.rank),
            );

        let diff = self
            .bindings
            .reconcile(&member.role_names(), link.membership.rank);

        match apply_role_diff(member, &diff).await {
            Ok(applied) => {
                if !applied.added.is_empty() {
                    reply = reply.field("Roles Added", applied.added.join(", "));
                }
                if !applied.removed.is_empty() {
                    reply = reply.field("Roles Removed", applied.removed.join(", "));
                }
            }
            Err(BotError::RoleMutationFailed { added, removed }) => {
                Logger::warn(
                    "role_update_partial",
                    &[
                        ("identity", identity),
                        ("added", &added.join(",")),
                        ("removed", &removed.join(",")),
                    ],
                );
                reply = reply.field(
                    "Role Update",
                    "Partially applied. Run /update to finish assigning your roles.",
                );
            }
            Err(other) => return Err(other),
        }

        Ok(reply.footer("You can now remove the code from your Roblox bio."))
    }

    /// `/getrank <username>` — rank info lookup, no gating.
    pub async fn get_rank(&self, username: &str) -> BotResult<Reply> {
        let account_id = self
            .roblox
            .resolve_account_id(username)
            .await?
            .ok_or(BotError::AccountNotFound)?;

        let membership = self
            .roblox
            .fetch_membership(account_id)
            .await?
            .ok_or(BotError::NotInGroup)?;

        Ok(Reply::info("User Rank Info")
            .field("Username", username)
            .field("Rank", membership.rank.to_string())
            .field("Role", membership.role_name))
    }

    /// `/promote <username>`
    pub async fn promote(&self, actor_identity: &str, username: &str) -> BotResult<Reply> {
        self.rank_command(actor_identity, username, RankCommand::Promote)
            .await
    }

    /// `/demote <username>`
    pub async fn demote(&self, actor_identity: &str, username: &str) -> BotResult<Reply> {
        self.rank_command(actor_identity, username, RankCommand::Demote)
            .await
    }

    /// `/setrank <username> <rank>`
    pub async fn set_rank(
        &self,
        actor_identity: &str,
        username: &str,
        target_rank: u8,
    ) -> BotResult<Reply> {
        self.rank_command(actor_identity, username, RankCommand::Set(target_rank))
            .await
    }

    /// `/update <user>` — re-reconcile a verified member's roles from
    /// their stored link. The stored account name is authoritative; the
    /// caller never resupplies it.
    pub async fn update(&self, target_identity: &str, member: &dyn GuildMember) -> BotResult<Reply> {
        let account_name = self
            .registry
            .get(target_identity)
            .ok_or(BotError::NotLinked)?;

        let account_id = self
            .roblox
            .resolve_account_id(&account_name)
            .await?
            .ok_or(BotError::AccountNotFound)?;

        let membership = self
            .roblox
            .fetch_membership(account_id)
            .await?
            .ok_or(BotError::NotInGroup)?;

        let diff = self
            .bindings
            .reconcile(&member.role_names(), membership.rank);
        let applied = apply_role_diff(member, &diff).await?;

        let mut reply = Reply::success("Roles Updated")
            .field("Roblox Username", &account_name)
            .field(
                "Current Rank",
                format!("{} ({})", membership.role_name, membership.rank),
            );

        if applied.added.is_empty() && applied.removed.is_empty() {
            reply = reply.field("Changes", "None needed");
        }
        if !applied.added.is_empty() {
            reply = reply.field("Roles Added", applied.added.join(", "));
        }
        if !applied.removed.is_empty() {
            reply = reply.field("Roles Removed", applied.removed.join(", "));
        }

        Ok(reply)
    }

    /// Shared promote/demote/setrank flow.
    ///
    /// Order matters: the link lookup and self-target guard are local
    /// and run before any remote call.
    async fn rank_command(
        &self,
        actor_identity: &str,
        username: &str,
        command: RankCommand,
    ) -> BotResult<Reply> {
        let actor_account = self
            .registry
            .get(actor_identity)
            .ok_or(BotError::NotLinked)?;

        rank::ensure_not_self(&actor_account, username)?;
        self.ensure_rank_permission(&actor_account).await?;

        let target_id = self
            .roblox
            .resolve_account_id(username)
            .await?
            .ok_or(BotError::AccountNotFound)?;

        let current = self
            .roblox
            .fetch_membership(target_id)
            .await?
            .ok_or(BotError::NotInGroup)?;

        let entries = self.roblox.fetch_rank_entries().await?;
        let (action, entry) = match command {
            RankCommand::Promote => (RankAction::Promotion, rank::promote(&entries, current.rank)?),
            RankCommand::Demote => (RankAction::Demotion, rank::demote(&entries, current.rank)?),
            RankCommand::Set(target) => (RankAction::SetRank, rank::set_rank(&entries, target)?),
        };
        let entry = entry.clone();

        if !self.roblox.set_member_role(target_id, entry.role_id).await? {
            return Err(BotError::RankMutationFailed);
        }

        Logger::info(
            "rank_changed",
            &[
                ("action", action.as_str()),
                ("actor", actor_account.as_str()),
                ("target", username),
                ("new_rank", &entry.rank.to_string()),
            ],
        );

        let event = RankAuditEvent {
            actor: actor_account,
            target: username.to_string(),
            action,
            old_rank: current.role_name.clone(),
            new_rank: entry.role_name.clone(),
        };
        if let Err(err) = self.audit.record(&event).await {
            // best-effort: audit failure never fails the command
            Logger::warn("audit_record_failed", &[("reason", &err.to_string())]);
        }

        let title = match action {
            RankAction::Promotion => "User Promoted",
            RankAction::Demotion => "User Demoted",
            RankAction::SetRank => "Rank Set",
        };
        Ok(Reply::success(title)
            .field("Username", username)
            .field("Old Rank", current.role_name)
            .field("New Rank", entry.role_name))
    }

    /// Actor must hold at least the configured rank floor in the group.
    async fn ensure_rank_permission(&self, actor_account: &str) -> BotResult<Membership> {
        let account_id = self
            .roblox
            .resolve_account_id(actor_account)
            .await?
            .ok_or(BotError::AccountNotFound)?;

        let membership = self
            .roblox
            .fetch_membership(account_id)
            .await?
            .ok_or(BotError::NotInGroup)?;

        if membership.rank < self.min_rank_to_command {
            return Err(BotError::InsufficientRank {
                required: self.min_rank_to_command,
            });
        }

        Ok(membership)
    }
}
