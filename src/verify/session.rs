//! Verification session state machine.

use std::sync::Arc;
use std::time::Duration as StdDuration;

use chrono::{Duration, Utc};

use crate::error::{BotError, BotResult};
use crate::observability::Logger;
use crate::roblox::{Membership, RobloxApi};

use super::code::generate_code;
use super::store::{ChallengeStore, PendingChallenge};

/// Challenge lifetime. The scheduled cleanup and the freshness check in
/// `confirm` both derive from this.
pub const CHALLENGE_TTL_SECS: i64 = 10 * 60;

/// Outcome of a successful confirmation, ready for the caller to persist
/// and to drive an immediate role reconciliation.
#[derive(Debug, Clone)]
pub struct ConfirmedLink {
    pub account_name: String,
    pub account_id: u64,
    pub membership: Membership,
}

/// Issues and confirms bio-code challenges.
///
/// Holds the injected challenge store and the Roblox capability; owns no
/// other state.
pub struct VerificationSession<A: RobloxApi> {
    api: Arc<A>,
    store: Arc<ChallengeStore>,
}

impl<A: RobloxApi> VerificationSession<A> {
    pub fn new(api: Arc<A>, store: Arc<ChallengeStore>) -> Self {
        Self { api, store }
    }

    /// Start verification for `identity` claiming `account_name`.
    ///
    /// Resolves the account and requires group membership before issuing
    /// anything, so a failed lookup leaves no pending record. Any prior
    /// pending challenge for the identity is superseded without error.
    ///
    /// Expiry is scheduled as a deferred deletion guarded by the issued
    /// code; the authoritative staleness decision happens in [`confirm`].
    ///
    /// [`confirm`]: VerificationSession::confirm
    pub async fn begin(&self, identity: &str, account_name: &str) -> BotResult<String> {
        let account_id = self
            .api
            .resolve_account_id(account_name)
            .await?
            .ok_or(BotError::AccountNotFound)?;

        self.api
            .fetch_membership(account_id)
            .await?
            .ok_or(BotError::NotInGroup)?;

        let code = generate_code();
        self.store.insert(PendingChallenge {
            identity: identity.to_string(),
            account_name: account_name.to_string(),
            account_id,
            code: code.clone(),
            issued_at: Utc::now(),
        });

        Logger::info(
            "challenge_issued",
            &[("identity", identity), ("account", account_name)],
        );

        let store = Arc::clone(&self.store);
        let expiry_identity = identity.to_string();
        let expected_code = code.clone();
        tokio::spawn(async move {
            tokio::time::sleep(StdDuration::from_secs(CHALLENGE_TTL_SECS as u64)).await;
            store.remove_if_code(&expiry_identity, &expected_code);
        });

        Ok(code)
    }

    /// Complete verification for `identity`.
    ///
    /// Requires a pending challenge and rechecks its age against the TTL
    /// here rather than trusting the cleanup task, which may not have
    /// fired yet. The stored code must appear in the account's profile
    /// text as an exact, case-sensitive substring.
    pub async fn confirm(&self, identity: &str) -> BotResult<ConfirmedLink> {
        let pending = self
            .store
            .get(identity)
            .ok_or(BotError::NoPendingChallenge)?;

        if Utc::now() - pending.issued_at >= Duration::seconds(CHALLENGE_TTL_SECS) {
            self.store.remove(identity);
            Logger::info("challenge_expired", &[("identity", identity)]);
            return Err(BotError::CodeNotFound);
        }

        let profile_text = self
            .api
            .fetch_profile_text(pending.account_id)
            .await?
            .unwrap_or_default();

        if !profile_text.contains(&pending.code) {
            return Err(BotError::CodeNotFound);
        }

        let membership = self
            .api
            .fetch_membership(pending.account_id)
            .await?
            .ok_or(BotError::NotInGroup)?;

        self.store.remove(identity);
        Logger::info(
            "challenge_confirmed",
            &[
                ("identity", identity),
                ("account", pending.account_name.as_str()),
            ],
        );

        Ok(ConfirmedLink {
            account_name: pending.account_name,
            account_id: pending.account_id,
            membership,
        })
    }
}
