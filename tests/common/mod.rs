//! Shared test fakes: an in-memory Roblox API, a scriptable guild
//! member, and a recording audit sink.

// Not every integration test crate uses every fake.
#![allow(dead_code)]

use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use ranklink::binding::RoleBindingTable;
use ranklink::commands::CommandHandler;
use ranklink::discord::{GuildMember, RankAuditEvent, RankAuditSink};
use ranklink::error::{BotError, BotResult};
use ranklink::rank::RankEntry;
use ranklink::registry::{LinkRegistry, MemoryStore};
use ranklink::roblox::{Membership, RobloxApi};
use ranklink::verify::ChallengeStore;

/// In-memory Roblox capability with a call counter for every remote
/// lookup, so tests can assert that guards short-circuit before any
/// network traffic.
#[derive(Default)]
pub struct FakeRoblox {
    accounts: Mutex<HashMap<String, u64>>,
    profiles: Mutex<HashMap<u64, String>>,
    memberships: Mutex<HashMap<u64, Membership>>,
    rank_entries: Mutex<Vec<RankEntry>>,
    rank_mutation_succeeds: Mutex<bool>,
    pub rank_changes: Mutex<Vec<(u64, u64)>>,
    pub remote_calls: Mutex<usize>,
}

impl FakeRoblox {
    pub fn new() -> Self {
        Self {
            rank_mutation_succeeds: Mutex::new(true),
            ..Self::default()
        }
    }

    pub fn with_account(self, name: &str, id: u64) -> Self {
        self.accounts
            .lock()
            .unwrap()
            .insert(name.to_lowercase(), id);
        self
    }

    pub fn with_profile(self, id: u64, text: &str) -> Self {
        self.profiles.lock().unwrap().insert(id, text.to_string());
        self
    }

    pub fn with_membership(self, id: u64, rank: u8, role_name: &str, role_id: u64) -> Self {
        self.memberships.lock().unwrap().insert(
            id,
            Membership {
                rank,
                role_name: role_name.to_string(),
                role_id,
            },
        );
        self
    }

    pub fn with_rank_entries(self, ranks: &[u8]) -> Self {
        *self.rank_entries.lock().unwrap() = ranks
            .iter()
            .map(|&rank| RankEntry {
                rank,
                role_id: 1000 + rank as u64,
                role_name: format!("Rank {}", rank),
            })
            .collect();
        self
    }

    pub fn with_failing_rank_mutation(self) -> Self {
        *self.rank_mutation_succeeds.lock().unwrap() = false;
        self
    }

    pub fn set_profile(&self, id: u64, text: &str) {
        self.profiles.lock().unwrap().insert(id, text.to_string());
    }

    pub fn remote_call_count(&self) -> usize {
        *self.remote_calls.lock().unwrap()
    }

    fn count_call(&self) {
        *self.remote_calls.lock().unwrap() += 1;
    }
}

#[async_trait]
impl RobloxApi for FakeRoblox {
    async fn resolve_account_id(&self, account_name: &str) -> BotResult<Option<u64>> {
        self.count_call();
        Ok(self
            .accounts
            .lock()
            .unwrap()
            .get(&account_name.to_lowercase())
            .copied())
    }

    async fn fetch_profile_text(&self, account_id: u64) -> BotResult<Option<String>> {
        self.count_call();
        Ok(self.profiles.lock().unwrap().get(&account_id).cloned())
    }

    async fn fetch_membership(&self, account_id: u64) -> BotResult<Option<Membership>> {
        self.count_call();
        Ok(self.memberships.lock().unwrap().get(&account_id).cloned())
    }

    async fn fetch_rank_entries(&self) -> BotResult<Vec<RankEntry>> {
        self.count_call();
        Ok(self.rank_entries.lock().unwrap().clone())
    }

    async fn set_member_role(&self, account_id: u64, role_id: u64) -> BotResult<bool> {
        self.count_call();
        if !*self.rank_mutation_succeeds.lock().unwrap() {
            return Ok(false);
        }
        self.rank_changes.lock().unwrap().push((account_id, role_id));
        Ok(true)
    }
}

/// Guild member whose role set lives in memory. Records the order of
/// mutation calls and can be scripted to fail adds or removes.
#[derive(Default)]
pub struct FakeMember {
    pub roles: Mutex<BTreeSet<String>>,
    pub fail_adds: bool,
    pub fail_removes: bool,
    pub operations: Mutex<Vec<String>>,
}

impl FakeMember {
    pub fn with_roles(roles: &[&str]) -> Self {
        Self {
            roles: Mutex::new(roles.iter().map(|r| r.to_string()).collect()),
            ..Self::default()
        }
    }

    pub fn current_roles(&self) -> BTreeSet<String> {
        self.roles.lock().unwrap().clone()
    }
}

#[async_trait]
impl GuildMember for FakeMember {
    fn role_names(&self) -> BTreeSet<String> {
        self.roles.lock().unwrap().clone()
    }

    async fn add_roles(&self, roles: &BTreeSet<String>) -> BotResult<()> {
        if self.fail_adds {
            return Err(BotError::Transport("add_roles failed".to_string()));
        }
        let mut held = self.roles.lock().unwrap();
        for role in roles {
            held.insert(role.clone());
        }
        self.operations.lock().unwrap().push(format!(
            "add:{}",
            roles.iter().cloned().collect::<Vec<_>>().join(",")
        ));
        Ok(())
    }

    async fn remove_roles(&self, roles: &BTreeSet<String>) -> BotResult<()> {
        if self.fail_removes {
            return Err(BotError::Transport("remove_roles failed".to_string()));
        }
        let mut held = self.roles.lock().unwrap();
        for role in roles {
            held.remove(role);
        }
        self.operations.lock().unwrap().push(format!(
            "remove:{}",
            roles.iter().cloned().collect::<Vec<_>>().join(",")
        ));
        Ok(())
    }
}

/// Audit sink that records every event; can be scripted to fail.
#[derive(Default)]
pub struct RecordingAuditSink {
    pub events: Mutex<Vec<RankAuditEvent>>,
    pub fail: bool,
}

impl RecordingAuditSink {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }
}

#[async_trait]
impl RankAuditSink for RecordingAuditSink {
    async fn record(&self, event: &RankAuditEvent) -> BotResult<()> {
        if self.fail {
            return Err(BotError::Transport("audit channel unavailable".to_string()));
        }
        self.events.lock().unwrap().push(event.clone());
        Ok(())
    }
}

/// A fully wired command handler over fakes, with handles to every
/// collaborator for assertions.
pub struct TestBot {
    pub handler: CommandHandler<FakeRoblox, MemoryStore>,
    pub roblox: Arc<FakeRoblox>,
    pub registry: Arc<LinkRegistry<MemoryStore>>,
    pub challenges: Arc<ChallengeStore>,
    pub audit: Arc<RecordingAuditSink>,
}

pub const MIN_RANK_TO_COMMAND: u8 = 9;

pub fn bot(roblox: FakeRoblox, bindings: RoleBindingTable) -> TestBot {
    bot_with_audit(roblox, bindings, RecordingAuditSink::default())
}

pub fn bot_with_audit(
    roblox: FakeRoblox,
    bindings: RoleBindingTable,
    audit: RecordingAuditSink,
) -> TestBot {
    let roblox = Arc::new(roblox);
    let registry = Arc::new(LinkRegistry::open(MemoryStore::new()).unwrap());
    let challenges = Arc::new(ChallengeStore::new());
    let audit = Arc::new(audit);

    let handler = CommandHandler::new(
        Arc::clone(&roblox),
        Arc::clone(&registry),
        Arc::new(bindings),
        Arc::clone(&challenges),
        audit.clone() as Arc<dyn RankAuditSink>,
        MIN_RANK_TO_COMMAND,
    );

    TestBot {
        handler,
        roblox,
        registry,
        challenges,
        audit,
    }
}

/// Small binding table used across handler tests.
pub fn test_bindings() -> RoleBindingTable {
    RoleBindingTable::from_pairs([
        (1, vec!["Verified".to_string()]),
        (3, vec!["Verified".to_string(), "Manager".to_string()]),
        (5, vec!["Verified".to_string(), "Barista".to_string()]),
    ])
    .unwrap()
}
