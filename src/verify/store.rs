//! In-memory pending challenge store.
//!
//! One of the two explicit injected stores in the system (the other is the
//! durable link registry). Keyed by identity; inserting for an identity
//! that already has a record supersedes it.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{DateTime, Utc};

/// A live verification challenge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingChallenge {
    pub identity: String,
    pub account_name: String,
    pub account_id: u64,
    pub code: String,
    pub issued_at: DateTime<Utc>,
}

/// Map of identity → pending challenge.
///
/// All operations are single-lock map accesses; no await happens while
/// the lock is held.
#[derive(Debug, Default)]
pub struct ChallengeStore {
    inner: Mutex<HashMap<String, PendingChallenge>>,
}

impl ChallengeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a challenge, superseding any prior record for the identity.
    pub fn insert(&self, challenge: PendingChallenge) {
        let mut map = self.inner.lock().expect("challenge store lock poisoned");
        map.insert(challenge.identity.clone(), challenge);
    }

    /// Snapshot of the pending challenge for an identity, if any.
    pub fn get(&self, identity: &str) -> Option<PendingChallenge> {
        let map = self.inner.lock().expect("challenge store lock poisoned");
        map.get(identity).cloned()
    }

    /// Delete the record for an identity.
    pub fn remove(&self, identity: &str) {
        let mut map = self.inner.lock().expect("challenge store lock poisoned");
        map.remove(identity);
    }

    /// Delete the record only if it still carries `code`.
    ///
    /// Used by the scheduled expiry so a late-firing timer cannot delete
    /// a challenge that was re-issued after it was scheduled.
    pub fn remove_if_code(&self, identity: &str, code: &str) {
        let mut map = self.inner.lock().expect("challenge store lock poisoned");
        if map.get(identity).is_some_and(|c| c.code == code) {
            map.remove(identity);
        }
    }

    /// Number of pending challenges.
    pub fn len(&self) -> usize {
        self.inner.lock().expect("challenge store lock poisoned").len()
    }

    /// True if no challenges are pending.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
