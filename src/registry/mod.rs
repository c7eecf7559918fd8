//! # Link Registry
//!
//! Durable mapping from Discord identity to verified Roblox account name.
//!
//! Loaded wholesale at process start and rewritten wholesale after every
//! `put` (write-through, no batching): once a caller has observed a
//! successful confirmation, a crash cannot lose the link.
//!
//! ## Invariants
//! - REG-1: a registry file that exists but does not parse is fatal at
//!   startup, never silently replaced with an empty registry
//! - REG-2: `put` persists before returning
//! - REG-3: concurrent `put` for the same identity is last-writer-wins

mod store;

use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::BotResult;
use crate::observability::Logger;

pub use store::{JsonFileStore, LinkStore, MemoryStore};

/// In-memory cache over a durable [`LinkStore`].
pub struct LinkRegistry<S: LinkStore> {
    store: S,
    links: Mutex<HashMap<String, String>>,
}

impl<S: LinkStore> LinkRegistry<S> {
    /// Load the registry from its backing store.
    ///
    /// "No prior state" starts empty; "corrupt state" propagates
    /// `RegistryCorrupt` to abort initialization.
    pub fn open(store: S) -> BotResult<Self> {
        let links = store.load()?.unwrap_or_default();
        Logger::info("registry_loaded", &[("links", &links.len().to_string())]);

        Ok(Self {
            store,
            links: Mutex::new(links),
        })
    }

    /// Verified account name for an identity, if linked.
    pub fn get(&self, identity: &str) -> Option<String> {
        let links = self.links.lock().expect("registry lock poisoned");
        links.get(identity).cloned()
    }

    /// Create or overwrite the link for an identity and persist it
    /// synchronously before returning.
    pub fn put(&self, identity: &str, account_name: &str) -> BotResult<()> {
        let mut links = self.links.lock().expect("registry lock poisoned");
        links.insert(identity.to_string(), account_name.to_string());
        self.store.persist(&links)?;

        Logger::info(
            "link_persisted",
            &[("identity", identity), ("account", account_name)],
        );
        Ok(())
    }

    /// All links, sorted by identity for stable output.
    pub fn all(&self) -> Vec<(String, String)> {
        let links = self.links.lock().expect("registry lock poisoned");
        let mut entries: Vec<_> = links
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        entries.sort();
        entries
    }

    /// Number of linked identities.
    pub fn len(&self) -> usize {
        self.links.lock().expect("registry lock poisoned").len()
    }

    /// True if no identities are linked.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
