//! Durable link storage.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::{BotError, BotResult};

/// Durable storage for the identity → account-name map.
///
/// `load` distinguishes "no prior state" (`Ok(None)`) from "corrupt
/// state" (`Err(RegistryCorrupt)`); the registry treats only the former
/// as an empty start.
pub trait LinkStore: Send + Sync {
    fn load(&self) -> BotResult<Option<HashMap<String, String>>>;
    fn persist(&self, links: &HashMap<String, String>) -> BotResult<()>;
}

/// Single JSON document on disk: `{identity: account_name}`, rewritten
/// wholesale on every persist.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl LinkStore for JsonFileStore {
    fn load(&self) -> BotResult<Option<HashMap<String, String>>> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };

        let links = serde_json::from_str(&contents).map_err(|err| {
            BotError::RegistryCorrupt(format!("{}: {}", self.path.display(), err))
        })?;
        Ok(Some(links))
    }

    fn persist(&self, links: &HashMap<String, String>) -> BotResult<()> {
        let contents = serde_json::to_string_pretty(links)
            .map_err(|err| BotError::RegistryCorrupt(err.to_string()))?;
        std::fs::write(&self.path, contents)?;
        Ok(())
    }
}

/// In-memory store for tests and fakes.
#[derive(Default)]
pub struct MemoryStore {
    links: Mutex<Option<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seed stored state, as if a prior process had persisted it.
    pub fn seeded(links: HashMap<String, String>) -> Self {
        Self {
            links: Mutex::new(Some(links)),
        }
    }
}

impl LinkStore for MemoryStore {
    fn load(&self) -> BotResult<Option<HashMap<String, String>>> {
        Ok(self.links.lock().expect("memory store lock poisoned").clone())
    }

    fn persist(&self, links: &HashMap<String, String>) -> BotResult<()> {
        *self.links.lock().expect("memory store lock poisoned") = Some(links.clone());
        Ok(())
    }
}
