//! Named server bookmarks stored as a TOML file.
//!
//! ```toml
//! [servers]
//! "Lan Party" = "192.168.1.20:2302"
//! public = "halo.example.net:2302"
//! ```

use log::{info, warn};
use serde::{Deserialize, Serialize};
use shared::{AddressParseError, QueryTarget};
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

pub const DEFAULT_BOOKMARKS_FILE: &str = "servers.toml";

#[derive(Debug, Error)]
pub enum BookmarkError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlDe(#[from] toml::de::Error),

    #[error("TOML write error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("bookmark name is empty")]
    MissingName,

    #[error("bookmark {existing:?} already exists ({address})")]
    Conflict { existing: String, address: String },
}

/// What [`BookmarkStore::add`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Added,
    /// Same address under the same name; nothing changed.
    AlreadySaved,
    /// The address was saved under another name, which was dropped.
    Renamed { from: String },
    /// The name pointed at another address.
    Replaced { previous: String },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookmarkStore {
    #[serde(default)]
    servers: BTreeMap<String, String>,
}

impl BookmarkStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a store from `path`; a missing file is an empty store.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, BookmarkError> {
        let path = path.as_ref();
        if !path.exists() {
            info!("No bookmark file at {}, starting empty", path.display());
            return Ok(Self::new());
        }

        let content = std::fs::read_to_string(path)?;
        let store: Self = toml::from_str(&content)?;
        Ok(store)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), BookmarkError> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.servers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.servers.is_empty()
    }

    /// Raw `host:port` string saved under `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.servers.get(name).map(String::as_str)
    }

    /// Entries sorted by name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.servers.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.servers.remove(name)
    }

    /// Saves `target` under `name`.
    ///
    /// When the address is already saved under another name, or the name
    /// already points elsewhere, the change needs `overwrite`.
    pub fn add(
        &mut self,
        name: &str,
        target: &QueryTarget,
        overwrite: bool,
    ) -> Result<SaveOutcome, BookmarkError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(BookmarkError::MissingName);
        }

        let address = target.to_string();
        let existing = self
            .servers
            .iter()
            .find(|(_, addr)| **addr == address)
            .map(|(n, _)| n.clone());

        let outcome = match existing {
            Some(existing) if existing == name => return Ok(SaveOutcome::AlreadySaved),
            Some(existing) => {
                if !overwrite {
                    return Err(BookmarkError::Conflict { existing, address });
                }
                self.servers.remove(&existing);
                SaveOutcome::Renamed { from: existing }
            }
            None => match self.servers.get(name) {
                Some(previous) => {
                    if !overwrite {
                        return Err(BookmarkError::Conflict {
                            existing: name.to_string(),
                            address: previous.clone(),
                        });
                    }
                    SaveOutcome::Replaced {
                        previous: previous.clone(),
                    }
                }
                None => SaveOutcome::Added,
            },
        };

        self.servers.insert(name.to_string(), address);
        Ok(outcome)
    }

    /// Parses every bookmark. Entries that do not parse are returned
    /// separately so one bad line does not hide the rest.
    pub fn targets(&self) -> (Vec<(String, QueryTarget)>, Vec<(String, AddressParseError)>) {
        let mut targets = Vec::new();
        let mut invalid = Vec::new();

        for (name, address) in &self.servers {
            match QueryTarget::parse(address) {
                Ok(target) => targets.push((name.clone(), target)),
                Err(e) => {
                    warn!("Skipping bookmark {:?} ({:?}): {}", name, address, e);
                    invalid.push((name.clone(), e));
                }
            }
        }

        (targets, invalid)
    }
}
