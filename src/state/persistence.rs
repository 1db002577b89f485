use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use crate::engine::constants::{ACTIVITY_KEY, SELECTIONS_KEY, WEIGHT_KEY};
use crate::error::{Result, TrackerError};
use crate::models::{sanitize_weight, PersistedSnapshot, ProfileState, SelectionEntry};

/// A string key-value store that survives restarts.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;

    /// Write several keys at once. Stores that persist eagerly should
    /// override this so all keys land in a single write.
    fn set_many(&mut self, pairs: &[(&str, String)]) -> Result<()> {
        for (key, value) in pairs {
            self.set(key, value)?;
        }
        Ok(())
    }
}

/// Store kept in memory only.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Store backed by a single JSON object file.
///
/// The whole file is rewritten on every change.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl JsonFileStore {
    /// Open a store. A missing file starts empty; an unreadable one is
    /// discarded with a warning.
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let entries = match fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                tracing::warn!("Ignoring corrupt state file {}: {}", path.display(), e);
                BTreeMap::new()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                tracing::warn!("Cannot read state file {}: {}", path.display(), e);
                BTreeMap::new()
            }
        };
        Self { path, entries }
    }

    fn flush(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.entries)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        self.flush()
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        if self.entries.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }

    fn set_many(&mut self, pairs: &[(&str, String)]) -> Result<()> {
        for (key, value) in pairs {
            self.entries.insert(key.to_string(), value.clone());
        }
        self.flush()
    }
}

/// Read one key, treating store errors as absence.
fn read_key<S: KeyValueStore + ?Sized>(store: &S, key: &str) -> Option<String> {
    store.get(key).unwrap_or_else(|e| {
        tracing::warn!("Cannot read '{}' from store: {}", key, e);
        None
    })
}

fn parse_weight(key: &str, raw: &str) -> Result<f64> {
    let weight: f64 = raw.trim().parse().map_err(|_| TrackerError::PersistenceCorrupt {
        key: key.to_string(),
        reason: format!("'{}' is not a number", raw),
    })?;
    Ok(sanitize_weight(weight))
}

fn parse_selections(key: &str, raw: &str) -> Result<Vec<SelectionEntry>> {
    serde_json::from_str(raw).map_err(|e| TrackerError::PersistenceCorrupt {
        key: key.to_string(),
        reason: e.to_string(),
    })
}

/// Restore the last snapshot.
///
/// Never fails: each missing or corrupt key falls back to its default.
pub fn load_snapshot<S: KeyValueStore + ?Sized>(store: &S) -> PersistedSnapshot {
    let mut snapshot = PersistedSnapshot::default();

    if let Some(raw) = read_key(store, WEIGHT_KEY) {
        match parse_weight(WEIGHT_KEY, &raw) {
            Ok(weight) => snapshot.profile.weight = weight,
            Err(e) => tracing::warn!("{}", e),
        }
    }

    if let Some(raw) = read_key(store, ACTIVITY_KEY) {
        let raw = raw.trim();
        if !raw.is_empty() {
            snapshot.profile.activity_key = raw.to_string();
        }
    }

    if let Some(raw) = read_key(store, SELECTIONS_KEY) {
        match parse_selections(SELECTIONS_KEY, &raw) {
            Ok(selections) => snapshot.selections = selections,
            Err(e) => tracing::warn!("{}", e),
        }
    }

    snapshot
}

/// Write profile and selections under their keys in one batch.
pub fn save_snapshot<S: KeyValueStore + ?Sized>(
    store: &mut S,
    profile: &ProfileState,
    selections: &[SelectionEntry],
) -> Result<()> {
    let selections = serde_json::to_string(selections)?;
    store.set_many(&[
        (WEIGHT_KEY, profile.weight.to_string()),
        (ACTIVITY_KEY, profile.activity_key.clone()),
        (SELECTIONS_KEY, selections),
    ])
}
