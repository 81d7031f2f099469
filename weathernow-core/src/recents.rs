//! Recent searches: the bounded recency list and its key-value sink.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{
    collections::HashMap,
    fs, io,
    path::{Path, PathBuf},
};

use crate::error::StoreError;

/// Fixed key the list is persisted under.
pub const RECENTS_KEY: &str = "recentWeatherSearches";

/// Maximum number of entries retained.
pub const MAX_RECENTS: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentSearchEntry {
    pub city: String,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub country: String,
    /// Stored as epoch milliseconds.
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
}

/// Most-recent-first, unique by city, at most [`MAX_RECENTS`] long.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct RecentSearches(Vec<RecentSearchEntry>);

impl RecentSearches {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from an arbitrary sequence; the first entry for a city wins.
    pub fn from_entries(entries: impl IntoIterator<Item = RecentSearchEntry>) -> Self {
        let mut list: Vec<RecentSearchEntry> = Vec::with_capacity(MAX_RECENTS);
        for entry in entries {
            if list.len() == MAX_RECENTS {
                break;
            }
            if !list.iter().any(|e| e.city == entry.city) {
                list.push(entry);
            }
        }
        Self(list)
    }

    /// Returns a new list with `entry` at the front.
    pub fn with_recorded(&self, entry: RecentSearchEntry) -> Self {
        let mut next = self.clone();
        next.record(entry);
        next
    }

    /// Move or insert `entry` at the front, dropping the oldest beyond the cap.
    pub fn record(&mut self, entry: RecentSearchEntry) {
        self.0.retain(|e| e.city != entry.city);
        self.0.insert(0, entry);
        self.0.truncate(MAX_RECENTS);
    }

    pub fn entries(&self) -> &[RecentSearchEntry] {
        &self.0
    }

    pub fn get(&self, index: usize) -> Option<&RecentSearchEntry> {
        self.0.get(index)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RecentSearchEntry> {
        self.0.iter()
    }
}

impl<'de> Deserialize<'de> for RecentSearches {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<RecentSearchEntry>::deserialize(deserializer).map(Self::from_entries)
    }
}

impl<'a> IntoIterator for &'a RecentSearches {
    type Item = &'a RecentSearchEntry;
    type IntoIter = std::slice::Iter<'a, RecentSearchEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// String values keyed by name.
pub trait KeyValueStore: Send {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// One file per key (`<dir>/<key>.json`). The directory is created on first write.
#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    dir: PathBuf,
}

impl FileKeyValueStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

fn io_error(path: &Path, source: io::Error) -> StoreError {
    StoreError::Io { path: path.display().to_string(), source }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(s) => Ok(Some(s)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(io_error(&path, e)),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir).map_err(|e| io_error(&self.dir, e))?;
        let path = self.path_for(key);
        fs::write(&path, value).map_err(|e| io_error(&path, e))
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryKeyValueStore {
    values: HashMap<String, String>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Reads and writes the recents list under [`RECENTS_KEY`].
///
/// Holds no list state of its own; callers build the list and hand it over.
#[derive(Debug, Clone)]
pub struct RecentSearchStore<S> {
    inner: S,
}

impl<S: KeyValueStore> RecentSearchStore<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }

    /// Never fails: unreadable or malformed content yields an empty list.
    pub fn load(&self) -> RecentSearches {
        let raw = match self.inner.get(RECENTS_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return RecentSearches::new(),
            Err(e) => {
                tracing::warn!("Could not read recent searches: {}", e);
                return RecentSearches::new();
            }
        };

        match serde_json::from_str::<RecentSearches>(&raw) {
            Ok(list) => list,
            Err(e) => {
                tracing::warn!("Discarding malformed recent searches: {}", e);
                RecentSearches::new()
            }
        }
    }

    /// Overwrite the persisted list.
    pub fn save(&mut self, recents: &RecentSearches) -> Result<(), StoreError> {
        let json = serde_json::to_string(recents)?;
        self.inner.set(RECENTS_KEY, &json)
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }
}
