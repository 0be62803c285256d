// Fri Oct 16 2026 - Alex

use crate::cache::entry::CacheEntry;
use crate::cache::error::{CacheError, CacheResult};
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// What sits under one identity in the cache file.
///
/// Records this version cannot read are kept verbatim so a rewrite never
/// deletes them; lookups only ever see readable entries.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
enum Slot {
    Entry(CacheEntry),
    Unreadable(Value),
}

impl Slot {
    fn entry(&self) -> Option<&CacheEntry> {
        match self {
            Slot::Entry(entry) => Some(entry),
            Slot::Unreadable(_) => None,
        }
    }
}

/// Write-through store of positive availability findings, keyed by film identity.
///
/// The whole mapping is held in memory for the run and rewritten to disk after
/// every [`CacheStore::put`], so a crash loses at most the item being recorded.
/// Loading never fails: a missing file is an empty cache and a malformed one is
/// logged and treated as empty.
#[derive(Debug, Clone)]
pub struct CacheStore {
    path: PathBuf,
    slots: IndexMap<String, Slot>,
}

impl CacheStore {
    pub fn empty(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            slots: IndexMap::new(),
        }
    }

    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();

        let slots = match Self::read_slots(&path) {
            Ok(slots) => slots,
            Err(e) => {
                log::warn!("Ignoring unreadable cache, starting empty: {}", e);
                IndexMap::new()
            }
        };

        let store = Self { path, slots };
        log::debug!("Loaded {} cache entries from {}", store.len(), store.path.display());
        store
    }

    fn read_slots(path: &Path) -> CacheResult<IndexMap<String, Slot>> {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(IndexMap::new()),
            Err(source) => {
                return Err(CacheError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let values: IndexMap<String, Value> =
            serde_json::from_str(&raw).map_err(|source| CacheError::Malformed {
                path: path.to_path_buf(),
                source,
            })?;

        let mut slots = IndexMap::with_capacity(values.len());
        for (identity, value) in values {
            match serde_json::from_value::<CacheEntry>(value.clone()) {
                Ok(entry) if entry.availability().is_cacheable() => {
                    slots.insert(identity, Slot::Entry(entry));
                }
                Ok(entry) => {
                    log::warn!(
                        "Dropping cache entry for {} with non-cacheable value {:?}",
                        identity,
                        entry.availability
                    );
                }
                Err(e) => {
                    log::warn!("Keeping unreadable cache entry for {} as-is: {}", identity, e);
                    slots.insert(identity, Slot::Unreadable(value));
                }
            }
        }

        Ok(slots)
    }

    pub fn get(&self, identity: &str) -> Option<&CacheEntry> {
        self.slots.get(identity).and_then(Slot::entry)
    }

    pub fn contains(&self, identity: &str) -> bool {
        self.get(identity).is_some()
    }

    /// Records an entry and immediately rewrites the backing file.
    ///
    /// Unknown fields of an entry being overwritten are carried over. The
    /// in-memory mapping is updated even when persisting fails; the error only
    /// means the update did not reach disk.
    pub fn put(&mut self, identity: &str, mut entry: CacheEntry) -> CacheResult<()> {
        if let Some(previous) = self.get(identity) {
            for (key, value) in &previous.extra {
                entry.extra.entry(key.clone()).or_insert_with(|| value.clone());
            }
        }

        self.slots.insert(identity.to_string(), Slot::Entry(entry));
        self.save()
    }

    pub fn save(&self) -> CacheResult<()> {
        let json = serde_json::to_string_pretty(&self.slots)?;

        let mut tmp_name = self.path.as_os_str().to_owned();
        tmp_name.push(".tmp");
        let tmp_path = PathBuf::from(tmp_name);

        fs::write(&tmp_path, json).map_err(|source| CacheError::Io {
            path: tmp_path.clone(),
            source,
        })?;

        fs::rename(&tmp_path, &self.path).map_err(|source| {
            let _ = fs::remove_file(&tmp_path);
            CacheError::Io {
                path: self.path.clone(),
                source,
            }
        })
    }

    /// Number of readable entries.
    pub fn len(&self) -> usize {
        self.slots.values().filter(|slot| slot.entry().is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn entries(&self) -> impl Iterator<Item = (&String, &CacheEntry)> {
        self.slots
            .iter()
            .filter_map(|(identity, slot)| slot.entry().map(|entry| (identity, entry)))
    }
}
