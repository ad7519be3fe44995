// Locale-keyed dictionary table.

use std::time::Duration;

use hashbrown::HashMap;
use spellmount_core::SpellChecker;

use crate::mount::MountLease;

/// One loaded dictionary: the engine instance, accumulated selected-time,
/// and the mount lease that releases its virtual-filesystem footprint.
pub struct DictionaryEntry {
    checker: Box<dyn SpellChecker>,
    uptime: Duration,
    lease: MountLease,
}

impl DictionaryEntry {
    pub(crate) fn new(checker: Box<dyn SpellChecker>, lease: MountLease) -> Self {
        Self {
            checker,
            uptime: Duration::ZERO,
            lease,
        }
    }

    /// The engine instance bound to this dictionary.
    pub fn checker(&self) -> &dyn SpellChecker {
        self.checker.as_ref()
    }

    /// Cumulative wall-clock time this dictionary has spent selected.
    pub fn uptime(&self) -> Duration {
        self.uptime
    }

    pub(crate) fn add_uptime(&mut self, elapsed: Duration) {
        self.uptime += elapsed;
    }

    /// Consume the entry, yielding the lease for release. The engine
    /// instance is dropped here.
    pub(crate) fn into_lease(self) -> MountLease {
        self.lease
    }
}

/// Mapping from locale key to loaded dictionary.
///
/// Never two entries share a key. Iteration order is the map's own and is
/// what the fallback-quorum spell check walks.
#[derive(Default)]
pub struct DictionaryTable {
    entries: HashMap<String, DictionaryEntry>,
}

impl DictionaryTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&DictionaryEntry> {
        self.entries.get(key)
    }

    pub(crate) fn get_mut(&mut self, key: &str) -> Option<&mut DictionaryEntry> {
        self.entries.get_mut(key)
    }

    pub(crate) fn insert(&mut self, key: String, entry: DictionaryEntry) {
        self.entries.insert(key, entry);
    }

    pub(crate) fn remove(&mut self, key: &str) -> Option<DictionaryEntry> {
        self.entries.remove(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &DictionaryEntry)> {
        self.entries.iter().map(|(key, entry)| (key.as_str(), entry))
    }

    /// Registered keys, most-used-while-selected first. Order among equal
    /// uptimes is unspecified.
    pub fn keys_by_uptime(&self) -> Vec<String> {
        let mut keys: Vec<(&String, Duration)> = self
            .entries
            .iter()
            .map(|(key, entry)| (key, entry.uptime))
            .collect();
        keys.sort_by(|a, b| b.1.cmp(&a.1));
        keys.into_iter().map(|(key, _)| key.clone()).collect()
    }
}
