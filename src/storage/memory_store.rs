use std::collections::HashMap;

use super::{ContentStore, EntryRef};
use crate::entity::ContentKind;
use crate::error::{FolioError, Result};

/// In-process store, keeping entries in insertion order.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<ContentKind, Vec<(String, String)>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(
        mut self,
        kind: ContentKind,
        key: impl Into<String>,
        source: impl Into<String>,
    ) -> Self {
        self.insert(kind, key, source);
        self
    }

    /// Add an entry, replacing any existing entry with the same key.
    pub fn insert(&mut self, kind: ContentKind, key: impl Into<String>, source: impl Into<String>) {
        let key = key.into();
        let source = source.into();
        let entries = self.entries.entry(kind).or_default();
        match entries.iter_mut().find(|(k, _)| *k == key) {
            Some(existing) => existing.1 = source,
            None => entries.push((key, source)),
        }
    }
}

impl ContentStore for MemoryStore {
    fn list_entries(&self, kind: ContentKind) -> Result<Vec<EntryRef>> {
        Ok(self
            .entries
            .get(&kind)
            .map(|entries| {
                entries
                    .iter()
                    .map(|(key, _)| EntryRef::new(kind, key.clone()))
                    .collect()
            })
            .unwrap_or_default())
    }

    fn read_entry(&self, entry: &EntryRef) -> Result<String> {
        self.entries
            .get(&entry.kind)
            .and_then(|entries| entries.iter().find(|(key, _)| *key == entry.key))
            .map(|(_, source)| source.clone())
            .ok_or_else(|| FolioError::not_found(entry.kind, entry.key.clone()))
    }
}
