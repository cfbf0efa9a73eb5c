use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};

use crate::entity::{ContentItem, ContentKind};

struct CachedCollection {
    loaded_at: Instant,
    items: Arc<Vec<ContentItem>>,
}

/// Time-bounded cache of assembled collections, one slot per kind.
///
/// Entries older than the TTL are treated as absent. Nothing is shared
/// between processes, so a restart always starts cold.
pub struct CollectionCache {
    ttl: Duration,
    entries: Mutex<HashMap<ContentKind, CachedCollection>>,
}

impl CollectionCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Fresh collection for `kind`, if one is held.
    pub fn get(&self, kind: ContentKind) -> Option<Arc<Vec<ContentItem>>> {
        let mut entries = self.lock();
        let fresh = entries
            .get(&kind)
            .filter(|cached| cached.loaded_at.elapsed() < self.ttl)
            .map(|cached| Arc::clone(&cached.items));
        if fresh.is_none() {
            entries.remove(&kind);
        }
        fresh
    }

    pub fn put(&self, kind: ContentKind, items: Arc<Vec<ContentItem>>) {
        self.lock().insert(
            kind,
            CachedCollection {
                loaded_at: Instant::now(),
                items,
            },
        );
    }

    /// Drop every cached collection.
    pub fn invalidate(&self) {
        self.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<ContentKind, CachedCollection>> {
        // Slots are replaced whole, so a poisoned map is still consistent.
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}
