//! Backing stores for content files.
//!
//! A store only knows how to enumerate the entries of a kind and hand back
//! their raw source text; parsing happens in [`crate::content`].

mod fs_store;
mod memory_store;

pub use fs_store::FsStore;
pub use memory_store::MemoryStore;

use std::path::Path;

use crate::entity::ContentKind;
use crate::error::Result;

/// Handle to one entry in a store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryRef {
    pub kind: ContentKind,
    /// Store-local key, e.g. a file name.
    pub key: String,
}

impl EntryRef {
    pub fn new(kind: ContentKind, key: impl Into<String>) -> Self {
        Self {
            kind,
            key: key.into(),
        }
    }

    /// Key without its extension, used as the fallback slug.
    pub fn stem(&self) -> &str {
        Path::new(&self.key)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(&self.key)
    }
}

/// Read-only access to content entries.
///
/// Implementations must enumerate entries in a stable order; collection
/// ordering ties fall back to it.
pub trait ContentStore: Send + Sync {
    /// List every entry of `kind`. Fails with `StoreUnavailable` if the kind
    /// cannot be enumerated.
    fn list_entries(&self, kind: ContentKind) -> Result<Vec<EntryRef>>;

    /// Read the raw source of one entry.
    fn read_entry(&self, entry: &EntryRef) -> Result<String>;
}
