//! Concurrent enumeration and parsing of a kind's raw entries.

use std::sync::Arc;

use tokio::task::JoinSet;
use tracing::warn;

use crate::content::frontmatter::parse_entry;
use crate::entity::{ContentKind, Metadata};
use crate::error::{FolioError, Result};
use crate::storage::ContentStore;

/// One successfully parsed entry, before field derivation.
#[derive(Debug, Clone)]
pub struct RawEntry {
    pub key: String,
    pub metadata: Metadata,
    pub body: String,
}

/// Enumerate and parse every entry of `kind`, in store order.
///
/// Entries are read in parallel on the blocking pool. Entries that cannot
/// be read or parsed are logged and skipped; only a failure to enumerate
/// the kind is returned as an error.
pub async fn list_raw(store: Arc<dyn ContentStore>, kind: ContentKind) -> Result<Vec<RawEntry>> {
    let lister = Arc::clone(&store);
    let entries = tokio::task::spawn_blocking(move || lister.list_entries(kind))
        .await
        .map_err(|e| FolioError::StoreUnavailable(format!("listing {} failed: {}", kind, e)))??;

    let mut slots: Vec<Option<RawEntry>> = vec![None; entries.len()];
    let mut reads = JoinSet::new();
    for (index, entry) in entries.into_iter().enumerate() {
        let store = Arc::clone(&store);
        reads.spawn_blocking(move || {
            let source = store.read_entry(&entry);
            (index, entry, source)
        });
    }

    while let Some(joined) = reads.join_next().await {
        let (index, entry, source) = joined
            .map_err(|e| FolioError::StoreUnavailable(format!("reading {} failed: {}", kind, e)))?;

        match source.and_then(|source| parse_entry(&entry.key, &source)) {
            Ok((mut metadata, body)) => {
                if is_blank(&metadata.id) && is_blank(&metadata.slug) {
                    metadata.slug = Some(entry.stem().to_string());
                }
                slots[index] = Some(RawEntry {
                    key: entry.key,
                    metadata,
                    body,
                });
            }
            Err(err) => {
                warn!(kind = %kind, key = %entry.key, error = %err, "skipping content entry");
            }
        }
    }

    Ok(slots.into_iter().flatten().collect())
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, |v| v.trim().is_empty())
}
