use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::{ContentStore, EntryRef};
use crate::entity::ContentKind;
use crate::error::{FolioError, Result};

const EXTENSIONS: &[&str] = &["md", "mdx"];

/// Content laid out as `<root>/<kind dir>/<slug>.md(x)`.
#[derive(Debug, Clone)]
pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn kind_dir(&self, kind: ContentKind) -> PathBuf {
        self.root.join(kind.dir_name())
    }
}

fn is_content_file(path: &Path) -> bool {
    let hidden = path
        .file_name()
        .and_then(|n| n.to_str())
        .map_or(true, |n| n.starts_with('.'));
    let ext_ok = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()));
    !hidden && ext_ok && path.is_file()
}

impl ContentStore for FsStore {
    fn list_entries(&self, kind: ContentKind) -> Result<Vec<EntryRef>> {
        let dir = self.kind_dir(kind);
        let unavailable =
            |e: std::io::Error| FolioError::StoreUnavailable(format!("{}: {}", dir.display(), e));

        let mut keys = Vec::new();
        for entry in fs::read_dir(&dir).map_err(unavailable)? {
            let path = entry.map_err(unavailable)?.path();
            if !is_content_file(&path) {
                continue;
            }
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                keys.push(name.to_string());
            }
        }
        keys.sort();

        debug!(kind = %kind, dir = %dir.display(), count = keys.len(), "listed content entries");
        Ok(keys.into_iter().map(|key| EntryRef::new(kind, key)).collect())
    }

    fn read_entry(&self, entry: &EntryRef) -> Result<String> {
        let path = self.kind_dir(entry.kind).join(&entry.key);
        Ok(fs::read_to_string(path)?)
    }
}
