//! Content resolution: reading a kind's entries, deriving fields, ordering
//! the collection and answering slug, navigation and relatedness queries.

pub mod collection;
pub mod derive;
pub mod frontmatter;
pub mod reader;
pub mod slug;

pub use collection::{ListFilter, Navigation};
pub use derive::{derive, reading_time};
pub use slug::slugify;

use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::cache::CollectionCache;
use crate::config::Config;
use crate::entity::{ContentItem, ContentKind};
use crate::error::{FolioError, Result};
use crate::storage::{ContentStore, FsStore};

pub const DEFAULT_RELATED_LIMIT: usize = 3;
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(3);

/// Single entry point for every content query, parametrised by kind.
///
/// Without a cache every call re-reads the store.
pub struct ContentService {
    store: Arc<dyn ContentStore>,
    cache: Option<CollectionCache>,
    read_timeout: Duration,
    related_limit: usize,
}

impl ContentService {
    pub fn new(store: Arc<dyn ContentStore>) -> Self {
        Self {
            store,
            cache: None,
            read_timeout: DEFAULT_READ_TIMEOUT,
            related_limit: DEFAULT_RELATED_LIMIT,
        }
    }

    /// Filesystem-backed service configured from `config`.
    pub fn from_config(config: &Config) -> Self {
        let mut service = Self::new(Arc::new(FsStore::new(config.content_dir.clone())))
            .with_read_timeout(config.read_timeout())
            .with_related_limit(config.related_limit);
        if let Some(ttl) = config.cache_ttl() {
            service = service.with_cache(CollectionCache::new(ttl));
        }
        service
    }

    pub fn with_cache(mut self, cache: CollectionCache) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn with_read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = timeout;
        self
    }

    pub fn with_related_limit(mut self, limit: usize) -> Self {
        self.related_limit = limit;
        self
    }

    pub fn cache(&self) -> Option<&CollectionCache> {
        self.cache.as_ref()
    }

    /// Every published item of `kind`, in collection order.
    pub async fn all(&self, kind: ContentKind) -> Result<Vec<ContentItem>> {
        Ok(self.collection(kind).await?.as_ref().clone())
    }

    /// Ordered collection filtered by `filter`.
    pub async fn list(&self, kind: ContentKind, filter: &ListFilter) -> Result<Vec<ContentItem>> {
        let items = self.collection(kind).await?;
        Ok(filter.apply(&items))
    }

    pub async fn featured(&self, kind: ContentKind) -> Result<Vec<ContentItem>> {
        let filter = ListFilter {
            featured: true,
            ..ListFilter::default()
        };
        self.list(kind, &filter).await
    }

    /// Item with `slug`, first match in collection order.
    pub async fn by_slug(&self, kind: ContentKind, slug: &str) -> Result<Option<ContentItem>> {
        let items = self.collection(kind).await?;
        Ok(collection::find(&items, slug).cloned())
    }

    pub async fn navigation(&self, kind: ContentKind, slug: &str) -> Result<Option<Navigation>> {
        let items = self.collection(kind).await?;
        Ok(collection::navigation(&items, slug))
    }

    /// Items sharing tags with `slug`; `limit` defaults to the configured
    /// related limit.
    pub async fn related(
        &self,
        kind: ContentKind,
        slug: &str,
        limit: Option<usize>,
    ) -> Result<Option<Vec<ContentItem>>> {
        let items = self.collection(kind).await?;
        Ok(collection::related(
            &items,
            slug,
            limit.unwrap_or(self.related_limit),
        ))
    }

    /// Like [`by_slug`](Self::by_slug) but with absence as an error.
    pub async fn require(&self, kind: ContentKind, slug: &str) -> Result<ContentItem> {
        self.by_slug(kind, slug)
            .await?
            .ok_or_else(|| FolioError::not_found(kind, slug))
    }

    async fn collection(&self, kind: ContentKind) -> Result<Arc<Vec<ContentItem>>> {
        if let Some(items) = self.cache.as_ref().and_then(|cache| cache.get(kind)) {
            debug!(kind = %kind, count = items.len(), "collection cache hit");
            return Ok(items);
        }

        let items = Arc::new(self.load(kind).await?);
        if let Some(cache) = &self.cache {
            cache.put(kind, Arc::clone(&items));
        }
        Ok(items)
    }

    async fn load(&self, kind: ContentKind) -> Result<Vec<ContentItem>> {
        let raw = tokio::time::timeout(
            self.read_timeout,
            reader::list_raw(Arc::clone(&self.store), kind),
        )
        .await
        .map_err(|_| {
            FolioError::StoreUnavailable(format!(
                "reading {} content timed out after {}ms",
                kind,
                self.read_timeout.as_millis()
            ))
        })??;

        let mut items: Vec<ContentItem> = raw
            .into_iter()
            .filter(|entry| !entry.metadata.draft.unwrap_or(false))
            .map(|entry| derive(kind, entry.metadata, entry.body))
            .collect();
        collection::sort_collection(&mut items);

        debug!(kind = %kind, count = items.len(), "loaded collection");
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::ContentKind::{Article, Project};
    use crate::storage::{EntryRef, MemoryStore};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn article(slug: &str, date: &str, tags: &str) -> String {
        format!("---\nid: {slug}\ntitle: {slug}\ndate: {date}\ntags: [{tags}]\n---\nbody of {slug}\n")
    }

    fn scenario_service() -> ContentService {
        let store = MemoryStore::new()
            .with_entry(Article, "a.md", article("a", "2024-01-01", "x, y"))
            .with_entry(Article, "b.md", article("b", "2024-02-01", "y, z"))
            .with_entry(Article, "c.md", article("c", "2024-03-01", "q"));
        ContentService::new(Arc::new(store))
    }

    fn slugs(items: &[ContentItem]) -> Vec<&str> {
        items.iter().map(|i| i.slug.as_str()).collect()
    }

    /// Counts enumerations so tests can observe re-reads.
    struct CountingStore {
        inner: MemoryStore,
        lists: AtomicUsize,
    }

    impl ContentStore for CountingStore {
        fn list_entries(&self, kind: ContentKind) -> Result<Vec<EntryRef>> {
            self.lists.fetch_add(1, Ordering::SeqCst);
            self.inner.list_entries(kind)
        }

        fn read_entry(&self, entry: &EntryRef) -> Result<String> {
            self.inner.read_entry(entry)
        }
    }

    struct SlowStore;

    impl ContentStore for SlowStore {
        fn list_entries(&self, _kind: ContentKind) -> Result<Vec<EntryRef>> {
            std::thread::sleep(Duration::from_millis(200));
            Ok(Vec::new())
        }

        fn read_entry(&self, entry: &EntryRef) -> Result<String> {
            Err(FolioError::not_found(entry.kind, entry.key.clone()))
        }
    }

    #[tokio::test]
    async fn test_all_orders_by_date_descending() {
        let service = scenario_service();
        let items = service.all(Article).await.unwrap();
        assert_eq!(slugs(&items), vec!["c", "b", "a"]);
    }

    #[tokio::test]
    async fn test_all_is_idempotent() {
        let service = scenario_service();
        assert_eq!(service.all(Article).await.unwrap(), service.all(Article).await.unwrap());
    }

    #[tokio::test]
    async fn test_all_orders_by_explicit_order() {
        let store = MemoryStore::new()
            .with_entry(Project, "one.md", "---\norder: 2\ndate: 2024-05-01\n---\n")
            .with_entry(Project, "two.md", "---\norder: 1\ndate: 2020-01-01\n---\n");
        let service = ContentService::new(Arc::new(store));
        let items = service.all(Project).await.unwrap();
        assert_eq!(slugs(&items), vec!["two", "one"]);
    }

    #[tokio::test]
    async fn test_by_slug() {
        let service = scenario_service();
        let item = service.by_slug(Article, "b").await.unwrap().unwrap();
        assert_eq!(item.slug, "b");
        assert_eq!(item.reading_time, 1);
        assert!(service.by_slug(Article, "missing").await.unwrap().is_none());
        assert!(service.by_slug(Project, "b").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_require_maps_absence_to_not_found() {
        let service = scenario_service();
        let err = service.require(Article, "missing").await.unwrap_err();
        assert!(matches!(err, FolioError::NotFound { kind: Article, .. }));
    }

    #[tokio::test]
    async fn test_navigation_scenario() {
        let service = scenario_service();
        let nav = service.navigation(Article, "b").await.unwrap().unwrap();
        assert_eq!(nav.previous.unwrap().slug, "c");
        assert_eq!(nav.next.unwrap().slug, "a");
        assert!(service.navigation(Article, "missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_related_scenario() {
        let service = scenario_service();
        let related = service.related(Article, "a", Some(1)).await.unwrap().unwrap();
        assert_eq!(slugs(&related), vec!["b"]);
        assert!(service.related(Article, "c", None).await.unwrap().unwrap().is_empty());
        assert!(service.related(Article, "missing", None).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_drafts_are_excluded() {
        let store = MemoryStore::new()
            .with_entry(Article, "live.md", "---\ndate: 2024-01-01\n---\n")
            .with_entry(Article, "wip.md", "---\ndraft: true\n---\n");
        let service = ContentService::new(Arc::new(store));
        assert_eq!(slugs(&service.all(Article).await.unwrap()), vec!["live"]);
    }

    #[tokio::test]
    async fn test_featured_and_list_filter() {
        let store = MemoryStore::new()
            .with_entry(Project, "a.md", "---\nfeatured: true\ntechStack: [Rust]\ndate: 2024-01-01\n---\n")
            .with_entry(Project, "b.md", "---\ntechStack: [Go]\ndate: 2024-02-01\n---\n");
        let service = ContentService::new(Arc::new(store));

        assert_eq!(slugs(&service.featured(Project).await.unwrap()), vec!["a"]);
        let filter = ListFilter {
            tag: Some("go".to_string()),
            ..ListFilter::default()
        };
        assert_eq!(slugs(&service.list(Project, &filter).await.unwrap()), vec!["b"]);
    }

    #[tokio::test]
    async fn test_without_cache_every_call_rereads() {
        let store = Arc::new(CountingStore {
            inner: MemoryStore::new().with_entry(Article, "a.md", article("a", "2024-01-01", "x")),
            lists: AtomicUsize::new(0),
        });
        let service = ContentService::new(store.clone());
        service.all(Article).await.unwrap();
        service.by_slug(Article, "a").await.unwrap();
        assert_eq!(store.lists.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_cache_serves_repeat_reads() {
        let store = Arc::new(CountingStore {
            inner: MemoryStore::new().with_entry(Article, "a.md", article("a", "2024-01-01", "x")),
            lists: AtomicUsize::new(0),
        });
        let service = ContentService::new(store.clone())
            .with_cache(CollectionCache::new(Duration::from_secs(3600)));
        service.all(Article).await.unwrap();
        service.navigation(Article, "a").await.unwrap();
        assert_eq!(store.lists.load(Ordering::SeqCst), 1);

        service.cache().unwrap().invalidate();
        service.all(Article).await.unwrap();
        assert_eq!(store.lists.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_store_errors_are_not_cached() {
        let tmp = tempfile::TempDir::new().unwrap();
        let service = ContentService::new(Arc::new(FsStore::new(tmp.path())))
            .with_cache(CollectionCache::new(Duration::from_secs(3600)));

        let err = service.all(Article).await.unwrap_err();
        assert!(matches!(err, FolioError::StoreUnavailable(_)));
        assert!(service.cache().unwrap().is_empty());

        std::fs::create_dir_all(tmp.path().join("articles")).unwrap();
        assert!(service.all(Article).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_timeout_surfaces_store_unavailable() {
        let service =
            ContentService::new(Arc::new(SlowStore)).with_read_timeout(Duration::from_millis(20));
        let err = service.all(Article).await.unwrap_err();
        assert!(matches!(err, FolioError::StoreUnavailable(ref msg) if msg.contains("timed out")));
    }
}
