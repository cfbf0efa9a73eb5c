mod collection_cache;

pub use collection_cache::CollectionCache;
