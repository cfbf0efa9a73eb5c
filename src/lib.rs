pub mod cache;
pub mod cli;
pub mod config;
pub mod content;
pub mod entity;
pub mod error;
pub mod logging;
pub mod server;
pub mod sitemap;
pub mod storage;
pub mod warnings;

pub use cache::CollectionCache;
pub use config::Config;
pub use content::ContentService;
pub use entity::{ContentItem, ContentKind};
pub use error::{FolioError, Result};
