mod kind;
mod metadata;

pub use kind::ContentKind;
pub use metadata::{Metadata, Metric};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single piece of published content, with every derived field resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentItem {
    pub slug: String,
    pub kind: ContentKind,
    pub title: String,
    pub summary: String,
    /// Date as authored in frontmatter, empty when absent.
    pub date: String,
    pub tags: Vec<String>,
    pub order: Option<i64>,
    pub featured: bool,
    pub body: String,
    pub reading_time: u32,
    pub cover_image: Option<String>,
    pub repo_url: Option<String>,
    pub live_url: Option<String>,
    pub category: Option<String>,
    pub author: Option<String>,
    pub metrics: Vec<Metric>,
    /// Parsed form of `date`, used only for ordering.
    #[serde(skip)]
    pub published: Option<DateTime<Utc>>,
}

impl ContentItem {
    /// Lowercased, de-duplicated tag set used for relatedness.
    pub fn tag_set(&self) -> Vec<String> {
        let mut set: Vec<String> = Vec::with_capacity(self.tags.len());
        for tag in &self.tags {
            let tag = tag.to_lowercase();
            if !set.contains(&tag) {
                set.push(tag);
            }
        }
        set
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        let tag = tag.to_lowercase();
        self.tags.iter().any(|t| t.to_lowercase() == tag)
    }
}
