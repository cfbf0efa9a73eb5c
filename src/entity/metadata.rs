use serde::{Deserialize, Serialize};

/// Frontmatter fields recognised on a content entry.
///
/// Every field is optional; unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Metadata {
    pub id: Option<String>,
    pub slug: Option<String>,
    pub title: Option<String>,
    pub summary: Option<String>,
    pub excerpt: Option<String>,
    pub description: Option<String>,
    pub date: Option<String>,
    pub tags: Vec<String>,
    #[serde(alias = "tech_stack", alias = "technologies")]
    pub tech_stack: Vec<String>,
    pub order: Option<i64>,
    pub featured: Option<bool>,
    pub draft: Option<bool>,
    pub metrics: Vec<Metric>,
    #[serde(alias = "cover_image", alias = "image")]
    pub cover_image: Option<String>,
    #[serde(alias = "repo_url", alias = "github")]
    pub repo_url: Option<String>,
    #[serde(alias = "live_url", alias = "demo")]
    pub live_url: Option<String>,
    pub category: Option<String>,
    pub author: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metric {
    pub label: String,
    pub value: String,
}
