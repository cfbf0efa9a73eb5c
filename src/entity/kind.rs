use serde::{Deserialize, Serialize};

/// Category of content with its own store directory and public route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Project,
    Article,
}

impl ContentKind {
    pub const ALL: [ContentKind; 2] = [ContentKind::Project, ContentKind::Article];

    /// Directory under the content root holding this kind's files.
    pub fn dir_name(&self) -> &'static str {
        match self {
            ContentKind::Project => "projects",
            ContentKind::Article => "articles",
        }
    }

    /// Public page prefix, used when building absolute URLs.
    pub fn route_prefix(&self) -> &'static str {
        match self {
            ContentKind::Project => "/projects",
            ContentKind::Article => "/blog",
        }
    }
}

impl std::fmt::Display for ContentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContentKind::Project => write!(f, "project"),
            ContentKind::Article => write!(f, "article"),
        }
    }
}

impl std::str::FromStr for ContentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "project" | "projects" => Ok(ContentKind::Project),
            "article" | "articles" | "blog" | "post" | "posts" => Ok(ContentKind::Article),
            _ => Err(format!("Invalid content kind: {}", s)),
        }
    }
}
