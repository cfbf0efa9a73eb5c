//! XML sitemap of the static routes plus every published content item.

use tracing::warn;

use crate::config::Config;
use crate::content::ContentService;
use crate::entity::ContentKind;

const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// One `<url>` element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SitemapEntry {
    pub path: String,
    /// `YYYY-MM-DD`
    pub lastmod: Option<String>,
}

impl SitemapEntry {
    pub fn route(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            lastmod: None,
        }
    }
}

/// Collect the static routes followed by each kind's items in collection
/// order. A kind whose store cannot be read is left out.
pub async fn collect_entries(config: &Config, service: &ContentService) -> Vec<SitemapEntry> {
    let mut entries: Vec<SitemapEntry> = config
        .static_routes
        .iter()
        .map(|route| SitemapEntry::route(route.clone()))
        .collect();

    for kind in ContentKind::ALL {
        match service.all(kind).await {
            Ok(items) => entries.extend(items.into_iter().map(|item| SitemapEntry {
                path: format!("{}/{}", kind.route_prefix(), item.slug),
                lastmod: item.published.map(|d| d.format("%Y-%m-%d").to_string()),
            })),
            Err(err) => warn!(kind = %kind, error = %err, "leaving kind out of sitemap"),
        }
    }

    entries
}

pub async fn generate_sitemap(config: &Config, service: &ContentService) -> String {
    let entries = collect_entries(config, service).await;
    render_sitemap(config.origin(), &entries)
}

/// Render entries as a sitemap document rooted at `origin`.
pub fn render_sitemap(origin: &str, entries: &[SitemapEntry]) -> String {
    let origin = origin.trim_end_matches('/');
    let mut xml = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    xml.push_str(&format!("<urlset xmlns=\"{}\">\n", SITEMAP_NS));

    for entry in entries {
        let path = if entry.path.starts_with('/') {
            entry.path.clone()
        } else {
            format!("/{}", entry.path)
        };
        xml.push_str("  <url>\n");
        xml.push_str(&format!("    <loc>{}</loc>\n", escape_xml(&format!("{}{}", origin, path))));
        if let Some(lastmod) = &entry.lastmod {
            xml.push_str(&format!("    <lastmod>{}</lastmod>\n", escape_xml(lastmod)));
        }
        xml.push_str("  </url>\n");
    }

    xml.push_str("</urlset>\n");
    xml
}

fn escape_xml(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
