//! Ordering, filtering and neighbour queries over a loaded collection.
//!
//! Everything here is a pure function of the slice it is given, so the
//! service can run it over a fresh read or a cached snapshot alike.

use serde::Serialize;

use crate::entity::ContentItem;

/// Apply the default collection order in place.
///
/// `order` ascending when every item defines it, otherwise date descending.
/// Both sorts are stable, so ties keep enumeration order.
pub fn sort_collection(items: &mut [ContentItem]) {
    if items.iter().all(|item| item.order.is_some()) {
        items.sort_by_key(|item| item.order);
    } else {
        items.sort_by(|a, b| b.published.cmp(&a.published));
    }
}

/// First item whose slug matches.
pub fn find<'a>(items: &'a [ContentItem], slug: &str) -> Option<&'a ContentItem> {
    items.iter().find(|item| item.slug == slug)
}

/// Neighbours of an item in collection order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Navigation {
    pub previous: Option<ContentItem>,
    pub next: Option<ContentItem>,
}

/// Previous/next items around `slug`, or `None` if `slug` is not in `items`.
pub fn navigation(items: &[ContentItem], slug: &str) -> Option<Navigation> {
    let index = items.iter().position(|item| item.slug == slug)?;
    Some(Navigation {
        previous: index.checked_sub(1).map(|i| items[i].clone()),
        next: items.get(index + 1).cloned(),
    })
}

/// Items sharing at least one tag with `slug`, most overlap first, at most
/// `limit` long. `None` if `slug` is not in `items`.
pub fn related(items: &[ContentItem], slug: &str, limit: usize) -> Option<Vec<ContentItem>> {
    let current = find(items, slug)?;
    let current_tags = current.tag_set();

    let mut ranked: Vec<(usize, &ContentItem)> = items
        .iter()
        .filter(|candidate| candidate.slug != slug)
        .map(|candidate| {
            let overlap = candidate
                .tag_set()
                .iter()
                .filter(|tag| current_tags.contains(tag))
                .count();
            (overlap, candidate)
        })
        .filter(|(overlap, _)| *overlap > 0)
        .collect();

    ranked.sort_by(|a, b| b.0.cmp(&a.0));

    Some(
        ranked
            .into_iter()
            .take(limit)
            .map(|(_, item)| item.clone())
            .collect(),
    )
}

/// Optional narrowing applied on top of the ordered collection.
#[derive(Debug, Default, Clone)]
pub struct ListFilter {
    /// Keep items carrying this tag (case-insensitive).
    pub tag: Option<String>,
    /// Keep only featured items.
    pub featured: bool,
    pub limit: Option<usize>,
}

impl ListFilter {
    pub fn apply(&self, items: &[ContentItem]) -> Vec<ContentItem> {
        let limit = self.limit.unwrap_or(usize::MAX);
        items
            .iter()
            .filter(|item| !self.featured || item.featured)
            .filter(|item| self.tag.as_deref().map_or(true, |tag| item.has_tag(tag)))
            .take(limit)
            .cloned()
            .collect()
    }
}
