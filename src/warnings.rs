//! Content checks for a loaded collection.
//!
//! None of these stop a collection from being served; they flag content
//! that will render or order differently than its author likely expects.

use std::collections::HashMap;

use crate::entity::{ContentItem, ContentKind};

/// A problem found in a kind's content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// Several items resolve to the same slug; lookups return the first.
    DuplicateSlug {
        kind: ContentKind,
        slug: String,
        count: usize,
    },
    /// Date missing or not parseable; the item sorts after dated items.
    MissingDate { kind: ContentKind, slug: String },
    /// Some but not all items set `order`, so date ordering applies.
    PartialOrder {
        kind: ContentKind,
        with_order: usize,
        total: usize,
    },
    /// No tags, so the item is never related to anything.
    Untagged { kind: ContentKind, slug: String },
}

/// Check a collection and return any warnings, in collection order.
pub fn check_collection(kind: ContentKind, items: &[ContentItem]) -> Vec<Warning> {
    let mut warnings = Vec::new();

    let mut counts: HashMap<&str, usize> = HashMap::new();
    for item in items {
        *counts.entry(item.slug.as_str()).or_default() += 1;
    }
    let mut reported: Vec<&str> = Vec::new();
    for item in items {
        let count = counts[item.slug.as_str()];
        if count > 1 && !reported.contains(&item.slug.as_str()) {
            reported.push(item.slug.as_str());
            warnings.push(Warning::DuplicateSlug {
                kind,
                slug: item.slug.clone(),
                count,
            });
        }
    }

    let with_order = items.iter().filter(|i| i.order.is_some()).count();
    if with_order > 0 && with_order < items.len() {
        warnings.push(Warning::PartialOrder {
            kind,
            with_order,
            total: items.len(),
        });
    }

    // Dates only drive ordering when `order` is not in effect.
    let ordered_by_date = with_order < items.len();
    for item in items {
        if ordered_by_date && item.published.is_none() {
            warnings.push(Warning::MissingDate {
                kind,
                slug: item.slug.clone(),
            });
        }
        if item.tags.is_empty() {
            warnings.push(Warning::Untagged {
                kind,
                slug: item.slug.clone(),
            });
        }
    }

    warnings
}

/// Format a warning for display.
pub fn format_warning(warning: &Warning) -> String {
    match warning {
        Warning::DuplicateSlug { kind, slug, count } => format!(
            "Warning: {} slug '{}' is used by {} items - only the first is reachable",
            kind, slug, count
        ),
        Warning::MissingDate { kind, slug } => format!(
            "Warning: {} '{}' has no valid date - it sorts last",
            kind, slug
        ),
        Warning::PartialOrder {
            kind,
            with_order,
            total,
        } => format!(
            "Warning: {} of {} {} items set 'order' - falling back to date ordering",
            with_order, total, kind
        ),
        Warning::Untagged { kind, slug } => format!(
            "Warning: {} '{}' has no tags - it will never appear as related",
            kind, slug
        ),
    }
}
