//! Turns parsed frontmatter and body into a fully resolved [`ContentItem`].

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::content::slug::slugify;
use crate::entity::{ContentItem, ContentKind, Metadata};

pub const WORDS_PER_MINUTE: usize = 200;

/// Build a content item from its metadata and body. Never fails; every
/// missing field resolves to its default.
pub fn derive(kind: ContentKind, metadata: Metadata, body: String) -> ContentItem {
    let Metadata {
        id,
        slug,
        title,
        summary,
        excerpt,
        description,
        date,
        tags,
        tech_stack,
        order,
        featured,
        draft: _,
        metrics,
        cover_image,
        repo_url,
        live_url,
        category,
        author,
    } = metadata;

    let title = non_blank(title);
    let slug = non_blank(id)
        .or_else(|| non_blank(slug))
        .unwrap_or_else(|| slugify(title.as_deref().unwrap_or("")));
    let title = title.unwrap_or_else(|| slug.clone());

    let summary = non_blank(summary)
        .or_else(|| non_blank(excerpt))
        .or_else(|| non_blank(description))
        .unwrap_or_default();

    let date = date.map(|d| d.trim().to_string()).unwrap_or_default();
    let published = parse_date(&date);

    ContentItem {
        slug,
        kind,
        title,
        summary,
        date,
        tags: resolve_tags(kind, tags, tech_stack),
        order,
        featured: featured.unwrap_or(false),
        reading_time: reading_time(&body),
        body,
        cover_image: non_blank(cover_image),
        repo_url: non_blank(repo_url),
        live_url: non_blank(live_url),
        category: non_blank(category),
        author: non_blank(author),
        metrics,
        published,
    }
}

/// Minutes needed to read `body`, at least one.
pub fn reading_time(body: &str) -> u32 {
    let minutes = word_count(body).div_ceil(WORDS_PER_MINUTE).max(1);
    u32::try_from(minutes).unwrap_or(u32::MAX)
}

pub fn word_count(body: &str) -> usize {
    body.split_whitespace().count()
}

/// Parse an authored date. Accepts RFC 3339 timestamps, naive
/// `YYYY-MM-DDTHH:MM:SS` timestamps and plain `YYYY-MM-DD` dates.
pub fn parse_date(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
        return Some(DateTime::from_naive_utc_and_offset(dt, Utc));
    }

    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        let datetime = date.and_hms_opt(0, 0, 0)?;
        return Some(DateTime::from_naive_utc_and_offset(datetime, Utc));
    }

    None
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

// Projects merge tags with their tech stack; articles only fall back to the
// tech stack when they carry no tags of their own.
fn resolve_tags(kind: ContentKind, tags: Vec<String>, tech_stack: Vec<String>) -> Vec<String> {
    match kind {
        ContentKind::Project => merge_tags(tags, tech_stack),
        ContentKind::Article => {
            let tags = merge_tags(tags, Vec::new());
            if tags.is_empty() {
                merge_tags(tech_stack, Vec::new())
            } else {
                tags
            }
        }
    }
}

// Tags first, then tech stack entries; blanks and case-insensitive repeats dropped.
fn merge_tags(tags: Vec<String>, tech_stack: Vec<String>) -> Vec<String> {
    let mut merged: Vec<String> = Vec::with_capacity(tags.len() + tech_stack.len());
    for tag in tags.into_iter().chain(tech_stack) {
        let tag = tag.trim();
        if tag.is_empty() || merged.iter().any(|t| t.eq_ignore_ascii_case(tag)) {
            continue;
        }
        merged.push(tag.to_string());
    }
    merged
}
