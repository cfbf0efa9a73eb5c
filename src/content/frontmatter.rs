//! Frontmatter splitting and metadata parsing for content files.

use crate::entity::Metadata;
use crate::error::{FolioError, Result};

const FENCE: &str = "---";

/// Split a source file into its YAML frontmatter and body.
///
/// Returns `None` when the file does not open with a `---` fence or the
/// block is never closed.
pub fn split_frontmatter(source: &str) -> Option<(&str, &str)> {
    let source = source.strip_prefix('\u{feff}').unwrap_or(source);
    let rest = source.strip_prefix(FENCE)?;
    let rest = rest
        .strip_prefix("\r\n")
        .or_else(|| rest.strip_prefix('\n'))?;

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end_matches(['\r', '\n']) == FENCE {
            let yaml = &rest[..offset];
            let body = &rest[offset + line.len()..];
            return Some((yaml, body));
        }
        offset += line.len();
    }

    None
}

/// Parse a content file into `(metadata, body)`.
pub fn parse_entry(key: &str, source: &str) -> Result<(Metadata, String)> {
    let (yaml, body) = split_frontmatter(source).ok_or_else(|| FolioError::MalformedEntry {
        key: key.to_string(),
        reason: "missing or unterminated frontmatter block".to_string(),
    })?;

    let metadata = if yaml.trim().is_empty() {
        Metadata::default()
    } else {
        serde_yaml::from_str::<Metadata>(yaml).map_err(|e| FolioError::MalformedEntry {
            key: key.to_string(),
            reason: format!("invalid frontmatter: {}", e),
        })?
    };

    Ok((metadata, body.to_string()))
}
