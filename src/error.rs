use thiserror::Error;

use crate::entity::ContentKind;

#[derive(Error, Debug)]
pub enum FolioError {
    #[error("Content store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("{kind} not found: {slug}")]
    NotFound { kind: ContentKind, slug: String },

    #[error("Malformed entry {key}: {reason}")]
    MalformedEntry { key: String, reason: String },

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Invalid content kind: {0}")]
    InvalidKind(String),

    #[error("Content check failed: {0} warning(s)")]
    CheckFailed(usize),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl FolioError {
    pub fn not_found(kind: ContentKind, slug: impl Into<String>) -> Self {
        FolioError::NotFound {
            kind,
            slug: slug.into(),
        }
    }

    /// Process exit status for the CLI: 2 for a failed strict check, 1 otherwise.
    pub fn exit_code(&self) -> i32 {
        match self {
            FolioError::CheckFailed(_) => 2,
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, FolioError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(FolioError::CheckFailed(3).exit_code(), 2);
        assert_eq!(FolioError::StoreUnavailable("gone".to_string()).exit_code(), 1);
        assert_eq!(
            FolioError::CheckFailed(3).to_string(),
            "Content check failed: 3 warning(s)"
        );
    }
}
