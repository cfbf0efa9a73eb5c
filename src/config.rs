use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{FolioError, Result};

/// File picked up from the working directory when no `--config` is given.
pub const CONFIG_FILE: &str = "folio.yaml";

/// Site and server configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Root holding one directory per content kind.
    pub content_dir: PathBuf,
    /// Public origin used for absolute URLs in the sitemap.
    pub base_url: String,
    pub bind: String,
    /// Upper bound on reading one kind's collection.
    pub read_timeout_ms: u64,
    /// Collection cache lifetime; `0` disables caching.
    pub cache_ttl_secs: u64,
    pub related_limit: usize,
    /// Routes that exist regardless of content, listed first in the sitemap.
    pub static_routes: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            content_dir: PathBuf::from("content"),
            base_url: "http://localhost:3000".to_string(),
            bind: "127.0.0.1:3000".to_string(),
            read_timeout_ms: 3000,
            cache_ttl_secs: 0,
            related_limit: 3,
            static_routes: ["/", "/about", "/projects", "/blog", "/contact"]
                .iter()
                .map(|r| r.to_string())
                .collect(),
        }
    }
}

impl Config {
    /// Load from an explicit path, or from `folio.yaml` in `cwd` if it
    /// exists, or fall back to defaults.
    pub fn load(explicit: Option<&Path>, cwd: &Path) -> Result<Self> {
        match explicit {
            Some(path) => {
                let raw = fs::read_to_string(path).map_err(|e| {
                    FolioError::Config(format!("cannot read {}: {}", path.display(), e))
                })?;
                Self::from_yaml(&raw)
            }
            None => {
                let path = cwd.join(CONFIG_FILE);
                if path.is_file() {
                    Self::from_yaml(&fs::read_to_string(path)?)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_yaml(raw: &str) -> Result<Self> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Config = serde_yaml::from_str(raw)
            .map_err(|e| FolioError::Config(format!("invalid config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.read_timeout_ms == 0 {
            return Err(FolioError::Config(
                "read_timeout_ms must be greater than 0".to_string(),
            ));
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(FolioError::Config(format!(
                "base_url must start with http:// or https://, got '{}'",
                self.base_url
            )));
        }
        Ok(())
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }

    pub fn cache_ttl(&self) -> Option<Duration> {
        (self.cache_ttl_secs > 0).then(|| Duration::from_secs(self.cache_ttl_secs))
    }

    /// `base_url` without a trailing slash.
    pub fn origin(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}
