use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Site-level settings for a file-backed blog.
///
/// Every field has a default, and any subset may appear in the config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlogConfig {
    pub title: String,
    pub subtitle: String,
    /// Directory holding published article files.
    pub article_root: PathBuf,
    /// Directory holding staged (not yet published) article files.
    pub staging_root: PathBuf,
}

impl Default for BlogConfig {
    fn default() -> Self {
        Self {
            title: "A Blog".into(),
            subtitle: "A place to write about things.".into(),
            article_root: PathBuf::from("./articles"),
            staging_root: PathBuf::from("./staging"),
        }
    }
}

impl BlogConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)?;
        Ok(toml::from_str(&raw)?)
    }

    /// Load a config file, falling back to defaults if it is missing or
    /// unreadable. A file that exists but does not parse is still an error.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        match Self::load(path) {
            Ok(config) => Ok(config),
            Err(ConfigError::Io(err)) => {
                warn!(?path, %err, "config file unreadable, using defaults");
                Ok(Self::default())
            }
            Err(err) => Err(err),
        }
    }
}
