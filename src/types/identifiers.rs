use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The primary key of an article: its title.
///
/// Ids are plain strings, unique within one index, immutable once assigned.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArticleId(String);

#[derive(Debug, Error)]
pub enum ArticleIdError {
    #[error("Path has no file name component")]
    NoFileName,
    #[error("Path involves invalid UTF-8")]
    InvalidUtf8,
}

impl ArticleId {
    pub fn new(id: impl Into<String>) -> Self {
        ArticleId(id.into())
    }

    /// Derive a fallback id from a source file path: its final component.
    ///
    /// Used by ingestion when the file body carries no `title=...;` marker.
    pub fn from_path(source: &Path) -> Result<Self, ArticleIdError> {
        let name = source.file_name().ok_or(ArticleIdError::NoFileName)?;
        let s = name.to_str().ok_or(ArticleIdError::InvalidUtf8)?;
        Ok(ArticleId(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ArticleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ArticleId {
    fn from(s: &str) -> Self {
        ArticleId(s.to_string())
    }
}

impl From<String> for ArticleId {
    fn from(s: String) -> Self {
        ArticleId(s)
    }
}
