use std::collections::BTreeSet;

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use super::metadata::{self, ExtractedMetadata};
use crate::transform;
use crate::types::identifiers::ArticleId;

#[derive(Debug, Error)]
pub enum ArticleError {
    #[error("Unparseable date value in metadata: {value:?}")]
    MalformedMetadata { value: String },
    #[error("Article has no id: no explicit id and no title marker in the body")]
    MissingId,
}

/// One content item: transformed body text plus metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub id: ArticleId,
    pub content: String,
    pub published: NaiveDate,
    pub category: Option<String>,
    pub tags: BTreeSet<String>,
}

impl Article {
    pub fn seed() -> ArticleSeed {
        ArticleSeed::default()
    }
}

/// Inputs for constructing an [`Article`].
///
/// Every field is optional. `build` extracts `title`, `date`, `category` and
/// `tags` markers from the raw body; explicitly supplied fields override
/// whatever the body carries. A publication date discovered from neither
/// source defaults to today. The one hard requirement is an id, from either
/// the `id` field or a `title=...;` marker.
#[derive(Debug, Clone, Default)]
pub struct ArticleSeed {
    raw: Option<String>,
    id: Option<ArticleId>,
    fallback_id: Option<ArticleId>,
    published: Option<NaiveDate>,
    category: Option<String>,
    tags: Option<BTreeSet<String>>,
}

impl ArticleSeed {
    pub fn raw(mut self, body: impl Into<String>) -> Self {
        self.raw = Some(body.into());
        self
    }

    pub fn id(mut self, id: impl Into<ArticleId>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// An id used only when neither an explicit id nor a `title=...;` marker
    /// supplies one. Ingestion passes the source file name here.
    pub fn fallback_id(mut self, id: impl Into<ArticleId>) -> Self {
        self.fallback_id = Some(id.into());
        self
    }

    pub fn published(mut self, date: NaiveDate) -> Self {
        self.published = Some(date);
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    pub fn build(self) -> Result<Article, ArticleError> {
        let extracted = match self.raw.as_deref() {
            Some(body) => metadata::extract(body)?,
            None => ExtractedMetadata::default(),
        };

        let id = self
            .id
            .or_else(|| extracted.title.map(ArticleId::new))
            .or(self.fallback_id)
            .ok_or(ArticleError::MissingId)?;
        let published = self
            .published
            .or(extracted.date)
            .unwrap_or_else(|| Utc::now().date_naive());
        let category = self.category.or(extracted.category);
        let tags = self.tags.or(extracted.tags).unwrap_or_default();
        let content = self
            .raw
            .map(|body| transform::apply(&body))
            .unwrap_or_default();

        debug!(id = %id, %published, ?category, ?tags, "built article");

        Ok(Article {
            id,
            content,
            published,
            category,
            tags,
        })
    }
}
