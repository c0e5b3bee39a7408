pub mod date_tree;

use std::collections::{BTreeMap, BTreeSet};

use thiserror::Error;
use tracing::debug;

use crate::article::Article;
use crate::types::identifiers::ArticleId;
use self::date_tree::DateTree;

#[derive(Debug, Error)]
pub enum IndexError {
    #[error("No article indexed under id {0:?}")]
    NotFound(ArticleId),
}

/// In-memory article store with four consistent views: the primary mapping
/// by id, plus category, tag and publication-date views.
///
/// The article itself lives only in the primary mapping; secondary views
/// hold ids and resolve through it, so no view can drift onto a stale copy.
/// Single-writer: every mutation leaves all four views consistent before
/// returning, so concurrent readers are supported by wrapping the whole
/// index in one exclusive lock (e.g. `std::sync::RwLock`).
#[derive(Debug, Clone, Default)]
pub struct ArticleIndex {
    articles: BTreeMap<ArticleId, Article>,
    by_category: BTreeMap<String, BTreeSet<ArticleId>>,
    by_tag: BTreeMap<String, BTreeSet<ArticleId>>,
    by_date: DateTree,
}

impl ArticleIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }

    /// Insert or update, keyed by `article.id`.
    ///
    /// Updating unlinks the previous version from every view first, so no
    /// stale category, tag or date entry survives. The first-indexed
    /// publication date is carried onto the incoming article: a regenerated
    /// source file never shifts an article's place in the date hierarchy.
    pub fn upsert(&mut self, mut article: Article) {
        if let Some(previous) = self.remove(&article.id) {
            article.published = previous.published;
            debug!(id = %article.id, "re-indexing article");
        } else {
            debug!(id = %article.id, "indexing new article");
        }

        if let Some(category) = &article.category {
            self.by_category
                .entry(category.clone())
                .or_default()
                .insert(article.id.clone());
        }
        for tag in &article.tags {
            self.by_tag
                .entry(tag.clone())
                .or_default()
                .insert(article.id.clone());
        }
        self.by_date.insert(article.published, article.id.clone());
        self.articles.insert(article.id.clone(), article);
    }

    /// Unlink an article from every view. No-op on an unknown id.
    pub fn remove(&mut self, id: &ArticleId) -> Option<Article> {
        let article = self.articles.remove(id)?;

        if let Some(category) = &article.category {
            if let Some(ids) = self.by_category.get_mut(category) {
                ids.remove(id);
                if ids.is_empty() {
                    self.by_category.remove(category);
                }
            }
        }
        for tag in &article.tags {
            if let Some(ids) = self.by_tag.get_mut(tag) {
                ids.remove(id);
                if ids.is_empty() {
                    self.by_tag.remove(tag);
                }
            }
        }
        self.by_date.remove(article.published, id);

        Some(article)
    }

    pub fn get(&self, id: &ArticleId) -> Result<&Article, IndexError> {
        self.articles
            .get(id)
            .ok_or_else(|| IndexError::NotFound(id.clone()))
    }

    /// Every indexed article. Iteration order is the primary mapping's key
    /// order; callers must not depend on it.
    pub fn iter(&self) -> impl Iterator<Item = &Article> {
        self.articles.values()
    }

    /// Articles currently registered under exactly this category. An unknown
    /// category is an empty result, not an error.
    pub fn by_category(&self, category: &str) -> Vec<&Article> {
        self.resolve(self.by_category.get(category))
    }

    /// Same contract as [`by_category`](Self::by_category), keyed by tag.
    pub fn by_tag(&self, tag: &str) -> Vec<&Article> {
        self.resolve(self.by_tag.get(tag))
    }

    /// Categories with at least one currently-indexed article.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.by_category.keys().map(String::as_str)
    }

    /// Tags with at least one currently-indexed article.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.by_tag.keys().map(String::as_str)
    }

    /// The `n` most recently published articles, most recent first.
    ///
    /// Walks the date hierarchy in descending order and drains whole day
    /// buckets until `n` articles are collected, then truncates. No global
    /// sort. Within a single day articles come back in id order, so the
    /// cutoff on the boundary day keeps whichever ids sort first; that
    /// tiebreak is stable but not a ranking guarantee.
    pub fn recent(&self, n: usize) -> Vec<&Article> {
        let mut collected = Vec::new();
        if n == 0 {
            return collected;
        }
        for ids in self.by_date.buckets_desc() {
            for id in ids {
                // Ids in the date tree always resolve: the views move together.
                if let Some(article) = self.articles.get(id) {
                    collected.push(article);
                }
            }
            if collected.len() >= n {
                break;
            }
        }
        collected.truncate(n);
        collected
    }

    fn resolve(&self, ids: Option<&BTreeSet<ArticleId>>) -> Vec<&Article> {
        ids.into_iter()
            .flatten()
            .filter_map(|id| self.articles.get(id))
            .collect()
    }
}
