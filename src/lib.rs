//! In-memory article indexing and query engine for file-backed blogs.
//!
//! `blog-core` parses article files with inline `key=value;` metadata markers
//! into [`article::Article`] values and keeps them queryable in an
//! [`index::ArticleIndex`]: by id, by category, by tag, and by publication
//! date, with a recency query that walks the date hierarchy newest-first
//! instead of sorting the whole collection. The index is rebuilt from source
//! files on each load; nothing here persists or serves HTTP.

pub mod article;
pub mod config;
pub mod index;
pub mod ingest;
pub mod transform;
pub mod types;
