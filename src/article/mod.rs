pub mod article;
pub mod metadata;

pub use crate::types::identifiers::{ArticleId, ArticleIdError};
pub use article::{Article, ArticleError, ArticleSeed};
pub use metadata::ExtractedMetadata;
