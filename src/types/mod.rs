pub mod identifiers;

pub use identifiers::{ArticleId, ArticleIdError};
