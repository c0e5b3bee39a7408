//! Filesystem ingestion: turn article files into indexed [`Article`]s.
//!
//! Two directories are involved. The article root holds published files and
//! is loaded straight into the index. The staging root holds drafts, which
//! are parsed but kept aside until deployed. Batch loads never abort on one
//! bad file: failures are logged, reported, and the rest of the batch
//! continues.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::article::{Article, ArticleError};
use crate::index::ArticleIndex;
use crate::types::identifiers::{ArticleId, ArticleIdError};

/// Marker that blocks deployment of a staged article.
const UNFINISHED_MARKER: &str = "TODO:";

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error(transparent)]
    Article(#[from] ArticleError),
    #[error(transparent)]
    ArticleId(#[from] ArticleIdError),
    #[error("Staged article {0:?} still carries an unfinished-work marker")]
    UnfinishedWork(ArticleId),
    #[error("No staged article under id {0:?}")]
    UnknownStaged(ArticleId),
}

/// Outcome of a batch load: how many articles made it in, and which files
/// did not, with the error for each.
#[derive(Debug, Default)]
pub struct IngestReport {
    pub ingested: usize,
    pub failures: Vec<(PathBuf, IngestError)>,
}

/// Parse one article file.
///
/// The file name is the fallback id; a `title=...;` marker in the body
/// overrides it.
pub fn parse_article_file(path: &Path) -> Result<Article, IngestError> {
    debug!(?path, "parsing article file");
    let raw = fs::read_to_string(path)?;
    let fallback = ArticleId::from_path(path)?;
    let article = Article::seed().raw(raw).fallback_id(fallback).build()?;
    Ok(article)
}

/// Load every file under `root` into the index.
///
/// Files that fail to read or parse are logged and collected in the report;
/// the rest of the batch is unaffected.
pub fn load_articles(root: &Path, index: &mut ArticleIndex) -> IngestReport {
    let mut report = IngestReport::default();
    for_each_file(root, &mut report, |path, report| {
        match parse_article_file(path) {
            Ok(article) => {
                index.upsert(article);
                report.ingested += 1;
            }
            Err(err) => {
                warn!(?path, %err, "failed to ingest article");
                report.failures.push((path.to_path_buf(), err));
            }
        }
    });
    report
}

/// Drafts parsed from the staging root, keyed by id, not yet indexed.
#[derive(Debug, Default)]
pub struct Staging {
    staged: BTreeMap<ArticleId, StagedArticle>,
}

#[derive(Debug, Clone)]
pub struct StagedArticle {
    pub path: PathBuf,
    pub article: Article,
}

impl Staging {
    /// Parse every file under the staging root. Per-file failures are
    /// reported, never fatal.
    pub fn load(root: &Path) -> (Self, IngestReport) {
        let mut staging = Self::default();
        let mut report = IngestReport::default();
        for_each_file(root, &mut report, |path, report| {
            match parse_article_file(path) {
                Ok(article) => {
                    staging.staged.insert(
                        article.id.clone(),
                        StagedArticle {
                            path: path.to_path_buf(),
                            article,
                        },
                    );
                    report.ingested += 1;
                }
                Err(err) => {
                    warn!(?path, %err, "failed to parse staged article");
                    report.failures.push((path.to_path_buf(), err));
                }
            }
        });
        (staging, report)
    }

    pub fn get(&self, id: &ArticleId) -> Option<&StagedArticle> {
        self.staged.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &StagedArticle> {
        self.staged.values()
    }

    pub fn len(&self) -> usize {
        self.staged.len()
    }

    pub fn is_empty(&self) -> bool {
        self.staged.is_empty()
    }

    /// Publish one staged article: move its file into `article_root` and
    /// index it. A body still carrying `TODO:` fails the deploy gate.
    pub fn deploy(
        &mut self,
        id: &ArticleId,
        article_root: &Path,
        index: &mut ArticleIndex,
    ) -> Result<(), IngestError> {
        let staged = self
            .staged
            .remove(id)
            .ok_or_else(|| IngestError::UnknownStaged(id.clone()))?;
        if staged.article.content.contains(UNFINISHED_MARKER) {
            self.staged.insert(id.clone(), staged);
            return Err(IngestError::UnfinishedWork(id.clone()));
        }

        if let Err(err) = move_into(&staged.path, article_root, id) {
            // The file never moved; the draft stays staged.
            self.staged.insert(id.clone(), staged);
            return Err(err.into());
        }

        index.upsert(staged.article);
        debug!(%id, "deployed staged article");
        Ok(())
    }

    /// Publish every staged article that passes the deploy gate. Gated or
    /// failing articles are logged and skipped; returns the deploy count.
    pub fn deploy_all(&mut self, article_root: &Path, index: &mut ArticleIndex) -> usize {
        let ids: Vec<ArticleId> = self.staged.keys().cloned().collect();
        let mut deployed = 0;
        for id in ids {
            match self.deploy(&id, article_root, index) {
                Ok(()) => deployed += 1,
                Err(err) => warn!(%id, %err, "skipping staged article"),
            }
        }
        deployed
    }
}

fn move_into(source: &Path, article_root: &Path, id: &ArticleId) -> std::io::Result<()> {
    fs::create_dir_all(article_root)?;
    let file_name = source
        .file_name()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(id.as_str()));
    fs::rename(source, article_root.join(file_name))
}

fn for_each_file(
    root: &Path,
    report: &mut IngestReport,
    mut handle: impl FnMut(&Path, &mut IngestReport),
) {
    for entry in WalkDir::new(root) {
        match entry {
            Ok(entry) if entry.file_type().is_file() => handle(entry.path(), report),
            Ok(_) => {}
            Err(err) => {
                warn!(%err, "directory walk error");
                let path = err.path().map(Path::to_path_buf).unwrap_or_default();
                report.failures.push((path, err.into()));
            }
        }
    }
}
