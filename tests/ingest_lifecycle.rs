use std::fs;
use std::path::Path;

use blog_core::article::ArticleId;
use blog_core::index::ArticleIndex;
use blog_core::ingest::{self, IngestError, Staging};
use chrono::NaiveDate;
use tempfile::tempdir;

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn write_file(dir: &Path, name: &str, body: &str) {
    fs::write(dir.join(name), body).unwrap();
}

#[test]
fn load_articles_indexes_every_file() {
    let dir = tempdir().unwrap();
    write_file(dir.path(), "first", "title=First Post;date=2024-03-01;category=news;");
    write_file(dir.path(), "second", "plain body, no markers");

    let mut index = ArticleIndex::new();
    let report = ingest::load_articles(dir.path(), &mut index);

    assert_eq!(report.ingested, 2);
    assert!(report.failures.is_empty());

    // Title marker wins; the other file falls back to its file name.
    assert!(index.get(&ArticleId::new("First Post")).is_ok());
    assert!(index.get(&ArticleId::new("second")).is_ok());
}

#[test]
fn one_bad_file_does_not_abort_the_batch() {
    let dir = tempdir().unwrap();
    write_file(dir.path(), "good", "title=Good;date=2024-03-01;");
    write_file(dir.path(), "bad", "title=Bad;date=notadate garbage;");

    let mut index = ArticleIndex::new();
    let report = ingest::load_articles(dir.path(), &mut index);

    assert_eq!(report.ingested, 1);
    assert_eq!(report.failures.len(), 1);
    assert!(report.failures[0].0.ends_with("bad"));
    assert!(index.get(&ArticleId::new("Good")).is_ok());
    assert_eq!(index.len(), 1);
}

#[test]
fn reload_preserves_first_indexed_date() {
    let dir = tempdir().unwrap();
    write_file(dir.path(), "post", "title=Post;date=2024-03-01;");

    let mut index = ArticleIndex::new();
    ingest::load_articles(dir.path(), &mut index);

    // Regenerating the file with a new date must not move the article.
    write_file(dir.path(), "post", "title=Post;date=2025-06-06;fresh body");
    let report = ingest::load_articles(dir.path(), &mut index);

    assert_eq!(report.ingested, 1);
    assert_eq!(index.len(), 1);
    let stored = index.get(&ArticleId::new("Post")).unwrap();
    assert_eq!(stored.published, date("2024-03-01"));
    assert!(stored.content.contains("fresh body"));
}

#[test]
fn staged_articles_are_parsed_but_not_indexed() {
    let staging_dir = tempdir().unwrap();
    write_file(staging_dir.path(), "draft", "title=Draft;date=2024-04-01;");

    let (staging, report) = Staging::load(staging_dir.path());

    assert_eq!(report.ingested, 1);
    assert_eq!(staging.len(), 1);
    assert!(staging.get(&ArticleId::new("Draft")).is_some());

    let staged: Vec<_> = staging.iter().collect();
    assert_eq!(staged[0].article.id, ArticleId::new("Draft"));
    assert_eq!(staged[0].article.published, date("2024-04-01"));
}

#[test]
fn deploy_moves_the_file_and_indexes() {
    let staging_dir = tempdir().unwrap();
    let root = tempdir().unwrap();
    let article_root = root.path().join("articles");
    write_file(staging_dir.path(), "ready", "title=Ready;date=2024-04-01;");

    let (mut staging, _) = Staging::load(staging_dir.path());
    let mut index = ArticleIndex::new();

    staging
        .deploy(&ArticleId::new("Ready"), &article_root, &mut index)
        .unwrap();

    assert!(article_root.join("ready").exists());
    assert!(!staging_dir.path().join("ready").exists());
    assert!(index.get(&ArticleId::new("Ready")).is_ok());
    assert!(staging.is_empty());
}

#[test]
fn deploy_gate_blocks_unfinished_work() {
    let staging_dir = tempdir().unwrap();
    let root = tempdir().unwrap();
    let article_root = root.path().join("articles");
    write_file(staging_dir.path(), "wip", "title=Wip;date=2024-04-01;TODO: finish this");

    let (mut staging, _) = Staging::load(staging_dir.path());
    let mut index = ArticleIndex::new();

    let result = staging.deploy(&ArticleId::new("Wip"), &article_root, &mut index);
    assert!(matches!(result, Err(IngestError::UnfinishedWork(_))));

    // Nothing moved, nothing indexed, still staged.
    assert!(staging_dir.path().join("wip").exists());
    assert!(index.is_empty());
    assert_eq!(staging.len(), 1);
}

#[test]
fn deploy_unknown_id_is_an_error() {
    let root = tempdir().unwrap();
    let mut staging = Staging::default();
    let mut index = ArticleIndex::new();

    let result = staging.deploy(&ArticleId::new("ghost"), root.path(), &mut index);
    assert!(matches!(result, Err(IngestError::UnknownStaged(_))));
}

#[test]
fn deploy_all_skips_gated_drafts() {
    let staging_dir = tempdir().unwrap();
    let root = tempdir().unwrap();
    let article_root = root.path().join("articles");
    write_file(staging_dir.path(), "ok", "title=Ok;date=2024-04-01;");
    write_file(staging_dir.path(), "wip", "title=Wip;date=2024-04-01;TODO: later");

    let (mut staging, _) = Staging::load(staging_dir.path());
    let mut index = ArticleIndex::new();

    let deployed = staging.deploy_all(&article_root, &mut index);

    assert_eq!(deployed, 1);
    assert!(index.get(&ArticleId::new("Ok")).is_ok());
    assert_eq!(staging.len(), 1);
    assert!(staging.get(&ArticleId::new("Wip")).is_some());
}
