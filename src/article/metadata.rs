use std::collections::BTreeSet;

use chrono::NaiveDate;

use super::article::ArticleError;

/// Field values extracted from inline `key=value;` markers in a raw body.
///
/// `None` means the marker was absent, which is distinct from an empty value:
/// callers only override their defaults for fields that were actually present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedMetadata {
    pub title: Option<String>,
    pub date: Option<NaiveDate>,
    pub category: Option<String>,
    pub tags: Option<BTreeSet<String>>,
}

/// Extract recognized metadata markers from a raw article body.
///
/// Recognized keys are `title`, `date`, `category` and `tags`; the first
/// occurrence of each wins. Extraction is idempotent: the same body always
/// yields the same fields. Missing markers are not errors; the only failure
/// is a `date` value whose first whitespace-delimited token is not a
/// `YYYY-MM-DD` calendar date.
pub fn extract(body: &str) -> Result<ExtractedMetadata, ArticleError> {
    let mut meta = ExtractedMetadata::default();

    meta.title = find_marker(body, "title");
    meta.category = find_marker(body, "category");

    if let Some(value) = find_marker(body, "date") {
        meta.date = Some(parse_date(&value)?);
    }

    if let Some(value) = find_marker(body, "tags") {
        let tags: BTreeSet<String> = value
            .split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(str::to_string)
            .collect();
        meta.tags = Some(tags);
    }

    Ok(meta)
}

/// Parse a marker date value: first whitespace-delimited token as
/// `YYYY-MM-DD`, any trailing text ignored.
pub fn parse_date(value: &str) -> Result<NaiveDate, ArticleError> {
    let token = value.split_whitespace().next().unwrap_or("");
    NaiveDate::parse_from_str(token, "%Y-%m-%d").map_err(|_| ArticleError::MalformedMetadata {
        value: value.to_string(),
    })
}

/// Find the first `key=value;` marker and return its raw value.
///
/// The character before `key` (if any) must not be part of an identifier,
/// so `subtitle=...;` never matches the `title` key.
fn find_marker(body: &str, key: &str) -> Option<String> {
    let needle = format!("{key}=");
    let mut from = 0;
    while let Some(rel) = body[from..].find(&needle) {
        let start = from + rel;
        let boundary = body[..start]
            .chars()
            .next_back()
            .map_or(true, |c| !c.is_ascii_alphanumeric() && c != '_');
        if boundary {
            let value_start = start + needle.len();
            let end = body[value_start..].find(';')?;
            return Some(body[value_start..value_start + end].to_string());
        }
        from = start + needle.len();
    }
    None
}
