//! Content repository: raw records in, canonical collection out.
//!
//! [`ContentRepository::load`] coerces each loosely structured record into an
//! [`Article`], drops the ones that cannot be addressed, and sorts the rest
//! into canonical order. The resulting collection is an immutable snapshot;
//! a new load replaces it wholesale.
//!
//! # Canonical Order
//!
//! 1. Featured articles before non-featured ones.
//! 2. Within each group, newest date first. Undated articles come last.
//! 3. Ties keep their input order (the sort is stable).
//!
//! # Coercion Rules
//!
//! | Field | Accepted | Fallback |
//! |-------|----------|----------|
//! | `id` | non-empty string or integer | record skipped |
//! | `title`, `excerpt`, `author`, `readTime` | string, number, bool | `""` |
//! | `content` / `body` | string | `""` |
//! | `date` | `YYYY-MM-DD` or RFC 3339 | undated |
//! | `tags` | sequence of strings | empty |
//! | `featured` | bool, flag-like string, number | `false` |

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::sync::Arc;

use chrono::{DateTime, NaiveDate};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::error::RecordError;
use crate::models::{Article, RawRecord};

/// A record dropped during a load, with the reason it was dropped.
#[derive(Debug)]
pub struct SkippedRecord {
    /// Position of the record in the input batch.
    pub index: usize,
    /// The record's id, when it had one.
    pub id: Option<String>,
    pub reason: RecordError,
}

/// Outcome summary of a single load.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub loaded: usize,
    pub skipped: Vec<SkippedRecord>,
}

impl LoadReport {
    pub fn total(&self) -> usize {
        self.loaded + self.skipped.len()
    }
}

/// Read-only, canonically ordered article collection.
#[derive(Debug, Clone, Default)]
pub struct ContentRepository {
    articles: Arc<[Article]>,
}

impl ContentRepository {
    /// Normalize and sort `records` into a new repository.
    pub fn load(records: &[RawRecord]) -> Self {
        Self::load_with_report(records).0
    }

    /// Like [`load`](Self::load), also returning which records were skipped.
    pub fn load_with_report(records: &[RawRecord]) -> (Self, LoadReport) {
        let mut report = LoadReport::default();
        let mut ranked: Vec<(usize, Article)> = Vec::with_capacity(records.len());

        for (index, record) in records.iter().enumerate() {
            match normalize_record(record) {
                Ok(article) => ranked.push((index, article)),
                Err(reason) => {
                    let id = record.get("id").and_then(id_hint);
                    warn!(index, id = id.as_deref(), %reason, "skipping malformed record");
                    report.skipped.push(SkippedRecord { index, id, reason });
                }
            }
        }

        ranked.sort_by(|(_, a), (_, b)| canonical_order(a, b));

        let mut seen: HashSet<String> = HashSet::with_capacity(ranked.len());
        let mut articles = Vec::with_capacity(ranked.len());
        for (index, article) in ranked {
            if !seen.insert(article.id.clone()) {
                let reason = RecordError::DuplicateId {
                    id: article.id.clone(),
                };
                warn!(index, id = %article.id, %reason, "skipping malformed record");
                report.skipped.push(SkippedRecord {
                    index,
                    id: Some(article.id),
                    reason,
                });
                continue;
            }
            articles.push(article);
        }

        report.skipped.sort_by_key(|s| s.index);
        report.loaded = articles.len();
        debug!(
            loaded = report.loaded,
            skipped = report.skipped.len(),
            "content repository loaded"
        );

        (
            Self {
                articles: articles.into(),
            },
            report,
        )
    }

    /// All articles in canonical order.
    pub fn all(&self) -> &[Article] {
        &self.articles
    }

    /// A shared handle to the underlying snapshot.
    pub fn snapshot(&self) -> Arc<[Article]> {
        Arc::clone(&self.articles)
    }

    pub fn len(&self) -> usize {
        self.articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }

    /// Featured articles, canonical order preserved.
    pub fn featured(&self) -> Vec<&Article> {
        self.articles.iter().filter(|a| a.featured).collect()
    }

    /// Look up an article by id.
    pub fn get(&self, id: &str) -> Option<&Article> {
        self.articles.iter().find(|a| a.id == id)
    }

    /// Articles carrying `tag` (exact, case-sensitive).
    pub fn by_tag(&self, tag: &str) -> Vec<&Article> {
        self.articles.iter().filter(|a| a.has_tag(tag)).collect()
    }

    /// Every distinct tag in the collection, sorted.
    ///
    /// Tags are compared as-is: `"Rust"` and `"rust"` are two tags.
    pub fn all_tags(&self) -> Vec<String> {
        self.articles
            .iter()
            .flat_map(|a| a.tags.iter().cloned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Every distinct tag with the number of articles carrying it, sorted by tag.
    pub fn tag_counts(&self) -> Vec<(String, usize)> {
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for article in self.articles.iter() {
            for tag in &article.tags {
                *counts.entry(tag.as_str()).or_insert(0) += 1;
            }
        }
        counts
            .into_iter()
            .map(|(tag, n)| (tag.to_string(), n))
            .collect()
    }
}

/// Canonical comparator: featured first, then newest first.
pub fn canonical_order(a: &Article, b: &Article) -> std::cmp::Ordering {
    b.featured
        .cmp(&a.featured)
        .then_with(|| b.date.cmp(&a.date))
}

/// Coerce a single raw record into an [`Article`].
pub fn normalize_record(record: &RawRecord) -> Result<Article, RecordError> {
    let fields = record.as_object().ok_or(RecordError::NotAnObject {
        found: value_kind(record),
    })?;

    let id = fields
        .get("id")
        .and_then(id_hint)
        .ok_or(RecordError::MissingId)?;

    let body = match fields.get("content") {
        Some(v) if !v.is_null() => text_field("content", Some(v))?,
        _ => text_field("body", fields.get("body"))?,
    };

    let read_time = match fields.get("readTime") {
        Some(v) if !v.is_null() => text_field("readTime", Some(v))?,
        _ => text_field("read_time", fields.get("read_time"))?,
    };

    Ok(Article {
        title: text_field("title", fields.get("title"))?,
        excerpt: text_field("excerpt", fields.get("excerpt"))?,
        author: text_field("author", fields.get("author"))?,
        date: date_field(&id, fields),
        tags: tags_field(fields),
        featured: featured_field(&id, fields.get("featured")),
        body,
        read_time,
        id,
    })
}

fn id_hint(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) if n.is_i64() || n.is_u64() => Some(n.to_string()),
        _ => None,
    }
}

/// Booleans pass through. Flag-like strings (`yes`, `on`, `1`, ...) and
/// non-zero numbers read as true; anything else reads as false.
fn featured_field(id: &str, value: Option<&Value>) -> bool {
    let featured = match value {
        None | Some(Value::Null) => return false,
        Some(Value::Bool(b)) => return *b,
        Some(Value::String(s)) => matches!(
            s.trim().to_ascii_lowercase().as_str(),
            "true" | "yes" | "y" | "on" | "1"
        ),
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(_) => false,
    };
    warn!(id, featured, "coercing non-boolean featured flag");
    featured
}

fn text_field(field: &'static str, value: Option<&Value>) -> Result<String, RecordError> {
    match value {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(Value::Number(n)) => Ok(n.to_string()),
        Some(Value::Bool(b)) => Ok(b.to_string()),
        Some(_) => Err(RecordError::InvalidField {
            field,
            expected: "a string",
        }),
    }
}

fn date_field(id: &str, fields: &Map<String, Value>) -> Option<NaiveDate> {
    let raw = match fields.get("date") {
        None | Some(Value::Null) => return None,
        Some(Value::String(s)) => s.trim(),
        Some(other) => {
            warn!(id, date = %other, "ignoring non-string date");
            return None;
        }
    };

    let parsed = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()));
    if parsed.is_none() {
        warn!(id, date = raw, "ignoring unparseable date");
    }
    parsed
}

fn tags_field(fields: &Map<String, Value>) -> Vec<String> {
    let Some(Value::Array(items)) = fields.get("tags") else {
        return Vec::new();
    };

    let mut seen = HashSet::new();
    items
        .iter()
        .filter_map(Value::as_str)
        .filter(|tag| seen.insert(*tag))
        .map(str::to_string)
        .collect()
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "an object",
    }
}
