//! Core data models used throughout TinyNews.
//!
//! These types represent the articles and suggestions that flow from the
//! content repository through the query engine to the presentation layer.

use chrono::NaiveDate;
use serde::Serialize;

/// Raw record produced by a record source before normalization.
///
/// Records are loosely structured: any JSON-compatible value is accepted
/// and coerced by [`ContentRepository::load`](crate::repository::ContentRepository::load).
pub type RawRecord = serde_json::Value;

/// Normalized article in the canonical collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    /// Unique key within a collection.
    pub id: String,
    pub title: String,
    pub excerpt: String,
    /// Markdown body. Rendering is left to the presentation layer.
    pub body: String,
    pub author: String,
    /// Publication date. `None` when the record carried no usable date.
    pub date: Option<NaiveDate>,
    /// Deduplicated tags in first-seen order.
    pub tags: Vec<String>,
    /// Free-form label such as `"5 min read"`.
    pub read_time: String,
    pub featured: bool,
}

impl Article {
    /// Returns true if the article carries `tag` (exact, case-sensitive).
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// The collection field a suggestion was drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionKind {
    Tag,
    Author,
    Title,
}

impl SuggestionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SuggestionKind::Tag => "tag",
            SuggestionKind::Author => "author",
            SuggestionKind::Title => "title",
        }
    }
}

/// A ranked entry of the search suggestion dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchSuggestion {
    #[serde(rename = "type")]
    pub kind: SuggestionKind,
    pub value: String,
    /// Number of posts backing the suggestion. Titles always carry 1.
    pub relevance: usize,
}
