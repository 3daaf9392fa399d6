//! Query engine: fuzzy-lite filtering and ranked suggestions.
//!
//! Every function here is pure. Query text, selected tags, and feature flags
//! come in as arguments; the engine keeps no state between calls.
//!
//! # Fuzzy-lite Matching
//!
//! A field matches a query when either
//!
//! 1. the whole query is a case-insensitive substring of the field, or
//! 2. the query splits on whitespace into words and every word is a
//!    case-insensitive substring of the field.
//!
//! This is substring matching, not edit-distance matching: `"web dev"`
//! matches `"Web Development Basics"`, `"wbe"` matches nothing.
//!
//! # Suggestion Ranking
//!
//! 1. Scan tags, then authors, then title prefixes (first three words), each
//!    in collection order.
//! 2. Drop any candidate whose value was already emitted, whatever its kind.
//! 3. Stable-sort by relevance (desc).
//! 4. Keep the first [`MAX_SUGGESTIONS`].

use std::collections::{BTreeSet, HashMap, HashSet};
use std::fmt;

use tracing::debug;

use crate::models::{Article, SearchSuggestion, SuggestionKind};

/// Maximum number of suggestions returned by [`suggest`].
pub const MAX_SUGGESTIONS: usize = 5;

/// Queries shorter than this (in characters) produce no suggestions.
pub const MIN_SUGGESTION_QUERY_CHARS: usize = 2;

/// Number of leading title words considered for title suggestions.
const TITLE_PREFIX_WORDS: usize = 3;

/// Feature flags that gate the query engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryOptions {
    /// When false, the text filter passes everything and no suggestions are made.
    pub search_enabled: bool,
    /// When false, the tag filter passes everything.
    pub tags_enabled: bool,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            search_enabled: true,
            tags_enabled: true,
        }
    }
}

/// A query lowered once and reused across fields.
#[derive(Debug, Clone)]
pub struct TextQuery {
    needle: String,
    words: Vec<String>,
}

impl TextQuery {
    /// Prepare `query` for matching. Returns `None` for the empty query,
    /// which matches every article. A whitespace-only query is not empty:
    /// it matches only fields containing that whitespace run.
    pub fn parse(query: &str) -> Option<Self> {
        if query.is_empty() {
            return None;
        }
        let needle = query.to_lowercase();
        let words = needle.split_whitespace().map(str::to_string).collect();
        Some(Self { needle, words })
    }

    /// Fuzzy-lite match against a single field.
    pub fn matches(&self, field: &str) -> bool {
        let field = field.to_lowercase();
        field.contains(&self.needle)
            || (!self.words.is_empty() && self.words.iter().all(|w| field.contains(w.as_str())))
    }

    /// True if the title, excerpt, author, or any one tag matches.
    pub fn matches_article(&self, article: &Article) -> bool {
        self.matches(&article.title)
            || self.matches(&article.excerpt)
            || self.matches(&article.author)
            || article.tags.iter().any(|t| self.matches(t))
    }
}

/// Fuzzy-lite match of `query` against `field`. The empty query always matches.
pub fn text_matches(field: &str, query: &str) -> bool {
    TextQuery::parse(query).map_or(true, |q| q.matches(field))
}

/// Text filter for a single article.
pub fn matches_text(article: &Article, query: &str, options: QueryOptions) -> bool {
    if !options.search_enabled {
        return true;
    }
    TextQuery::parse(query).map_or(true, |q| q.matches_article(article))
}

/// Tag filter for a single article: any selected tag is enough.
pub fn matches_tags(article: &Article, selected: &BTreeSet<String>, options: QueryOptions) -> bool {
    !options.tags_enabled || selected.is_empty() || article.tags.iter().any(|t| selected.contains(t))
}

/// Combined text and tag predicate, prepared once per query.
#[derive(Debug, Clone)]
pub struct ArticleFilter<'q> {
    text: Option<TextQuery>,
    selected: &'q BTreeSet<String>,
    options: QueryOptions,
}

impl<'q> ArticleFilter<'q> {
    pub fn new(query: &str, selected: &'q BTreeSet<String>, options: QueryOptions) -> Self {
        let text = if options.search_enabled {
            TextQuery::parse(query)
        } else {
            None
        };
        Self {
            text,
            selected,
            options,
        }
    }

    /// Text match AND tag match.
    pub fn accepts(&self, article: &Article) -> bool {
        self.text.as_ref().map_or(true, |q| q.matches_article(article))
            && matches_tags(article, self.selected, self.options)
    }
}

/// Filter `articles` by text and tags, keeping their relative order.
///
/// Accepts any iterator of article references, so an already-filtered
/// result can be filtered again.
pub fn filter_articles<'a, I>(
    articles: I,
    query: &str,
    selected: &BTreeSet<String>,
    options: QueryOptions,
) -> Vec<&'a Article>
where
    I: IntoIterator<Item = &'a Article>,
{
    let filter = ArticleFilter::new(query, selected, options);
    let results: Vec<&Article> = articles.into_iter().filter(|a| filter.accepts(a)).collect();

    debug!(
        query,
        selected_tags = selected.len(),
        matched = results.len(),
        "filtered articles"
    );
    results
}

/// Ranked suggestions for `query`, drawn from the unfiltered collection.
pub fn suggest(articles: &[Article], query: &str, options: QueryOptions) -> Vec<SearchSuggestion> {
    if !options.search_enabled {
        return Vec::new();
    }
    if query.chars().count() < MIN_SUGGESTION_QUERY_CHARS {
        return Vec::new();
    }
    let needle = query.to_lowercase();
    let contains = |s: &str| s.to_lowercase().contains(&needle);

    let mut candidates = Vec::new();

    let tags = count_distinct(articles.iter().flat_map(|a| a.tags.iter().map(String::as_str)));
    for (tag, count) in tags {
        if contains(tag) {
            candidates.push(SearchSuggestion {
                kind: SuggestionKind::Tag,
                value: tag.to_string(),
                relevance: count,
            });
        }
    }

    let authors = count_distinct(articles.iter().map(|a| a.author.as_str()));
    for (author, count) in authors {
        if contains(author) {
            candidates.push(SearchSuggestion {
                kind: SuggestionKind::Author,
                value: author.to_string(),
                relevance: count,
            });
        }
    }

    for article in articles {
        let prefix = article
            .title
            .split_whitespace()
            .take(TITLE_PREFIX_WORDS)
            .collect::<Vec<_>>()
            .join(" ");
        if contains(&prefix) {
            candidates.push(SearchSuggestion {
                kind: SuggestionKind::Title,
                value: article.title.clone(),
                relevance: 1,
            });
        }
    }

    // Dedup by value only: a tag and an author spelled the same collapse
    // into whichever was scanned first.
    let mut seen = HashSet::new();
    candidates.retain(|s| seen.insert(s.value.clone()));

    candidates.sort_by(|a, b| b.relevance.cmp(&a.relevance));
    candidates.truncate(MAX_SUGGESTIONS);
    candidates
}

/// Distinct values in first-seen order, each with its occurrence count.
fn count_distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<(&'a str, usize)> {
    let mut order: Vec<(&str, usize)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();
    for value in values {
        match index.get(value) {
            Some(&i) => order[i].1 += 1,
            None => {
                index.insert(value, order.len());
                order.push((value, 1));
            }
        }
    }
    order
}

/// Split a filtered sequence into `(featured, regular)`, order preserved.
pub fn partition_featured<'a>(filtered: &[&'a Article]) -> (Vec<&'a Article>, Vec<&'a Article>) {
    filtered.iter().copied().partition(|a| a.featured)
}

/// Size of a filtered result relative to the whole collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResultSummary {
    pub shown: usize,
    pub total: usize,
}

impl ResultSummary {
    pub fn new(shown: usize, total: usize) -> Self {
        Self { shown, total }
    }

    /// Articles exist but none match the current filters.
    pub fn is_no_match(&self) -> bool {
        self.shown == 0 && self.total > 0
    }

    /// The collection itself is empty.
    pub fn is_empty_collection(&self) -> bool {
        self.total == 0
    }

    pub fn is_filtered(&self) -> bool {
        self.shown < self.total
    }
}

impl fmt::Display for ResultSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Showing {} of {} articles", self.shown, self.total)
    }
}
