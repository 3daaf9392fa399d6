//! Caller-owned query state threaded through the query engine.

use std::collections::BTreeSet;

use crate::history::RecentQueries;
use crate::models::{Article, SearchSuggestion};
use crate::query::{self, QueryOptions};

/// Free-text query, selected tags, and suggestion history for one view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryState {
    query: String,
    selected_tags: BTreeSet<String>,
    recent: RecentQueries,
}

impl QueryState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn selected_tags(&self) -> &BTreeSet<String> {
        &self.selected_tags
    }

    pub fn recent(&self) -> &RecentQueries {
        &self.recent
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn select_tag(&mut self, tag: impl Into<String>) {
        self.selected_tags.insert(tag.into());
    }

    /// Select `tag` if unselected, unselect it otherwise. Returns whether it
    /// is selected afterwards.
    pub fn toggle_tag(&mut self, tag: &str) -> bool {
        if self.selected_tags.remove(tag) {
            false
        } else {
            self.selected_tags.insert(tag.to_string());
            true
        }
    }

    /// Use `suggestion` as the query and remember it.
    pub fn select_suggestion(&mut self, suggestion: &SearchSuggestion) {
        self.query = suggestion.value.clone();
        self.recent.push(&suggestion.value);
    }

    /// Clear query and tags. History is kept.
    pub fn clear_filters(&mut self) {
        self.query.clear();
        self.selected_tags.clear();
    }

    /// Drop everything, history included. Used when the collection changes.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn has_active_filters(&self) -> bool {
        self.active_filter_count() > 0
    }

    /// Selected tags, plus one for a non-empty query.
    pub fn active_filter_count(&self) -> usize {
        self.selected_tags.len() + usize::from(!self.query.is_empty())
    }

    /// Apply this state to `articles`.
    pub fn filter<'a, I>(&self, articles: I, options: QueryOptions) -> Vec<&'a Article>
    where
        I: IntoIterator<Item = &'a Article>,
    {
        query::filter_articles(articles, &self.query, &self.selected_tags, options)
    }

    /// Suggestions for the current query over the unfiltered collection.
    pub fn suggestions(&self, articles: &[Article], options: QueryOptions) -> Vec<SearchSuggestion> {
        query::suggest(articles, &self.query, options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SuggestionKind;

    #[test]
    fn test_toggle_tag() {
        let mut state = QueryState::new();
        assert!(state.toggle_tag("rust"));
        assert!(state.selected_tags().contains("rust"));
        assert!(!state.toggle_tag("rust"));
        assert!(state.selected_tags().is_empty());
    }

    #[test]
    fn test_active_filter_count() {
        let mut state = QueryState::new();
        assert!(!state.has_active_filters());
        state.set_query("rust");
        state.select_tag("web");
        state.select_tag("db");
        assert_eq!(state.active_filter_count(), 3);
        state.set_query("  ");
        assert_eq!(state.active_filter_count(), 3);
        state.set_query("");
        assert_eq!(state.active_filter_count(), 2);
    }

    #[test]
    fn test_select_suggestion_records_history() {
        let mut state = QueryState::new();
        let suggestion = SearchSuggestion {
            kind: SuggestionKind::Author,
            value: "Jane Doe".to_string(),
            relevance: 2,
        };
        state.select_suggestion(&suggestion);
        state.select_suggestion(&suggestion);
        assert_eq!(state.query(), "Jane Doe");
        assert_eq!(state.recent().iter().collect::<Vec<_>>(), vec!["Jane Doe"]);
    }

    #[test]
    fn test_clear_keeps_history_reset_drops_it() {
        let mut state = QueryState::new();
        state.select_suggestion(&SearchSuggestion {
            kind: SuggestionKind::Tag,
            value: "rust".to_string(),
            relevance: 1,
        });
        state.select_tag("web");

        state.clear_filters();
        assert_eq!(state.query(), "");
        assert!(state.selected_tags().is_empty());
        assert_eq!(state.recent().len(), 1);

        state.reset();
        assert_eq!(state, QueryState::default());
    }
}
