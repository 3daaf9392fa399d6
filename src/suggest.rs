//! The `tn suggest` command: the search box dropdown, as a list.

use anyhow::Result;

use tinynews_core::query::{suggest, MIN_SUGGESTION_QUERY_CHARS};
use tinynews_core::SearchSuggestion;

use crate::config::Config;
use crate::source_fs;

/// Suggestions for `query` over the configured collection.
pub fn suggestions(config: &Config, query: &str) -> Result<Vec<SearchSuggestion>> {
    let (repository, _report) = source_fs::load_repository(config)?;
    Ok(suggest(repository.all(), query, config.query_options()))
}

pub fn run_suggest(config: &Config, query: &str) -> Result<()> {
    if !config.features.enable_search {
        println!("Search is disabled ([features] enable_search = false).");
        return Ok(());
    }
    if query.chars().count() < MIN_SUGGESTION_QUERY_CHARS {
        println!(
            "Type at least {} characters for suggestions.",
            MIN_SUGGESTION_QUERY_CHARS
        );
        return Ok(());
    }

    let results = suggestions(config, query)?;
    if results.is_empty() {
        println!("No suggestions.");
        return Ok(());
    }

    for (i, suggestion) in results.iter().enumerate() {
        println!(
            "{}. [{}] {} ({})",
            i + 1,
            suggestion.kind.as_str(),
            suggestion.value,
            suggestion.relevance
        );
    }
    Ok(())
}
