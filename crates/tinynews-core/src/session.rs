//! Feed session: one browsing view over a loaded collection.
//!
//! A [`FeedSession`] ties together the pieces a blog index page needs:
//!
//! 1. the repository snapshot it browses,
//! 2. the caller's [`QueryState`],
//! 3. a featured grid and a main grid, each with its own [`Paginator`].
//!
//! Every change to the query or tag selection re-filters the snapshot. When
//! the filtered sequence changes, both grids are reconfigured, which returns
//! them to their first page. Replacing the collection always reconfigures
//! and also resets the query state.

use std::sync::Arc;
use std::time::Instant;

use tracing::debug;

use crate::models::{Article, SearchSuggestion};
use crate::pagination::{PaginationConfig, Paginator, Transition};
use crate::query::{ArticleFilter, QueryOptions, ResultSummary};
use crate::repository::ContentRepository;
use crate::state::QueryState;

/// Which of the two grids an event targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grid {
    Featured,
    Main,
}

/// Static settings of a [`FeedSession`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedConfig {
    pub options: QueryOptions,
    /// When false, featured articles stay in the main grid.
    pub show_featured: bool,
    pub featured: PaginationConfig,
    pub main: PaginationConfig,
}

impl Default for FeedConfig {
    fn default() -> Self {
        let six = std::num::NonZeroUsize::new(6).unwrap_or(std::num::NonZeroUsize::MIN);
        Self {
            options: QueryOptions::default(),
            show_featured: true,
            featured: PaginationConfig::new(six).without_load_time(),
            main: PaginationConfig::default(),
        }
    }
}

/// Query state plus paginated featured and main grids.
#[derive(Debug, Clone)]
pub struct FeedSession {
    articles: Arc<[Article]>,
    config: FeedConfig,
    state: QueryState,
    filtered: Vec<usize>,
    featured: Paginator<usize>,
    main: Paginator<usize>,
}

impl FeedSession {
    pub fn new(repository: &ContentRepository, config: FeedConfig, at: Instant) -> Self {
        let mut session = Self {
            articles: repository.snapshot(),
            config,
            state: QueryState::new(),
            filtered: Vec::new(),
            featured: Paginator::new(config.featured),
            main: Paginator::new(config.main),
        };
        session.rebuild(at);
        session
    }

    /// Swap in a freshly loaded collection. Query state starts over.
    pub fn replace_collection(&mut self, repository: &ContentRepository, at: Instant) {
        self.articles = repository.snapshot();
        self.state.reset();
        self.rebuild(at);
    }

    pub fn config(&self) -> FeedConfig {
        self.config
    }

    pub fn state(&self) -> &QueryState {
        &self.state
    }

    pub fn set_query(&mut self, query: impl Into<String>, at: Instant) {
        self.state.set_query(query);
        self.refilter(at);
    }

    pub fn select_tag(&mut self, tag: impl Into<String>, at: Instant) {
        self.state.select_tag(tag);
        self.refilter(at);
    }

    pub fn toggle_tag(&mut self, tag: &str, at: Instant) -> bool {
        let selected = self.state.toggle_tag(tag);
        self.refilter(at);
        selected
    }

    pub fn select_suggestion(&mut self, suggestion: &SearchSuggestion, at: Instant) {
        self.state.select_suggestion(suggestion);
        self.refilter(at);
    }

    pub fn clear_filters(&mut self, at: Instant) {
        self.state.clear_filters();
        self.refilter(at);
    }

    /// Suggestions for the current query, over the whole collection.
    pub fn suggestions(&self) -> Vec<SearchSuggestion> {
        self.state.suggestions(&self.articles, self.config.options)
    }

    /// Route a sentinel-visible signal to `grid`.
    pub fn reveal(&mut self, grid: Grid, at: Instant) -> Transition {
        self.paginator_mut(grid).reveal(at)
    }

    pub fn paginator(&self, grid: Grid) -> &Paginator<usize> {
        match grid {
            Grid::Featured => &self.featured,
            Grid::Main => &self.main,
        }
    }

    fn paginator_mut(&mut self, grid: Grid) -> &mut Paginator<usize> {
        match grid {
            Grid::Featured => &mut self.featured,
            Grid::Main => &mut self.main,
        }
    }

    /// The visible window of `grid`.
    pub fn visible(&self, grid: Grid) -> Vec<&Article> {
        self.paginator(grid)
            .visible()
            .iter()
            .map(|&i| &self.articles[i])
            .collect()
    }

    /// All articles passing the current filters, canonical order.
    pub fn filtered(&self) -> Vec<&Article> {
        self.filtered.iter().map(|&i| &self.articles[i]).collect()
    }

    pub fn summary(&self) -> ResultSummary {
        ResultSummary::new(self.filtered.len(), self.articles.len())
    }

    /// Re-run the filters. The grids are reconfigured only when the
    /// filtered sequence changed.
    fn refilter(&mut self, at: Instant) {
        let filtered = self.matching();
        if filtered == self.filtered {
            debug!(filtered = filtered.len(), "filters unchanged, keeping pages");
            return;
        }
        self.filtered = filtered;
        self.configure_grids(at);
    }

    /// Filter and reconfigure unconditionally, for a new collection.
    fn rebuild(&mut self, at: Instant) {
        self.filtered = self.matching();
        self.configure_grids(at);
    }

    fn matching(&self) -> Vec<usize> {
        let filter = ArticleFilter::new(
            self.state.query(),
            self.state.selected_tags(),
            self.config.options,
        );
        self.articles
            .iter()
            .enumerate()
            .filter(|(_, a)| filter.accepts(a))
            .map(|(i, _)| i)
            .collect()
    }

    fn configure_grids(&mut self, at: Instant) {
        let (featured, main): (Vec<usize>, Vec<usize>) = if self.config.show_featured {
            self.filtered
                .iter()
                .partition(|&&i| self.articles[i].featured)
        } else {
            (Vec::new(), self.filtered.clone())
        };

        self.featured.configure(featured, at);
        self.main.configure(main, at);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pagination::PaginationPhase;
    use serde_json::json;
    use std::num::NonZeroUsize;

    fn repository() -> ContentRepository {
        let mut records = vec![
            json!({"id": "f1", "title": "Featured Rust", "featured": true, "tags": ["rust"], "date": "2024-05-01"}),
            json!({"id": "f2", "title": "Featured Web", "featured": true, "tags": ["web"], "date": "2024-04-01"}),
        ];
        for i in 0..5 {
            records.push(json!({
                "id": format!("r{i}"),
                "title": format!("Rust note {i}"),
                "author": "Ann",
                "tags": ["rust"],
                "date": format!("2023-0{}-01", i + 1),
            }));
        }
        records.push(json!({"id": "w", "title": "Web basics", "tags": ["web"], "date": "2022-01-01"}));
        ContentRepository::load(&records)
    }

    fn config() -> FeedConfig {
        FeedConfig {
            main: PaginationConfig::new(NonZeroUsize::new(2).unwrap()),
            ..FeedConfig::default()
        }
    }

    fn ids(articles: Vec<&Article>) -> Vec<String> {
        articles.into_iter().map(|a| a.id.clone()).collect()
    }

    #[test]
    fn test_grids_split_featured() {
        let now = Instant::now();
        let session = FeedSession::new(&repository(), config(), now);
        assert_eq!(ids(session.visible(Grid::Featured)), vec!["f1", "f2"]);
        assert_eq!(ids(session.visible(Grid::Main)), vec!["r4", "r3"]);
        assert_eq!(session.summary(), ResultSummary::new(8, 8));
    }

    #[test]
    fn test_filter_change_resets_pages() {
        let now = Instant::now();
        let mut session = FeedSession::new(&repository(), config(), now);
        session.reveal(Grid::Main, now);
        session.reveal(Grid::Main, now);
        assert_eq!(session.paginator(Grid::Main).current_page(), 3);

        session.toggle_tag("web", now);
        assert_eq!(session.paginator(Grid::Main).current_page(), 1);
        assert_eq!(ids(session.visible(Grid::Main)), vec!["w"]);
        assert_eq!(
            session.paginator(Grid::Main).phase(),
            PaginationPhase::Exhausted
        );
        assert_eq!(ids(session.visible(Grid::Featured)), vec!["f2"]);
    }

    #[test]
    fn test_unchanged_filter_keeps_pages() {
        let now = Instant::now();
        let mut session = FeedSession::new(&repository(), config(), now);
        session.select_tag("rust", now);
        session.reveal(Grid::Main, now);
        assert_eq!(session.paginator(Grid::Main).current_page(), 2);

        // Same tag again, and a query every rust post already matches.
        session.select_tag("rust", now);
        session.set_query("rust", now);
        assert_eq!(session.paginator(Grid::Main).current_page(), 2);
        assert_eq!(session.visible(Grid::Main).len(), 4);

        session.set_query("note 1", now);
        assert_eq!(session.paginator(Grid::Main).current_page(), 1);
    }

    #[test]
    fn test_load_time_survives_unchanged_filter() {
        let now = Instant::now();
        let mut session = FeedSession::new(&repository(), config(), now);
        session.toggle_tag("web", now);
        let load_time = session.paginator(Grid::Main).load_time();
        assert!(load_time.is_some());

        session.select_tag("web", now + std::time::Duration::from_millis(50));
        assert_eq!(session.paginator(Grid::Main).load_time(), load_time);
    }

    #[test]
    fn test_no_match_summary() {
        let now = Instant::now();
        let mut session = FeedSession::new(&repository(), config(), now);
        session.set_query("kubernetes", now);
        assert!(session.summary().is_no_match());
        assert!(session.visible(Grid::Main).is_empty());

        session.clear_filters(now);
        assert_eq!(session.filtered().len(), 8);
    }

    #[test]
    fn test_featured_grid_disabled() {
        let now = Instant::now();
        let cfg = FeedConfig {
            show_featured: false,
            ..config()
        };
        let session = FeedSession::new(&repository(), cfg, now);
        assert!(session.visible(Grid::Featured).is_empty());
        assert_eq!(ids(session.visible(Grid::Main)), vec!["f1", "f2"]);
    }

    #[test]
    fn test_replace_collection_resets_state() {
        let now = Instant::now();
        let mut session = FeedSession::new(&repository(), config(), now);
        session.set_query("rust", now);
        let fresh = ContentRepository::load(&[json!({"id": "only", "title": "Only"})]);
        session.replace_collection(&fresh, now);
        assert_eq!(session.state().query(), "");
        assert_eq!(ids(session.visible(Grid::Main)), vec!["only"]);
    }

    #[test]
    fn test_suggestion_selection_filters() {
        let now = Instant::now();
        let mut session = FeedSession::new(&repository(), config(), now);
        session.set_query("web", now);
        let suggestions = session.suggestions();
        assert_eq!(suggestions[0].value, "web");
        session.select_suggestion(&suggestions[0], now);
        assert_eq!(session.state().recent().len(), 1);
        assert_eq!(ids(session.filtered()), vec!["f2", "w"]);
    }
}
