//! The `tn list` command: the blog index page, rendered to stdout.
//!
//! Builds a [`FeedSession`] over the loaded collection, applies the
//! requested query and tags, then signals the main grid's sentinel
//! `--reveal` times before printing both grids.
//!
//! Output layout:
//!
//! ```text
//! TinyNews
//! Showing 3 of 8 articles (filters: 2)
//!
//! == Featured Articles ==
//! 1. Shipping Rust at Scale
//!     id: rust-at-scale | 2024-05-01 | 5 min read | by Ann Lee
//!     tags: rust, ops
//!     "How we moved our pipeline..."
//!
//! == All Articles ==
//! ...
//! All articles loaded in 12ms
//! ```

use anyhow::Result;
use std::time::Instant;
use tracing::debug;

use tinynews_core::pagination::{format_load_time, PaginationPhase};
use tinynews_core::session::{FeedSession, Grid};
use tinynews_core::Article;

use crate::config::Config;
use crate::source_fs;

/// Filters and paging requested on the command line.
#[derive(Debug, Clone, Default)]
pub struct ListRequest {
    pub query: Option<String>,
    pub tags: Vec<String>,
    /// Extra pages to reveal in the main grid.
    pub reveal: usize,
}

/// Load the collection and build a session with `request` applied.
pub fn build_session(config: &Config, request: &ListRequest) -> Result<FeedSession> {
    let started = Instant::now();
    let (repository, _report) = source_fs::load_repository(config)?;
    let mut session = FeedSession::new(&repository, config.feed_config(), started);

    if let Some(query) = &request.query {
        session.set_query(query.as_str(), Instant::now());
    }
    for tag in &request.tags {
        session.select_tag(tag.as_str(), Instant::now());
    }
    for _ in 0..request.reveal {
        let transition = session.reveal(Grid::Main, Instant::now());
        if transition.revealed == 0 {
            break;
        }
    }

    debug!(
        filtered = session.filtered().len(),
        main_page = session.paginator(Grid::Main).current_page(),
        "feed session ready"
    );
    Ok(session)
}

pub fn run_list(config: &Config, request: &ListRequest) -> Result<()> {
    let session = build_session(config, request)?;
    let summary = session.summary();

    println!("{}", config.site.title);
    if !config.site.description.is_empty() {
        println!("{}", config.site.description);
    }

    if summary.is_empty_collection() {
        println!();
        println!(
            "No posts yet. Add a YAML file to {} to get started.",
            config.content.root.display()
        );
        return Ok(());
    }

    let active = session.state().active_filter_count();
    if active > 0 {
        println!("{} (filters: {})", summary, active);
    } else {
        println!("{}", summary);
    }

    if summary.is_no_match() {
        println!();
        println!("No articles match your search criteria. Try adjusting your filters.");
        return Ok(());
    }

    let featured = session.visible(Grid::Featured);
    if !featured.is_empty() {
        println!();
        println!("== Featured Articles ==");
        print_articles(&featured);
    }

    let main = session.visible(Grid::Main);
    if !main.is_empty() {
        println!();
        println!("== {} ==", main_heading(!featured.is_empty()));
        print_articles(&main);
    }

    let paginator = session.paginator(Grid::Main);
    match paginator.phase() {
        PaginationPhase::Loading => {
            println!(
                "Loading more articles... ({} of {} shown, use --reveal to see more)",
                paginator.visible_count(),
                paginator.len()
            );
        }
        PaginationPhase::Exhausted => {
            if config.display.show_end_message && !paginator.is_empty() {
                match paginator.load_time() {
                    Some(elapsed) => {
                        println!("All articles loaded in {}", format_load_time(elapsed))
                    }
                    None => println!("All articles loaded"),
                }
            }
        }
        PaginationPhase::Idle => {}
    }

    Ok(())
}

/// "All Articles" under a featured grid, "Latest Articles" on its own.
pub fn main_heading(has_featured_grid: bool) -> &'static str {
    if has_featured_grid {
        "All Articles"
    } else {
        "Latest Articles"
    }
}

fn print_articles(articles: &[&Article]) {
    for (i, article) in articles.iter().enumerate() {
        println!("{}. {}", i + 1, article.title);
        println!("    {}", byline(article));
        if !article.tags.is_empty() {
            println!("    tags: {}", article.tags.join(", "));
        }
        if !article.excerpt.is_empty() {
            println!("    \"{}\"", article.excerpt);
        }
    }
}

/// `id: x | 2024-05-01 | 5 min read | by Ann`, skipping empty parts.
pub fn byline(article: &Article) -> String {
    let mut parts = vec![format!("id: {}", article.id)];
    if let Some(date) = article.date {
        parts.push(date.format("%Y-%m-%d").to_string());
    }
    if !article.read_time.is_empty() {
        parts.push(article.read_time.clone());
    }
    if !article.author.is_empty() {
        parts.push(format!("by {}", article.author));
    }
    parts.join(" | ")
}
