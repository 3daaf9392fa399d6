//! TOML configuration parsing and validation.
//!
//! All sections except `[content]` are optional and fall back to the
//! defaults below, so the smallest useful config is:
//!
//! ```toml
//! [content]
//! root = "./content/posts"
//! ```

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use tinynews_core::pagination::PaginationConfig;
use tinynews_core::query::QueryOptions;
use tinynews_core::session::FeedConfig;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub site: SiteConfig,
    pub content: ContentConfig,
    #[serde(default)]
    pub features: FeaturesConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SiteConfig {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default)]
    pub description: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            description: String::new(),
        }
    }
}

fn default_title() -> String {
    "TinyNews".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct ContentConfig {
    pub root: PathBuf,
    #[serde(default = "default_include_globs")]
    pub include_globs: Vec<String>,
    #[serde(default)]
    pub exclude_globs: Vec<String>,
    #[serde(default)]
    pub follow_symlinks: bool,
}

fn default_include_globs() -> Vec<String> {
    vec![
        "**/*.yaml".to_string(),
        "**/*.yml".to_string(),
        "**/*.json".to_string(),
    ]
}

#[derive(Debug, Deserialize, Clone)]
pub struct FeaturesConfig {
    #[serde(default = "default_true")]
    pub enable_search: bool,
    #[serde(default = "default_true")]
    pub enable_tags: bool,
}

impl Default for FeaturesConfig {
    fn default() -> Self {
        Self {
            enable_search: true,
            enable_tags: true,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct DisplayConfig {
    #[serde(default = "default_posts_per_page")]
    pub posts_per_page: usize,
    #[serde(default = "default_featured_per_page")]
    pub featured_per_page: usize,
    #[serde(default = "default_true")]
    pub show_featured_posts: bool,
    #[serde(default = "default_true")]
    pub show_end_message: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            posts_per_page: default_posts_per_page(),
            featured_per_page: default_featured_per_page(),
            show_featured_posts: true,
            show_end_message: true,
        }
    }
}

fn default_true() -> bool {
    true
}
fn default_posts_per_page() -> usize {
    12
}
fn default_featured_per_page() -> usize {
    6
}

impl Config {
    /// Defaults for commands run without a config file: posts are read
    /// from `./content/posts`.
    pub fn minimal() -> Self {
        Self {
            site: SiteConfig::default(),
            content: ContentConfig {
                root: PathBuf::from("./content/posts"),
                include_globs: default_include_globs(),
                exclude_globs: Vec::new(),
                follow_symlinks: false,
            },
            features: FeaturesConfig::default(),
            display: DisplayConfig::default(),
        }
    }

    pub fn query_options(&self) -> QueryOptions {
        QueryOptions {
            search_enabled: self.features.enable_search,
            tags_enabled: self.features.enable_tags,
        }
    }

    /// Feed settings derived from `[features]` and `[display]`.
    ///
    /// [`load_config`] rejects zero page sizes; here they clamp to one.
    pub fn feed_config(&self) -> FeedConfig {
        let page = |n: usize| NonZeroUsize::new(n).unwrap_or(NonZeroUsize::MIN);

        let mut main = PaginationConfig::new(page(self.display.posts_per_page));
        if !self.display.show_end_message {
            main = main.without_load_time();
        }

        FeedConfig {
            options: self.query_options(),
            show_featured: self.display.show_featured_posts,
            featured: PaginationConfig::new(page(self.display.featured_per_page))
                .without_load_time(),
            main,
        }
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;

    // Validate display
    if config.display.posts_per_page == 0 {
        bail!("display.posts_per_page must be >= 1");
    }
    if config.display.featured_per_page == 0 {
        bail!("display.featured_per_page must be >= 1");
    }

    // Validate content
    if config.content.include_globs.is_empty() {
        bail!("content.include_globs must list at least one pattern");
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_config(body: &str) -> (TempDir, PathBuf) {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("tinynews.toml");
        fs::write(&path, body).unwrap();
        (tmp, path)
    }

    #[test]
    fn test_minimal_file_uses_defaults() {
        let (_tmp, path) = write_config("[content]\nroot = \"posts\"\n");
        let cfg = load_config(&path).unwrap();
        assert_eq!(cfg.site.title, "TinyNews");
        assert_eq!(cfg.display.posts_per_page, 12);
        assert_eq!(cfg.display.featured_per_page, 6);
        assert!(cfg.features.enable_search);
        assert_eq!(cfg.content.include_globs.len(), 3);
        assert!(cfg.feed_config().main.track_load_time);
        assert!(!cfg.feed_config().featured.track_load_time);
    }

    #[test]
    fn test_flags_flow_into_feed_config() {
        let (_tmp, path) = write_config(
            r#"[content]
root = "posts"

[features]
enable_search = false

[display]
posts_per_page = 3
show_featured_posts = false
show_end_message = false
"#,
        );
        let feed = load_config(&path).unwrap().feed_config();
        assert!(!feed.options.search_enabled);
        assert!(feed.options.tags_enabled);
        assert!(!feed.show_featured);
        assert_eq!(feed.main.page_size.get(), 3);
        assert!(!feed.main.track_load_time);
    }

    #[test]
    fn test_zero_page_size_rejected() {
        let (_tmp, path) = write_config("[content]\nroot = \"posts\"\n[display]\nposts_per_page = 0\n");
        let err = load_config(&path).unwrap_err();
        assert!(err.to_string().contains("posts_per_page"));
    }

    #[test]
    fn test_missing_file_has_context() {
        let err = load_config(Path::new("/nonexistent/tinynews.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
