use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

fn tn_binary() -> PathBuf {
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    path.pop(); // remove deps/
    path.push("tn");
    path
}

fn setup_test_env() -> (TempDir, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().to_path_buf();

    let config_dir = root.join("config");
    fs::create_dir_all(&config_dir).unwrap();

    let posts_dir = root.join("posts");
    fs::create_dir_all(posts_dir.join("2024")).unwrap();

    fs::write(
        posts_dir.join("2024/rust-at-scale.yaml"),
        r#"id: rust-at-scale
title: Shipping Rust at Scale
excerpt: How we moved our ingest pipeline to Rust.
content: |
  # Shipping Rust at Scale

  It went fine.
author: Ann Lee
date: 2024-05-01
tags: [rust, ops]
readTime: 5 min read
featured: true
"#,
    )
    .unwrap();
    fs::write(
        posts_dir.join("2024/async-rust.yaml"),
        r#"id: async-rust
title: Async Rust in Practice
excerpt: Executors, wakers, and the rest.
content: Futures do nothing unless polled.
author: Ann Lee
date: 2024-04-01
tags: [rust]
readTime: 8 min read
"#,
    )
    .unwrap();
    fs::write(
        posts_dir.join("2024/web-dev-basics.yml"),
        r#"id: web-dev-basics
title: Web Development Basics
excerpt: HTML, CSS, and a little JavaScript.
author: Bo Chen
date: 2024-03-10
tags: [web, javascript]
"#,
    )
    .unwrap();
    fs::write(
        posts_dir.join("archive.json"),
        r#"[
  {"id": "web-perf", "title": "Web Performance", "excerpt": "Measure first.", "author": "Bo Chen", "date": "2024-02-01", "tags": ["web"]},
  {"id": "db-tuning", "title": "Tuning Postgres", "excerpt": "Indexes and vacuum.", "author": "Cy Diaz", "date": "2023-12-01", "tags": ["db", "ops"]}
]"#,
    )
    .unwrap();
    fs::write(posts_dir.join("no-id.yaml"), "title: Orphan post\n").unwrap();
    fs::write(posts_dir.join("broken.yaml"), "id: [unclosed\n").unwrap();
    fs::write(posts_dir.join("README.md"), "# not a post\n").unwrap();

    let config_content = format!(
        r#"[site]
title = "Test News"

[content]
root = "{}/posts"

[display]
posts_per_page = 2
"#,
        root.display()
    );

    let config_path = config_dir.join("tinynews.toml");
    fs::write(&config_path, config_content).unwrap();

    (tmp, config_path)
}

fn run_tn(config_path: &Path, args: &[&str]) -> (String, String, bool) {
    let binary = tn_binary();
    let output = Command::new(&binary)
        .arg("--config")
        .arg(config_path.to_str().unwrap())
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("Failed to run tn binary at {:?}: {}", binary, e));

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let success = output.status.success();
    (stdout, stderr, success)
}

#[test]
fn test_list_first_page() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, stderr, success) = run_tn(&config_path, &["list"]);
    assert!(success, "list failed: stdout={}, stderr={}", stdout, stderr);
    assert!(stdout.starts_with("Test News"));
    assert!(stdout.contains("Showing 5 of 5 articles"));
    assert!(stdout.contains("== Featured Articles =="));
    assert!(stdout.contains("Shipping Rust at Scale"));
    assert!(stdout.contains("id: rust-at-scale | 2024-05-01 | 5 min read | by Ann Lee"));
    assert!(stdout.contains("== All Articles =="));
    assert!(stdout.contains("Loading more articles... (2 of 4 shown"));

    // Newest non-featured first; page two not shown yet.
    let async_pos = stdout.find("Async Rust in Practice").unwrap();
    let web_pos = stdout.find("Web Development Basics").unwrap();
    assert!(async_pos < web_pos);
    assert!(!stdout.contains("Tuning Postgres"));
}

#[test]
fn test_list_reveal_reaches_end() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, _, success) = run_tn(&config_path, &["list", "--reveal", "5"]);
    assert!(success);
    assert!(stdout.contains("Tuning Postgres"));
    assert!(stdout.contains("All articles loaded in "));
    assert!(!stdout.contains("Loading more articles"));
}

#[test]
fn test_list_query_and_tag() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, _, success) =
        run_tn(&config_path, &["list", "--query", "PERF", "--tag", "web"]);
    assert!(success);
    assert!(stdout.contains("Showing 1 of 5 articles (filters: 2)"));
    assert!(stdout.contains("Web Performance"));
    assert!(!stdout.contains("Web Development Basics"));
    assert!(!stdout.contains("== Featured Articles =="));
    assert!(stdout.contains("== Latest Articles =="));
}

#[test]
fn test_list_whitespace_query_matches_nothing() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, _, success) = run_tn(&config_path, &["list", "--query", "   "]);
    assert!(success);
    assert!(stdout.contains("Showing 0 of 5 articles (filters: 1)"));
}

#[test]
fn test_suggest_keeps_leading_space() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, _, success) = run_tn(&config_path, &["suggest", " p"]);
    assert!(success);
    assert!(stdout.contains("[title] Web Performance (1)"));
    assert!(stdout.contains("[title] Tuning Postgres (1)"));
    // "Shipping" has a "p" but no " p".
    assert!(!stdout.contains("Shipping Rust at Scale"));
}

#[test]
fn test_list_no_match() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, _, success) = run_tn(&config_path, &["list", "--query", "kubernetes"]);
    assert!(success);
    assert!(stdout.contains("Showing 0 of 5 articles"));
    assert!(stdout.contains("No articles match your search criteria"));
}

#[test]
fn test_list_empty_collection() {
    let (tmp, config_path) = setup_test_env();
    let posts = tmp.path().join("posts");
    fs::remove_dir_all(&posts).unwrap();
    fs::create_dir_all(&posts).unwrap();

    let (stdout, _, success) = run_tn(&config_path, &["list"]);
    assert!(success);
    assert!(stdout.contains("No posts yet."));
    assert!(!stdout.contains("Showing"));
}

#[test]
fn test_suggest_ranks_tags_first() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, _, success) = run_tn(&config_path, &["suggest", "web"]);
    assert!(success);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines[0], "1. [tag] web (2)");
    assert!(stdout.contains("[title] Web Development Basics (1)"));
    assert!(stdout.contains("[title] Web Performance (1)"));
}

#[test]
fn test_suggest_short_query() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, _, success) = run_tn(&config_path, &["suggest", "w"]);
    assert!(success);
    assert!(stdout.contains("at least 2 characters"));
}

#[test]
fn test_tags_counts() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, _, success) = run_tn(&config_path, &["tags"]);
    assert!(success);
    let row = |tag: &str| {
        stdout
            .lines()
            .find(|l| l.split_whitespace().next() == Some(tag))
            .map(|l| l.split_whitespace().nth(1).unwrap().to_string())
    };
    assert_eq!(row("rust").as_deref(), Some("2"));
    assert_eq!(row("ops").as_deref(), Some("2"));
    assert_eq!(row("javascript").as_deref(), Some("1"));
}

#[test]
fn test_get_article() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, _, success) = run_tn(&config_path, &["get", "async-rust"]);
    assert!(success);
    assert!(stdout.contains("title:     Async Rust in Practice"));
    assert!(stdout.contains("read_time: 8 min read"));
    assert!(stdout.contains("Futures do nothing unless polled."));
}

#[test]
fn test_get_missing_article_fails() {
    let (_tmp, config_path) = setup_test_env();

    let (_, stderr, success) = run_tn(&config_path, &["get", "nope"]);
    assert!(!success);
    assert!(stderr.contains("article not found: nope"));
}

#[test]
fn test_sources_reports_skips() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, _, success) = run_tn(&config_path, &["sources"]);
    assert!(success);
    assert!(stdout.contains("OK"));
    assert!(stdout.contains("files:    6"));
    assert!(stdout.contains("records:  6"));
    assert!(stdout.contains("loaded:   5"));
    assert!(stdout.contains("skipped:  1"));
    assert!(stdout.contains("record has no id"));
}

#[test]
fn test_missing_config_uses_defaults() {
    let tmp = TempDir::new().unwrap();
    let binary = tn_binary();
    let output = Command::new(&binary)
        .current_dir(tmp.path())
        .arg("list")
        .output()
        .unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Content root does not exist: ./content/posts"));
}
