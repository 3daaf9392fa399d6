//! Article retrieval by id.
//!
//! Backs the `tn get` command: looks the id up in the loaded collection and
//! prints every normalized field followed by the raw Markdown body.

use anyhow::{bail, Result};

use tinynews_core::Article;

use crate::config::Config;
use crate::source_fs;

/// Core get function returning the normalized article.
pub fn get_article(config: &Config, id: &str) -> Result<Article> {
    let (repository, _report) = source_fs::load_repository(config)?;
    match repository.get(id) {
        Some(article) => Ok(article.clone()),
        None => bail!("article not found: {}", id),
    }
}

/// CLI entry point: fetches and pretty-prints an article.
pub fn run_get(config: &Config, id: &str) -> Result<()> {
    let article = get_article(config, id)?;

    println!("--- Article ---");
    println!("id:        {}", article.id);
    println!("title:     {}", article.title);
    if !article.author.is_empty() {
        println!("author:    {}", article.author);
    }
    match article.date {
        Some(date) => println!("date:      {}", date.format("%Y-%m-%d")),
        None => println!("date:      (none)"),
    }
    if !article.read_time.is_empty() {
        println!("read_time: {}", article.read_time);
    }
    println!("featured:  {}", article.featured);
    println!("tags:      {}", article.tags.join(", "));
    if !article.excerpt.is_empty() {
        println!("excerpt:   {}", article.excerpt);
    }
    println!();

    println!("--- Body ---");
    println!("{}", article.body);

    Ok(())
}
