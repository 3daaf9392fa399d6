//! The `tn tags` command: the tag cloud with post counts.

use anyhow::Result;

use crate::config::Config;
use crate::source_fs;

pub fn run_tags(config: &Config) -> Result<()> {
    let (repository, _report) = source_fs::load_repository(config)?;
    let counts = repository.tag_counts();

    if counts.is_empty() {
        println!("No tags.");
        return Ok(());
    }

    if !config.features.enable_tags {
        println!("(tag filtering is disabled in [features])");
    }

    let width = counts
        .iter()
        .map(|(tag, _)| tag.chars().count())
        .max()
        .unwrap_or(0)
        .max("TAG".len());

    println!("{:<width$}  POSTS", "TAG", width = width);
    for (tag, count) in &counts {
        println!("{:<width$}  {}", tag, count, width = width);
    }
    Ok(())
}
