use anyhow::Result;

use crate::config::Config;
use crate::source_fs;

/// Print the health of the configured record source.
pub fn list_sources(config: &Config) -> Result<()> {
    let root = &config.content.root;

    println!("{:<12} {:<40} STATUS", "SOURCE", "ROOT");
    if !root.exists() {
        println!(
            "{:<12} {:<40} NOT CONFIGURED (root does not exist)",
            "filesystem",
            root.display()
        );
        return Ok(());
    }

    let files = source_fs::list_record_files(config)?;
    let (_repository, report) = source_fs::load_repository(config)?;

    println!("{:<12} {:<40} OK", "filesystem", root.display());
    println!();
    println!("files:    {}", files.len());
    println!("records:  {}", report.total());
    println!("loaded:   {}", report.loaded);
    println!("skipped:  {}", report.skipped.len());

    for skipped in &report.skipped {
        match &skipped.id {
            Some(id) => println!("  #{} ({}): {}", skipped.index, id, skipped.reason),
            None => println!("  #{}: {}", skipped.index, skipped.reason),
        }
    }

    Ok(())
}
