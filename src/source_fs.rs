//! Filesystem record source.
//!
//! Walks `[content].root`, keeps files matching the include globs (and not
//! the exclude globs), and parses each one into raw records:
//!
//! | Extension | Parser |
//! |-----------|--------|
//! | `.yaml`, `.yml` | `serde_yaml` |
//! | `.json` | `serde_json` |
//!
//! A file holds either one record or a sequence of records. Files that
//! cannot be read or parsed are logged and skipped; only a missing root
//! fails the scan.

use anyhow::{bail, Context, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use walkdir::WalkDir;

use tinynews_core::{ContentRepository, LoadReport, RawRecord};

use crate::config::Config;

/// Record files under the content root, relative to it, in sorted order.
pub fn list_record_files(config: &Config) -> Result<Vec<PathBuf>> {
    let content = &config.content;
    let root = &content.root;
    if !root.exists() {
        bail!("Content root does not exist: {}", root.display());
    }

    let include_set = build_globset(&content.include_globs)?;

    let mut default_excludes = vec!["**/.git/**".to_string(), "**/node_modules/**".to_string()];
    default_excludes.extend(content.exclude_globs.clone());
    let exclude_set = build_globset(&default_excludes)?;

    let mut files = Vec::new();
    let walker = WalkDir::new(root).follow_links(content.follow_symlinks);
    for entry in walker {
        let entry = entry.with_context(|| format!("Failed to walk {}", root.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }

        let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
        let rel_str = relative.to_string_lossy().to_string();

        if exclude_set.is_match(&rel_str) {
            continue;
        }
        if !include_set.is_match(&rel_str) {
            continue;
        }

        files.push(relative.to_path_buf());
    }

    // Sort for deterministic ordering
    files.sort();
    Ok(files)
}

/// Read and parse every record file under the content root.
pub fn scan_records(config: &Config) -> Result<Vec<RawRecord>> {
    let root = &config.content.root;
    let mut records = Vec::new();

    for relative in list_record_files(config)? {
        let path = root.join(&relative);
        let text = match std::fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) => {
                warn!(path = %relative.display(), error = %e, "skipping unreadable record file");
                continue;
            }
        };

        match parse_records(&path, &text) {
            Ok(parsed) => records.extend(parsed),
            Err(e) => {
                warn!(
                    path = %relative.display(),
                    error = %format!("{:#}", e),
                    "skipping unparseable record file"
                );
            }
        }
    }

    Ok(records)
}

/// Scan the content root and build the canonical collection.
pub fn load_repository(config: &Config) -> Result<(ContentRepository, LoadReport)> {
    let records = scan_records(config)?;
    let (repo, report) = ContentRepository::load_with_report(&records);
    info!(
        root = %config.content.root.display(),
        loaded = report.loaded,
        skipped = report.skipped.len(),
        "loaded articles"
    );
    Ok((repo, report))
}

/// Parse one file's text. A top-level sequence yields one record per item.
pub fn parse_records(path: &Path, text: &str) -> Result<Vec<RawRecord>> {
    let value: RawRecord = match path.extension().and_then(|e| e.to_str()) {
        Some("json") => serde_json::from_str(text)
            .with_context(|| format!("Invalid JSON in {}", path.display()))?,
        Some("yaml") | Some("yml") => serde_yaml::from_str(text)
            .with_context(|| format!("Invalid YAML in {}", path.display()))?,
        other => bail!(
            "Unsupported record file extension {:?}: {}",
            other.unwrap_or(""),
            path.display()
        ),
    };

    Ok(match value {
        RawRecord::Array(items) => items,
        RawRecord::Null => Vec::new(),
        single => vec![single],
    })
}

fn build_globset(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(Glob::new(pattern).with_context(|| format!("Invalid glob: {}", pattern))?);
    }
    Ok(builder.build()?)
}
