//! # TinyNews CLI (`tn`)
//!
//! Browse a directory of posts from the terminal.
//!
//! ## Usage
//!
//! ```bash
//! tn --config ./config/tinynews.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `tn list` | Featured and latest articles, with optional filters |
//! | `tn suggest "<query>"` | Tag, author, and title suggestions |
//! | `tn tags` | All tags with post counts |
//! | `tn get <id>` | Print one article in full |
//! | `tn sources` | Check the content root and record files |
//!
//! When the config file does not exist, defaults are used and posts are
//! read from `./content/posts`.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::debug;

use tinynews::config::{self, Config};
use tinynews::list::ListRequest;
use tinynews::{get, list, logging, sources, suggest, tags};

/// TinyNews CLI: search, filter, and page through flat-file posts.
///
/// All commands accept a `--config` flag pointing to a TOML configuration
/// file. See `config/tinynews.example.toml` for a full example.
#[derive(Parser)]
#[command(
    name = "tn",
    about = "TinyNews: a flat-file news and blog engine",
    version
)]
struct Cli {
    /// Path to configuration file (TOML).
    #[arg(long, global = true, default_value = "./config/tinynews.toml")]
    config: PathBuf,

    /// Increase log verbosity (repeatable). `RUST_LOG` overrides this.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List articles the way the index page shows them.
    ///
    /// Featured articles come first in their own grid, then the rest
    /// newest first, one page at a time.
    List {
        /// Case-insensitive text filter over title, excerpt, author, and tags.
        #[arg(long, short)]
        query: Option<String>,

        /// Only show articles carrying this tag. Repeat to match any of several.
        #[arg(long, short)]
        tag: Vec<String>,

        /// Reveal this many extra pages of the main grid.
        #[arg(long, default_value = "0")]
        reveal: usize,
    },

    /// Suggest tags, authors, and titles for a partial query.
    Suggest {
        /// Partial query (at least two characters).
        query: String,
    },

    /// List every tag with the number of posts carrying it.
    Tags,

    /// Print one article by id.
    Get {
        /// Article id.
        id: String,
    },

    /// Show the record source and how many records loaded.
    Sources,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose)?;

    let cfg = if cli.config.exists() {
        config::load_config(&cli.config)?
    } else {
        debug!(path = %cli.config.display(), "config file not found, using defaults");
        Config::minimal()
    };

    match cli.command {
        Commands::List { query, tag, reveal } => {
            let request = ListRequest {
                query,
                tags: tag,
                reveal,
            };
            list::run_list(&cfg, &request)?;
        }
        Commands::Suggest { query } => {
            suggest::run_suggest(&cfg, &query)?;
        }
        Commands::Tags => {
            tags::run_tags(&cfg)?;
        }
        Commands::Get { id } => {
            get::run_get(&cfg, &id)?;
        }
        Commands::Sources => {
            sources::list_sources(&cfg)?;
        }
    }

    Ok(())
}
