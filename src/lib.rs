//! # TinyNews
//!
//! A flat-file news and blog engine: YAML or JSON posts on disk, a
//! canonically ordered collection in memory, and a query layer with
//! fuzzy-lite text search, tag filters, suggestions, and progressive
//! pagination.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   ┌────────────────────┐   ┌──────────────┐
//! │ content/     │──▶│ ContentRepository  │──▶│ FeedSession  │
//! │ *.yaml/json  │   │ normalize + order  │   │ filter+pages │
//! └──────────────┘   └────────────────────┘   └──────┬───────┘
//!                                                     │
//!                                                     ▼
//!                                               ┌──────────┐
//!                                               │   CLI    │
//!                                               │   (tn)   │
//!                                               └──────────┘
//! ```
//!
//! The pure logic lives in the `tinynews-core` crate. This crate adds
//! configuration, the filesystem record source, and the CLI commands.
//!
//! ## Quick Start
//!
//! ```bash
//! tn sources                    # check the content root
//! tn list                       # featured + latest articles
//! tn list --query rust --tag web --reveal 2
//! tn suggest "web d"
//! tn tags
//! tn get hello-world
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`source_fs`] | Filesystem record source |
//! | [`list`] | Index page rendering |
//! | [`suggest`] | Search suggestions |
//! | [`tags`] | Tag cloud |
//! | [`get`] | Article retrieval by id |
//! | [`sources`] | Record source health |
//! | [`logging`] | Tracing subscriber setup |

pub mod config;
pub mod get;
pub mod list;
pub mod logging;
pub mod sources;
pub mod source_fs;
pub mod suggest;
pub mod tags;
