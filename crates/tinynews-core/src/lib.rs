//! # TinyNews Core
//!
//! Pure in-memory logic for TinyNews: article normalization, fuzzy-lite
//! filtering, search suggestions, and progressive pagination.
//!
//! This crate performs no I/O. Record loading, configuration, and output
//! formatting live in the `tinynews` application crate.
//!
//! ## Data Flow
//!
//! ```text
//! raw records ──▶ ContentRepository ──▶ query engine ──▶ Paginator ──▶ visible window
//!                  (normalize+sort)     (filter+suggest)  (reveal signals)
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`models`] | `Article`, `SearchSuggestion` |
//! | [`error`] | Per-record skip reasons |
//! | [`repository`] | Normalize raw records into the canonical collection |
//! | [`query`] | Text/tag filtering and suggestion ranking |
//! | [`history`] | Recent suggestion selections |
//! | [`state`] | Caller-owned query state |
//! | [`pagination`] | Visible-window controller driven by reveal signals |
//! | [`session`] | Featured and main grids over one filtered view |

pub mod error;
pub mod history;
pub mod models;
pub mod pagination;
pub mod query;
pub mod repository;
pub mod session;
pub mod state;

pub use models::{Article, RawRecord, SearchSuggestion, SuggestionKind};
pub use repository::{ContentRepository, LoadReport};
