//! Progressive-disclosure pagination controller.
//!
//! A [`Paginator`] exposes a growing prefix (the visible window) of a source
//! sequence. The window grows by one page each time the loading sentinel
//! becomes visible, and restarts at one page whenever the source is
//! replaced.
//!
//! The controller knows nothing about how visibility is detected. Callers
//! feed it [`PaginationEvent`]s together with the instant they happened:
//!
//! ```rust
//! use std::num::NonZeroUsize;
//! use std::time::Instant;
//! use tinynews_core::pagination::{PaginationConfig, PaginationEvent, Paginator};
//!
//! let mut pages = Paginator::new(PaginationConfig::new(NonZeroUsize::new(2).unwrap()));
//! let now = Instant::now();
//! pages.apply(PaginationEvent::Configure(vec![1, 2, 3, 4, 5]), now);
//! assert_eq!(pages.visible(), &[1, 2]);
//!
//! pages.apply(PaginationEvent::SentinelVisible, now);
//! pages.apply(PaginationEvent::SentinelVisible, now);
//! assert_eq!(pages.visible_count(), 5);
//! assert!(!pages.has_more());
//! ```
//!
//! # States
//!
//! | Phase | Meaning | On reveal |
//! |-------|---------|-----------|
//! | `Idle` | no source configured | ignored |
//! | `Loading` | more items remain | grows by one page |
//! | `Exhausted` | window covers the source | ignored |
//!
//! Configuring a new source moves any phase to `Loading` or `Exhausted`.

use std::num::NonZeroUsize;
use std::time::{Duration, Instant};

use tracing::debug;

/// Page size used when none is configured.
pub const DEFAULT_PAGE_SIZE: usize = 12;

/// Static settings of a [`Paginator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationConfig {
    pub page_size: NonZeroUsize,
    /// Whether to measure how long the full source took to reveal.
    pub track_load_time: bool,
}

impl PaginationConfig {
    pub fn new(page_size: NonZeroUsize) -> Self {
        Self {
            page_size,
            track_load_time: true,
        }
    }

    pub fn without_load_time(mut self) -> Self {
        self.track_load_time = false;
        self
    }
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self::new(NonZeroUsize::new(DEFAULT_PAGE_SIZE).unwrap_or(NonZeroUsize::MIN))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaginationPhase {
    Idle,
    Loading,
    Exhausted,
}

/// Inbound events consumed by [`Paginator::apply`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaginationEvent<T> {
    /// Replace the source sequence. Always resets to the first page.
    Configure(Vec<T>),
    /// The loading sentinel entered view.
    SentinelVisible,
}

/// What a single event did to the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub phase: PaginationPhase,
    pub visible_count: usize,
    /// Items added to the window by this event (0 after a reset or no-op).
    pub revealed: usize,
    /// Set only on the event that finished revealing the source.
    pub load_time: Option<Duration>,
}

/// Visible-window state over a source sequence.
#[derive(Debug, Clone)]
pub struct Paginator<T> {
    config: PaginationConfig,
    source: Option<Vec<T>>,
    current_page: usize,
    started_at: Option<Instant>,
    shown_any: bool,
    load_time: Option<Duration>,
}

impl<T> Paginator<T> {
    pub fn new(config: PaginationConfig) -> Self {
        Self {
            config,
            source: None,
            current_page: 1,
            started_at: None,
            shown_any: false,
            load_time: None,
        }
    }

    /// Dispatch an event that happened at `at`.
    pub fn apply(&mut self, event: PaginationEvent<T>, at: Instant) -> Transition {
        match event {
            PaginationEvent::Configure(source) => self.configure(source, at),
            PaginationEvent::SentinelVisible => self.reveal(at),
        }
    }

    /// Replace the source and return to the first page.
    ///
    /// The load clock starts on the first configuration only; later
    /// configurations clear the recorded load time so it can be measured
    /// again for the new source.
    pub fn configure(&mut self, source: Vec<T>, at: Instant) -> Transition {
        self.started_at.get_or_insert(at);
        self.source = Some(source);
        self.current_page = 1;
        self.shown_any = false;
        self.load_time = None;
        self.settle(0, at)
    }

    /// Grow the window by one page, unless idle or exhausted.
    pub fn reveal(&mut self, at: Instant) -> Transition {
        if self.phase() != PaginationPhase::Loading {
            return Transition {
                phase: self.phase(),
                visible_count: self.visible_count(),
                revealed: 0,
                load_time: None,
            };
        }
        let before = self.visible_count();
        self.current_page += 1;
        self.settle(before, at)
    }

    fn settle(&mut self, before: usize, at: Instant) -> Transition {
        let visible_count = self.visible_count();
        if visible_count > 0 {
            self.shown_any = true;
        }

        let mut emitted = None;
        if self.config.track_load_time
            && self.load_time.is_none()
            && self.shown_any
            && !self.has_more()
        {
            if let Some(start) = self.started_at {
                let elapsed = at.saturating_duration_since(start);
                self.load_time = Some(elapsed);
                emitted = Some(elapsed);
            }
        }

        let transition = Transition {
            phase: self.phase(),
            visible_count,
            revealed: visible_count - before,
            load_time: emitted,
        };
        debug!(
            page = self.current_page,
            visible = visible_count,
            total = self.len(),
            phase = ?transition.phase,
            "pagination settled"
        );
        transition
    }

    pub fn phase(&self) -> PaginationPhase {
        match &self.source {
            None => PaginationPhase::Idle,
            Some(_) if self.has_more() => PaginationPhase::Loading,
            Some(_) => PaginationPhase::Exhausted,
        }
    }

    pub fn config(&self) -> PaginationConfig {
        self.config
    }

    pub fn page_size(&self) -> usize {
        self.config.page_size.get()
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Length of the configured source (0 when idle).
    pub fn len(&self) -> usize {
        self.source.as_ref().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `min(current_page × page_size, len)`.
    pub fn visible_count(&self) -> usize {
        self.current_page
            .saturating_mul(self.page_size())
            .min(self.len())
    }

    pub fn has_more(&self) -> bool {
        self.visible_count() < self.len()
    }

    /// The visible window: a prefix of the source.
    pub fn visible(&self) -> &[T] {
        match &self.source {
            Some(source) => &source[..self.visible_count()],
            None => &[],
        }
    }

    /// The whole configured source.
    pub fn source(&self) -> &[T] {
        self.source.as_deref().unwrap_or(&[])
    }

    /// Time from first configuration until the current source was fully
    /// revealed, if that has happened and tracking is enabled.
    pub fn load_time(&self) -> Option<Duration> {
        self.load_time
    }
}

impl<T> Default for Paginator<T> {
    fn default() -> Self {
        Self::new(PaginationConfig::default())
    }
}

/// Render a load duration: `"640ms"` below one second, `"1.25s"` above.
pub fn format_load_time(elapsed: Duration) -> String {
    let ms = elapsed.as_millis();
    if ms < 1000 {
        format!("{}ms", ms)
    } else {
        format!("{:.2}s", elapsed.as_secs_f64())
    }
}
