//! Central application state for the interactive view.
//!
//! All mutable state lives here so that rendering is a pure function over
//! `&AppState` and event handling is a function over `&mut AppState`.

use crate::config::AppConfig;
use crate::core::output::{DisplayState, OutputSink};

/// Top-level application state.
pub struct AppState {
    /// Contents of the repository-URL input field.
    pub input: String,
    /// What the output pane shows; `None` until the first fetch.
    pub output: Option<DisplayState>,
    /// First visible output line.
    pub scroll: usize,
    /// Height of the output pane in rows, updated on every draw.
    pub viewport_height: usize,
    /// Id of the most recently issued fetch.  Results from older fetches
    /// are dropped.
    pub fetch_generation: u64,
    /// Set by the key handler; the event loop starts the fetch.
    pub fetch_requested: bool,
    /// Monotonic frame counter (drives the loading spinner).
    pub tick: u64,
    /// Controls the main event loop.
    pub should_quit: bool,
    pub config: AppConfig,
}

impl AppState {
    pub fn new(input: String, config: AppConfig) -> Self {
        Self {
            input,
            output: None,
            scroll: 0,
            viewport_height: 0,
            fetch_generation: 0,
            fetch_requested: false,
            tick: 0,
            should_quit: false,
            config,
        }
    }

    /// Consume a pending fetch request.  Puts the pane into `Loading` and
    /// returns the new generation together with the URL to fetch.
    pub fn begin_fetch(&mut self) -> Option<(u64, String)> {
        if !std::mem::take(&mut self.fetch_requested) {
            return None;
        }
        self.fetch_generation = self.fetch_generation.wrapping_add(1);
        self.show(DisplayState::Loading);
        Some((self.fetch_generation, self.input.clone()))
    }

    /// Apply a finished fetch.  Returns `false` when the result is stale.
    pub fn finish_fetch(&mut self, generation: u64, display: DisplayState) -> bool {
        if generation != self.fetch_generation {
            tracing::debug!("dropping stale fetch result (generation {generation})");
            return false;
        }
        self.show(display);
        true
    }

    pub fn is_loading(&self) -> bool {
        self.output.as_ref().is_some_and(DisplayState::is_loading)
    }

    /// Full text of the output pane.
    pub fn output_text(&self) -> String {
        self.output.as_ref().map(DisplayState::text).unwrap_or_default()
    }

    fn line_count(&self) -> usize {
        self.output.as_ref().map_or(0, |o| o.text().lines().count())
    }

    /// Move the output scroll position by `delta` lines, keeping the last
    /// page in view.
    pub fn scroll_by(&mut self, delta: isize) {
        let max = self.line_count().saturating_sub(self.viewport_height);
        self.scroll = self.scroll.saturating_add_signed(delta).min(max);
    }

    /// One page, never less than a line.
    pub fn page(&self) -> isize {
        self.viewport_height.max(1) as isize
    }
}

impl OutputSink for AppState {
    fn show(&mut self, state: DisplayState) {
        self.output = Some(state);
        self.scroll = 0;
    }
}
