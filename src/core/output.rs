//! Display states of a fetch and the sinks that show them.
//!
//! A fetch moves its output through `Loading` and then either `Tree` or
//! `Error`.  Whatever shows the output (the terminal in one-shot mode, the
//! output pane in the interactive view) implements [`OutputSink`] and is
//! handed to the fetch explicitly.

use std::io::{self, Write};

use super::fetch::FetchError;
use super::render::render_tree;
use super::tree::TreeNode;

pub const LOADING_TEXT: &str = "Loading...";

/// What the output area currently shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayState {
    Loading,
    /// Rendered tree text.
    Tree(String),
    /// Error message, without the `Error: ` prefix.
    Error(String),
}

impl DisplayState {
    /// Final state for a finished fetch.
    pub fn from_fetch(result: Result<TreeNode, FetchError>) -> Self {
        match result {
            Ok(tree) => DisplayState::Tree(render_tree(&tree, 0)),
            Err(err) => DisplayState::Error(err.to_string()),
        }
    }

    /// The text shown to the user.
    pub fn text(&self) -> String {
        match self {
            DisplayState::Loading => LOADING_TEXT.to_string(),
            DisplayState::Tree(text) => text.clone(),
            DisplayState::Error(msg) => format!("Error: {msg}"),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, DisplayState::Loading)
    }
}

/// Something that shows the output of a fetch.  Each call replaces what was
/// shown before.
pub trait OutputSink {
    fn show(&mut self, state: DisplayState);
}

// ───────────────────────────────────────── terminal sink ─────

/// Sink for one-shot mode.
///
/// The tree goes to `out` (stdout) so it can be piped; the loading
/// placeholder and error line go to `err` (stderr).
pub struct TerminalSink<O: Write, E: Write> {
    out: O,
    err: E,
}

impl TerminalSink<io::Stdout, io::Stderr> {
    pub fn stdio() -> Self {
        Self::new(io::stdout(), io::stderr())
    }
}

impl<O: Write, E: Write> TerminalSink<O, E> {
    pub fn new(out: O, err: E) -> Self {
        Self { out, err }
    }
}

impl<O: Write, E: Write> OutputSink for TerminalSink<O, E> {
    fn show(&mut self, state: DisplayState) {
        let written = match &state {
            DisplayState::Tree(text) => self
                .out
                .write_all(text.as_bytes())
                .and_then(|_| self.out.flush()),
            DisplayState::Loading | DisplayState::Error(_) => {
                writeln!(self.err, "{}", state.text()).and_then(|_| self.err.flush())
            }
        };
        if let Err(e) = written {
            tracing::warn!("failed to write output: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_text_is_prefixed() {
        let state = DisplayState::Error("Gagal mengambil data".into());
        assert_eq!(state.text(), "Error: Gagal mengambil data");
    }

    #[test]
    fn successful_fetch_renders_from_depth_zero() {
        let tree = TreeNode::dir("root", vec![TreeNode::file("f")]);
        assert_eq!(
            DisplayState::from_fetch(Ok(tree)),
            DisplayState::Tree("📁 root\n  📄 f\n".into())
        );
    }

    #[test]
    fn terminal_sink_splits_streams() {
        let mut out = Vec::new();
        let mut err = Vec::new();
        {
            let mut sink = TerminalSink::new(&mut out, &mut err);
            sink.show(DisplayState::Loading);
            sink.show(DisplayState::Tree("📄 a.txt\n".into()));
        }
        assert_eq!(String::from_utf8(out).unwrap(), "📄 a.txt\n");
        assert_eq!(String::from_utf8(err).unwrap(), "Loading...\n");
    }

    #[test]
    fn terminal_sink_writes_errors_to_err_stream() {
        let mut out = Vec::new();
        let mut err = Vec::new();
        TerminalSink::new(&mut out, &mut err).show(DisplayState::Error("boom".into()));
        assert!(out.is_empty());
        assert_eq!(String::from_utf8(err).unwrap(), "Error: boom\n");
    }
}
