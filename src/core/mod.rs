//! Core pieces — the tree model, its text rendering, the fetcher and the
//! directory walker used by the server.
//!
//! Nothing in this module depends on any TUI crate.

pub mod fetch;
pub mod fs;
pub mod output;
pub mod render;
pub mod tree;
