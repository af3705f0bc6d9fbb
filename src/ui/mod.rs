//! UI / rendering layer — everything that touches Ratatui widgets.
//!
//! This layer reads [`AppState`](crate::app::state::AppState) and turns it
//! into cells on the terminal.  No network I/O happens here.

pub mod layout;
pub mod screen;
pub mod spinner;
pub mod theme;
