//! Interactive view orchestration — state, event reading, input handling
//! and background fetches.

pub mod event;
pub mod fetch_runtime;
pub mod handler;
pub mod state;
