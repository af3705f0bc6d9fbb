//! Terminal event abstraction.
//!
//! Wraps crossterm events into a simpler enum and runs a background task that
//! forwards them over a channel so the main loop stays non-blocking.

use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyEvent};
use tokio::sync::mpsc;

/// High-level events consumed by the application.
#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    /// Bracketed paste into the input field.
    Paste(String),
    Resize(u16, u16),
    Tick,
}

/// Spawns a blocking task that polls the terminal for events and sends them
/// through the returned channel.
pub fn spawn_event_reader(tick_rate: Duration) -> mpsc::UnboundedReceiver<AppEvent> {
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::task::spawn_blocking(move || loop {
        // Poll with the tick rate so a Tick goes out even when idle; the
        // spinner depends on it.
        let app_event = match event::poll(tick_rate) {
            Ok(true) => match event::read() {
                Ok(CtEvent::Key(k)) => AppEvent::Key(k),
                Ok(CtEvent::Paste(text)) => AppEvent::Paste(text),
                Ok(CtEvent::Resize(w, h)) => AppEvent::Resize(w, h),
                Ok(_) => continue,
                Err(e) => {
                    tracing::warn!("terminal read failed: {e}");
                    break;
                }
            },
            Ok(false) => AppEvent::Tick,
            Err(e) => {
                tracing::warn!("terminal poll failed: {e}");
                break;
            }
        };
        if tx.send(app_event).is_err() {
            break; // receiver dropped
        }
    });

    rx
}
