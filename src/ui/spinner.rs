//! Loading indicator — a small spinner + label rendered on the top border
//! of the output pane while a fetch is in flight.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

/// Braille-dot spinner frames.  Cycles through these on each tick.
const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub struct LoadingIndicator {
    /// Whether to show the indicator at all.
    pub visible: bool,
    /// Monotonically increasing tick counter (drives the spinner frame).
    pub tick: u64,
}

impl LoadingIndicator {
    fn label(&self) -> String {
        let frame = SPINNER_FRAMES[(self.tick as usize) % SPINNER_FRAMES.len()];
        format!(" {frame} fetching ")
    }
}

impl Widget for LoadingIndicator {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if !self.visible || area.width < 16 || area.height == 0 {
            return;
        }

        let label = self.label();
        let label_width = label.chars().count() as u16;
        // Top-right, leaving one column for the border corner.
        let x = area.x + area.width.saturating_sub(label_width + 2);
        let y = area.y;

        let line = Line::from(Span::styled(
            label,
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ));

        buf.set_line(x, y, &line, label_width);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frames_cycle_with_tick() {
        let a = LoadingIndicator { visible: true, tick: 0 }.label();
        let b = LoadingIndicator { visible: true, tick: 1 }.label();
        let wrapped = LoadingIndicator {
            visible: true,
            tick: SPINNER_FRAMES.len() as u64,
        }
        .label();
        assert_ne!(a, b);
        assert_eq!(a, wrapped);
    }

    #[test]
    fn hidden_indicator_draws_nothing() {
        let area = Rect::new(0, 0, 30, 3);
        let mut buf = Buffer::empty(area);
        LoadingIndicator { visible: false, tick: 0 }.render(area, &mut buf);
        assert_eq!(buf, Buffer::empty(area));
    }
}
