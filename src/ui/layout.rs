//! Layout helpers — split the terminal area into regions.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Screen layout: URL input on top, output pane, one-line status bar.
pub struct AppLayout {
    pub input_area: Rect,
    pub output_area: Rect,
    pub status_area: Rect,
}

impl AppLayout {
    /// Compute the layout from the full terminal area.
    pub fn from_area(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // bordered single-line input
                Constraint::Min(3),    // output pane (takes all remaining space)
                Constraint::Length(1), // status bar
            ])
            .split(area);

        Self {
            input_area: chunks[0],
            output_area: chunks[1],
            status_area: chunks[2],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_takes_remaining_rows() {
        let layout = AppLayout::from_area(Rect::new(0, 0, 80, 24));
        assert_eq!(layout.input_area.height, 3);
        assert_eq!(layout.output_area, Rect::new(0, 3, 80, 20));
        assert_eq!(layout.status_area, Rect::new(0, 23, 80, 1));
    }
}
