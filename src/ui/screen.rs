//! Draw one frame of the interactive view.

use ratatui::{
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::state::AppState;
use crate::core::output::DisplayState;

use super::{layout::AppLayout, spinner::LoadingIndicator, theme::Theme};

const INPUT_TITLE: &str = " Repository URL ";
const OUTPUT_TITLE: &str = " Tree ";
const INPUT_PLACEHOLDER: &str = "https://github.com/owner/repo";

pub fn draw(frame: &mut Frame, state: &mut AppState) {
    let layout = AppLayout::from_area(frame.area());

    // ── input ─────────────────────────────────────────────────
    let input_block = Block::default()
        .title(INPUT_TITLE)
        .title_style(Theme::title_style())
        .borders(Borders::ALL)
        .border_style(Theme::border_style());
    let inner_width = layout.input_area.width.saturating_sub(2) as usize;
    let input_len = state.input.chars().count();
    // Keep the end of a long URL (and the cursor) in view.
    let h_offset = (input_len + 1).saturating_sub(inner_width);

    let input = if state.input.is_empty() {
        Paragraph::new(INPUT_PLACEHOLDER).style(Theme::placeholder_style())
    } else {
        Paragraph::new(state.input.as_str())
            .style(Theme::input_style())
            .scroll((0, h_offset as u16))
    };
    frame.render_widget(input.block(input_block), layout.input_area);
    // No room between the borders: leave the cursor hidden.
    if inner_width > 0 {
        frame.set_cursor_position((
            layout.input_area.x + 1 + input_len.saturating_sub(h_offset) as u16,
            layout.input_area.y + 1,
        ));
    }

    // ── output ────────────────────────────────────────────────
    state.viewport_height = layout.output_area.height.saturating_sub(2) as usize;
    let output_block = Block::default()
        .title(OUTPUT_TITLE)
        .title_style(Theme::title_style())
        .borders(Borders::ALL)
        .border_style(Theme::border_style());
    let style = match state.output {
        Some(DisplayState::Error(_)) => Theme::error_style(),
        Some(DisplayState::Loading) => Theme::placeholder_style(),
        _ => Theme::output_style(),
    };
    let output = Paragraph::new(state.output_text())
        .style(style)
        .scroll((state.scroll.min(u16::MAX as usize) as u16, 0))
        .block(output_block);
    frame.render_widget(output, layout.output_area);
    frame.render_widget(
        LoadingIndicator {
            visible: state.is_loading(),
            tick: state.tick,
        },
        layout.output_area,
    );

    // ── status bar ────────────────────────────────────────────
    let status = Paragraph::new(state.config.status_bar_hint()).style(Theme::status_bar_style());
    frame.render_widget(status, layout.status_area);
}
