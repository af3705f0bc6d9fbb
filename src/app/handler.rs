//! Input handling — maps key and paste events to state mutations.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::config::Action;

use super::state::AppState;

/// Process a key event.
pub fn handle_key(state: &mut AppState, key: KeyEvent) {
    if key.kind == KeyEventKind::Release {
        return;
    }

    // Ctrl+c always quits.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return;
    }

    if let Some(action) = state.config.match_key(key) {
        apply_action(state, action);
        return;
    }

    // Anything unbound edits the input field.
    match key.code {
        KeyCode::Char(c)
            if !key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            state.input.push(c);
        }
        KeyCode::Backspace => {
            state.input.pop();
        }
        _ => {}
    }
}

fn apply_action(state: &mut AppState, action: Action) {
    match action {
        Action::Fetch => state.fetch_requested = true,
        Action::ScrollUp => state.scroll_by(-1),
        Action::ScrollDown => state.scroll_by(1),
        Action::PageUp => state.scroll_by(-state.page()),
        Action::PageDown => state.scroll_by(state.page()),
        Action::ClearInput => state.input.clear(),
        Action::Quit => state.should_quit = true,
    }
}

/// Pasted text goes into the input field; line breaks are dropped since
/// the field holds a single URL.
pub fn handle_paste(state: &mut AppState, text: &str) {
    state
        .input
        .extend(text.chars().filter(|c| *c != '\n' && *c != '\r'));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::core::output::{DisplayState, OutputSink};

    fn press(state: &mut AppState, code: KeyCode, modifiers: KeyModifiers) {
        handle_key(state, KeyEvent::new(code, modifiers));
    }

    fn state() -> AppState {
        AppState::new(String::new(), AppConfig::default())
    }

    #[test]
    fn typing_edits_input() {
        let mut s = state();
        for c in "abc".chars() {
            press(&mut s, KeyCode::Char(c), KeyModifiers::NONE);
        }
        press(&mut s, KeyCode::Char('D'), KeyModifiers::SHIFT);
        press(&mut s, KeyCode::Backspace, KeyModifiers::NONE);
        press(&mut s, KeyCode::Char('x'), KeyModifiers::ALT);
        assert_eq!(s.input, "abc");

        press(&mut s, KeyCode::Char('u'), KeyModifiers::CONTROL);
        assert!(s.input.is_empty());
    }

    #[test]
    fn enter_requests_fetch() {
        let mut s = state();
        press(&mut s, KeyCode::Enter, KeyModifiers::NONE);
        assert!(s.fetch_requested);
    }

    #[test]
    fn quit_keys() {
        let mut s = state();
        press(&mut s, KeyCode::Esc, KeyModifiers::NONE);
        assert!(s.should_quit);

        let mut s = state();
        press(&mut s, KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(s.should_quit);
    }

    #[test]
    fn key_release_is_ignored() {
        let mut s = state();
        let mut key = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE);
        key.kind = KeyEventKind::Release;
        handle_key(&mut s, key);
        assert!(s.input.is_empty());
    }

    #[test]
    fn paging_moves_by_viewport() {
        let mut s = state();
        s.show(DisplayState::Tree("1\n2\n3\n4\n5\n6\n7\n".into()));
        s.viewport_height = 3;
        press(&mut s, KeyCode::PageDown, KeyModifiers::NONE);
        assert_eq!(s.scroll, 3);
        press(&mut s, KeyCode::Down, KeyModifiers::NONE);
        assert_eq!(s.scroll, 4);
        press(&mut s, KeyCode::PageUp, KeyModifiers::NONE);
        assert_eq!(s.scroll, 1);
    }

    #[test]
    fn paste_strips_newlines() {
        let mut s = state();
        handle_paste(&mut s, "https://github.com/o/r\r\n");
        assert_eq!(s.input, "https://github.com/o/r");
    }
}
