//! User configuration — server endpoints and key bindings.
//!
//! Settings are stored as a simple key-value text file at
//! `$XDG_CONFIG_HOME/repo-tree/config.toml` (default `~/.config/repo-tree/config.toml`).
//! A missing file, an unreadable file, or a malformed value all fall back to
//! the built-in defaults.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::PathBuf;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

pub const DEFAULT_SERVER: &str = "http://localhost:8080";
pub const DEFAULT_GITHUB_BASE: &str = "https://github.com";

// ───────────────────────────────────────── actions ───────────

/// Configurable actions in the interactive view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Fetch,
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,
    ClearInput,
    Quit,
}

impl Action {
    /// Ordered list of all actions (used when writing the config file).
    pub const ALL: &[Action] = &[
        Action::Fetch,
        Action::ScrollUp,
        Action::ScrollDown,
        Action::PageUp,
        Action::PageDown,
        Action::ClearInput,
        Action::Quit,
    ];

    fn config_key(self) -> &'static str {
        match self {
            Action::Fetch => "fetch",
            Action::ScrollUp => "scroll_up",
            Action::ScrollDown => "scroll_down",
            Action::PageUp => "page_up",
            Action::PageDown => "page_down",
            Action::ClearInput => "clear_input",
            Action::Quit => "quit",
        }
    }

    fn from_config_key(s: &str) -> Option<Self> {
        Action::ALL.iter().copied().find(|a| a.config_key() == s)
    }
}

// ───────────────────────────────────────── key bind ──────────

/// A single key binding — key code + modifier combination.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyBind {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBind {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Does this binding match a key event?  Only CTRL/ALT/SHIFT modifiers
    /// are compared.
    pub fn matches(&self, event: KeyEvent) -> bool {
        let mask = KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SHIFT;
        self.code == event.code && (self.modifiers & mask) == (event.modifiers & mask)
    }

    /// Short label for the status bar (e.g. `"Enter"`, `"Ctrl+u"`, `"↑"`).
    pub fn display(&self) -> String {
        self.format(true)
    }

    /// Config-file form (e.g. `"Enter"`, `"Ctrl+u"`, `"Up"`).
    fn to_config_string(&self) -> String {
        self.format(false)
    }

    fn format(&self, arrows: bool) -> String {
        let mut s = String::new();
        if self.modifiers.contains(KeyModifiers::CONTROL) {
            s.push_str("Ctrl+");
        }
        if self.modifiers.contains(KeyModifiers::ALT) {
            s.push_str("Alt+");
        }
        if self.modifiers.contains(KeyModifiers::SHIFT) {
            s.push_str("Shift+");
        }
        s.push_str(&match (self.code, arrows) {
            (KeyCode::Up, true) => "↑".into(),
            (KeyCode::Down, true) => "↓".into(),
            (KeyCode::Up, false) => "Up".into(),
            (KeyCode::Down, false) => "Down".into(),
            (KeyCode::Char(' '), _) => "Space".into(),
            (KeyCode::Char(c), _) => c.to_string(),
            (KeyCode::Left, _) => "Left".into(),
            (KeyCode::Right, _) => "Right".into(),
            (KeyCode::Enter, _) => "Enter".into(),
            (KeyCode::Esc, _) => "Esc".into(),
            (KeyCode::Tab, _) => "Tab".into(),
            (KeyCode::Backspace, _) => "Backspace".into(),
            (KeyCode::Delete, _) => "Delete".into(),
            (KeyCode::Home, _) => "Home".into(),
            (KeyCode::End, _) => "End".into(),
            (KeyCode::PageUp, _) => "PageUp".into(),
            (KeyCode::PageDown, _) => "PageDown".into(),
            (KeyCode::F(n), _) => format!("F{n}"),
            (other, _) => format!("{other:?}"),
        });
        s
    }

    /// Parse a key string like `"Ctrl+u"`, `"Alt+Up"`, `"q"`, `"Enter"`.
    fn parse(s: &str) -> Option<Self> {
        let mut modifiers = KeyModifiers::NONE;
        let parts: Vec<&str> = s.split('+').collect();
        let key_part = parts.last()?;

        for &part in &parts[..parts.len() - 1] {
            match part.to_lowercase().as_str() {
                "ctrl" => modifiers |= KeyModifiers::CONTROL,
                "alt" => modifiers |= KeyModifiers::ALT,
                "shift" => modifiers |= KeyModifiers::SHIFT,
                _ => return None,
            }
        }

        let code = match key_part.to_lowercase().as_str() {
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "enter" | "return" => KeyCode::Enter,
            "esc" | "escape" => KeyCode::Esc,
            "tab" => KeyCode::Tab,
            "backspace" | "bksp" => KeyCode::Backspace,
            "delete" | "del" => KeyCode::Delete,
            "home" => KeyCode::Home,
            "end" => KeyCode::End,
            "pageup" | "pgup" => KeyCode::PageUp,
            "pagedown" | "pgdn" => KeyCode::PageDown,
            "space" => KeyCode::Char(' '),
            s if s.starts_with('f') && s.len() > 1 => {
                let n: u8 = s[1..].parse().ok()?;
                KeyCode::F(n)
            }
            // Single characters keep their case ("U" and "u" differ).
            _ if key_part.chars().count() == 1 => KeyCode::Char(key_part.chars().next()?),
            _ => return None,
        };

        Some(KeyBind { code, modifiers })
    }
}

// ───────────────────────────────────────── config ────────────

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the server that answers `/tree` requests.
    pub server: String,
    /// Listen address for `serve`.
    pub listen: SocketAddr,
    /// Host that repository archives are downloaded from in `serve`.
    pub github_base: String,
    pub bindings: HashMap<Action, Vec<KeyBind>>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: DEFAULT_SERVER.to_string(),
            listen: default_listen(),
            github_base: DEFAULT_GITHUB_BASE.to_string(),
            bindings: Self::default_bindings(),
        }
    }
}

impl AppConfig {
    pub fn default_bindings() -> HashMap<Action, Vec<KeyBind>> {
        let n = KeyModifiers::NONE;
        let mut m = HashMap::new();

        m.insert(Action::Fetch, vec![KeyBind::new(KeyCode::Enter, n)]);
        m.insert(Action::ScrollUp, vec![KeyBind::new(KeyCode::Up, n)]);
        m.insert(Action::ScrollDown, vec![KeyBind::new(KeyCode::Down, n)]);
        m.insert(Action::PageUp, vec![KeyBind::new(KeyCode::PageUp, n)]);
        m.insert(Action::PageDown, vec![KeyBind::new(KeyCode::PageDown, n)]);
        m.insert(
            Action::ClearInput,
            vec![KeyBind::new(KeyCode::Char('u'), KeyModifiers::CONTROL)],
        );
        m.insert(Action::Quit, vec![KeyBind::new(KeyCode::Esc, n)]);

        m
    }

    /// Find the action bound to a key event.  When several bindings match,
    /// the one with the most modifiers wins.
    pub fn match_key(&self, event: KeyEvent) -> Option<Action> {
        let mut best: Option<Action> = None;
        let mut best_mod_count = 0;

        for (&action, binds) in &self.bindings {
            for bind in binds {
                if bind.matches(event) {
                    let mc = bind.modifiers.bits().count_ones();
                    if best.is_none() || mc > best_mod_count {
                        best = Some(action);
                        best_mod_count = mc;
                    }
                }
            }
        }
        best
    }

    fn short_binding(&self, action: Action) -> String {
        match self.bindings.get(&action) {
            Some(binds) if !binds.is_empty() => binds[0].display(),
            _ => "?".into(),
        }
    }

    /// Build the status-bar hint string from current bindings.
    pub fn status_bar_hint(&self) -> String {
        format!(
            "{}: fetch | {}/{}: scroll | {}: clear | {}: quit",
            self.short_binding(Action::Fetch),
            self.short_binding(Action::ScrollUp),
            self.short_binding(Action::ScrollDown),
            self.short_binding(Action::ClearInput),
            self.short_binding(Action::Quit),
        )
    }

    // ── persistence ─────────────────────────────────────────────

    /// Load config from disk, falling back to defaults.
    pub fn load() -> Self {
        let path = config_path();
        match std::fs::read_to_string(&path) {
            Ok(contents) => {
                tracing::debug!("loaded config from {}", path.display());
                Self::parse_config(&contents)
            }
            Err(_) => Self::default(),
        }
    }

    fn parse_config(s: &str) -> Self {
        let mut config = Self::default();

        for line in s.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('[') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let key = key.trim();
            let value = value.trim().trim_matches('"');

            match key {
                "server" => {
                    config.server = value.to_string();
                    continue;
                }
                "listen" => {
                    match value.parse() {
                        Ok(addr) => config.listen = addr,
                        Err(_) => tracing::warn!("ignoring invalid listen address {value:?}"),
                    }
                    continue;
                }
                "github_base" => {
                    config.github_base = value.trim_end_matches('/').to_string();
                    continue;
                }
                _ => {}
            }

            let Some(action) = Action::from_config_key(key) else {
                continue;
            };

            let parsed: Vec<KeyBind> = value
                .split(',')
                .filter_map(|part| KeyBind::parse(part.trim().trim_matches('"')))
                .collect();
            if !parsed.is_empty() {
                config.bindings.insert(action, parsed);
            }
        }

        config
    }

    /// Render the config in file format.
    pub fn serialise(&self) -> String {
        let mut lines = vec![
            "# repo-tree configuration".to_string(),
            String::new(),
            "# Endpoints".to_string(),
            format!("server = {}", self.server),
            format!("listen = {}", self.listen),
            format!("github_base = {}", self.github_base),
            String::new(),
            "# Key bindings".to_string(),
            "# Format: action = Key1, Key2, ...".to_string(),
            "# Modifiers: Ctrl+, Alt+, Shift+ (prefix)".to_string(),
            String::new(),
        ];

        for &action in Action::ALL {
            if let Some(binds) = self.bindings.get(&action) {
                let keys: Vec<String> = binds.iter().map(|b| b.to_config_string()).collect();
                lines.push(format!("{} = {}", action.config_key(), keys.join(", ")));
            }
        }
        lines.push(String::new());
        lines.join("\n")
    }
}

fn default_listen() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 8080))
}

/// Return the config file path (`$XDG_CONFIG_HOME/repo-tree/config.toml`).
fn config_path() -> PathBuf {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(home).join(".config")
        });
    config_dir.join("repo-tree").join("config.toml")
}
