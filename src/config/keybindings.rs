//! Keybinding configuration for the TUI.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::Deserialize;

use crate::tui::event::Action;

/// Configuration for all keybindings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct KeybindingConfig {
    pub quit: Vec<String>,
    pub move_up: Vec<String>,
    pub move_down: Vec<String>,
    /// Next verse page in the reader, or a list page in the sidebar.
    pub next_page: Vec<String>,
    pub prev_page: Vec<String>,
    pub next_pane: Vec<String>,
    pub prev_pane: Vec<String>,
    /// Cycle the sidebar between chapter, juz and page listings.
    pub next_mode: Vec<String>,
    pub prev_mode: Vec<String>,
    pub select: Vec<String>,
    pub filter: Vec<String>,
    pub toggle_tajweed: Vec<String>,
    pub toggle_words: Vec<String>,
    pub open_in_browser: Vec<String>,
}

fn keys(bindings: &[&str]) -> Vec<String> {
    bindings.iter().map(|b| b.to_string()).collect()
}

impl Default for KeybindingConfig {
    fn default() -> Self {
        Self {
            quit: keys(&["q", "Ctrl+c"]),
            move_up: keys(&["k", "Up"]),
            move_down: keys(&["j", "Down"]),
            next_page: keys(&["n", "PageDown"]),
            prev_page: keys(&["p", "PageUp"]),
            next_pane: keys(&["Tab"]),
            prev_pane: keys(&["BackTab", "Shift+Tab"]),
            next_mode: keys(&["]", "Right"]),
            prev_mode: keys(&["[", "Left"]),
            select: keys(&["Enter"]),
            filter: keys(&["/"]),
            toggle_tajweed: keys(&["t"]),
            toggle_words: keys(&["w"]),
            open_in_browser: keys(&["o"]),
        }
    }
}

impl KeybindingConfig {
    /// Get the action for a key event. Earlier entries win when a key is
    /// bound twice.
    pub fn get_action(&self, key: &KeyEvent) -> Action {
        let table: [(&[String], Action); 14] = [
            (self.quit.as_slice(), Action::Quit),
            (self.move_up.as_slice(), Action::MoveUp),
            (self.move_down.as_slice(), Action::MoveDown),
            (self.next_page.as_slice(), Action::NextPage),
            (self.prev_page.as_slice(), Action::PrevPage),
            (self.next_pane.as_slice(), Action::NextPane),
            (self.prev_pane.as_slice(), Action::PrevPane),
            (self.next_mode.as_slice(), Action::NextMode),
            (self.prev_mode.as_slice(), Action::PrevMode),
            (self.select.as_slice(), Action::Select),
            (self.filter.as_slice(), Action::Filter),
            (self.toggle_tajweed.as_slice(), Action::ToggleTajweed),
            (self.toggle_words.as_slice(), Action::ToggleWords),
            (self.open_in_browser.as_slice(), Action::OpenInBrowser),
        ];

        table
            .iter()
            .find(|(bindings, _)| self.matches_key(key, bindings))
            .map(|(_, action)| *action)
            .unwrap_or(Action::None)
    }

    fn matches_key(&self, key: &KeyEvent, bindings: &[String]) -> bool {
        bindings
            .iter()
            .filter_map(|binding| parse_key_string(binding).ok())
            .any(|parsed| parsed.matches(key))
    }
}

/// A parsed key binding with code and modifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    /// Shift is ignored for bindings that don't ask for it, so "]" and "?"
    /// work on layouts that need Shift to type them.
    pub fn matches(&self, key: &KeyEvent) -> bool {
        self.code == key.code
            && (self.modifiers == key.modifiers
                || self.modifiers == (key.modifiers & !KeyModifiers::SHIFT))
    }
}

const NAMED_KEYS: [(&str, KeyCode); 21] = [
    ("enter", KeyCode::Enter),
    ("return", KeyCode::Enter),
    ("tab", KeyCode::Tab),
    ("backtab", KeyCode::BackTab),
    ("backspace", KeyCode::Backspace),
    ("bs", KeyCode::Backspace),
    ("delete", KeyCode::Delete),
    ("del", KeyCode::Delete),
    ("home", KeyCode::Home),
    ("end", KeyCode::End),
    ("pageup", KeyCode::PageUp),
    ("pgup", KeyCode::PageUp),
    ("pagedown", KeyCode::PageDown),
    ("pgdn", KeyCode::PageDown),
    ("up", KeyCode::Up),
    ("down", KeyCode::Down),
    ("left", KeyCode::Left),
    ("right", KeyCode::Right),
    ("esc", KeyCode::Esc),
    ("escape", KeyCode::Esc),
    ("space", KeyCode::Char(' ')),
];

/// Parse a binding such as "j", "PageDown", "F5", "Ctrl+c" or "Shift+Tab".
///
/// Modifiers are `Ctrl`, `Shift` and `Alt`, joined with `+`. A trailing
/// `++` binds the plus key itself.
pub fn parse_key_string(s: &str) -> Result<KeyBinding, String> {
    let s = s.trim();
    let (prefix, key) = match s.strip_suffix("++") {
        Some(prefix) => (Some(prefix), "+"),
        None => match s.rsplit_once('+') {
            Some((prefix, key)) if !key.is_empty() => (Some(prefix), key),
            _ => (None, s),
        },
    };

    let mut modifiers = KeyModifiers::NONE;
    for part in prefix.into_iter().flat_map(|p| p.split('+')) {
        modifiers |= match part.trim().to_lowercase().as_str() {
            "ctrl" | "control" => KeyModifiers::CONTROL,
            "shift" => KeyModifiers::SHIFT,
            "alt" => KeyModifiers::ALT,
            _ => return Err(format!("Unknown modifier: {}", part)),
        };
    }

    Ok(KeyBinding {
        code: parse_key_code(key)?,
        modifiers,
    })
}

fn parse_key_code(s: &str) -> Result<KeyCode, String> {
    let mut chars = s.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Ok(KeyCode::Char(c));
    }

    let lower = s.to_lowercase();

    if let Some(n) = lower
        .strip_prefix('f')
        .and_then(|n| n.parse::<u8>().ok())
        .filter(|n| (1..=12).contains(n))
    {
        return Ok(KeyCode::F(n));
    }

    NAMED_KEYS
        .iter()
        .find(|(name, _)| *name == lower)
        .map(|(_, code)| *code)
        .ok_or_else(|| format!("Unknown key: {}", s))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_parse_plain_keys() {
        assert_eq!(parse_key_string("j").unwrap().code, KeyCode::Char('j'));
        assert_eq!(parse_key_string("]").unwrap().code, KeyCode::Char(']'));
        assert_eq!(parse_key_string("/").unwrap().code, KeyCode::Char('/'));
        assert_eq!(parse_key_string("+").unwrap().code, KeyCode::Char('+'));
        assert_eq!(parse_key_string("PageDown").unwrap().code, KeyCode::PageDown);
        assert_eq!(parse_key_string("escape").unwrap().code, KeyCode::Esc);
        assert_eq!(parse_key_string("Space").unwrap().code, KeyCode::Char(' '));
        assert_eq!(
            parse_key_string("\u{0646}").unwrap().code,
            KeyCode::Char('\u{0646}')
        );
    }

    #[test]
    fn test_parse_function_keys() {
        assert_eq!(parse_key_string("F1").unwrap().code, KeyCode::F(1));
        assert_eq!(parse_key_string("f12").unwrap().code, KeyCode::F(12));
        assert!(parse_key_string("F13").is_err());
    }

    #[test]
    fn test_parse_modifiers() {
        let binding = parse_key_string("Ctrl+c").unwrap();
        assert_eq!(binding.code, KeyCode::Char('c'));
        assert_eq!(binding.modifiers, KeyModifiers::CONTROL);

        let binding = parse_key_string("Ctrl+Shift+a").unwrap();
        assert_eq!(
            binding.modifiers,
            KeyModifiers::CONTROL | KeyModifiers::SHIFT
        );

        let binding = parse_key_string("Alt++").unwrap();
        assert_eq!(binding.code, KeyCode::Char('+'));
        assert_eq!(binding.modifiers, KeyModifiers::ALT);
    }

    #[test]
    fn test_parse_invalid() {
        assert!(parse_key_string("Hyper+x").is_err());
        assert!(parse_key_string("Tabulator").is_err());
    }

    #[test]
    fn test_shift_is_ignored_unless_bound() {
        let binding = parse_key_string("]").unwrap();
        assert!(binding.matches(&KeyEvent::new(KeyCode::Char(']'), KeyModifiers::SHIFT)));

        let binding = parse_key_string("Ctrl+c").unwrap();
        assert!(!binding.matches(&key(KeyCode::Char('c'))));
    }

    #[test]
    fn test_default_actions() {
        let config = KeybindingConfig::default();

        assert_eq!(config.get_action(&key(KeyCode::Char('q'))), Action::Quit);
        assert_eq!(
            config.get_action(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Action::Quit
        );
        assert_eq!(config.get_action(&key(KeyCode::Down)), Action::MoveDown);
        assert_eq!(config.get_action(&key(KeyCode::PageDown)), Action::NextPage);
        assert_eq!(config.get_action(&key(KeyCode::Char(']'))), Action::NextMode);
        assert_eq!(config.get_action(&key(KeyCode::Left)), Action::PrevMode);
        assert_eq!(config.get_action(&key(KeyCode::Char('/'))), Action::Filter);
        assert_eq!(config.get_action(&key(KeyCode::Char('t'))), Action::ToggleTajweed);
        assert_eq!(config.get_action(&key(KeyCode::Char('w'))), Action::ToggleWords);
        assert_eq!(config.get_action(&key(KeyCode::Char('o'))), Action::OpenInBrowser);
        assert_eq!(config.get_action(&key(KeyCode::Char('x'))), Action::None);
    }

    #[test]
    fn test_rebound_key_from_toml() {
        let config: KeybindingConfig = toml::from_str("toggle_words = [\"g\"]").unwrap();

        assert_eq!(config.get_action(&key(KeyCode::Char('g'))), Action::ToggleWords);
        assert_eq!(config.get_action(&key(KeyCode::Char('w'))), Action::None);
        assert_eq!(config.get_action(&key(KeyCode::Char('t'))), Action::ToggleTajweed);
    }
}
