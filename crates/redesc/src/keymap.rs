//! Key bindings of the review screen
//!
//! Every binding maps one key to one page action. Patterns are textual
//! ("h", "left", "esc") like in a config file.

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use redesc_review::{PageAction, SubmitScope};

/// A single keybinding that maps a key pattern to a page action
#[derive(Debug, Clone)]
pub struct KeyBinding {
    /// Textual representation of the key, e.g. "left", "q"
    pub keys: String,
    /// Display hint for the UI, e.g. "←"
    pub hint: String,
    pub action: PageAction,
}

impl KeyBinding {
    pub fn new(keys: impl Into<String>, hint: impl Into<String>, action: PageAction) -> Self {
        Self {
            keys: keys.into(),
            hint: hint.into(),
            action,
        }
    }
}

/// Parse a key pattern: a single character or a named key
pub fn parse_key_code(pattern: &str) -> Option<KeyCode> {
    match pattern.trim() {
        "esc" | "escape" => Some(KeyCode::Esc),
        "enter" | "return" => Some(KeyCode::Enter),
        "left" => Some(KeyCode::Left),
        "right" => Some(KeyCode::Right),
        "up" => Some(KeyCode::Up),
        "down" => Some(KeyCode::Down),
        "space" => Some(KeyCode::Char(' ')),
        s if s.chars().count() == 1 => s.chars().next().map(KeyCode::Char),
        _ => None,
    }
}

/// The keymap - bindings with their parsed key codes
#[derive(Debug, Clone)]
pub struct Keymap {
    bindings: Vec<(KeyBinding, KeyCode)>,
}

impl Keymap {
    pub fn new(bindings: Vec<KeyBinding>) -> Self {
        let parsed = bindings
            .into_iter()
            .filter_map(|binding| {
                let code = parse_key_code(&binding.keys)?;
                Some((binding, code))
            })
            .collect();

        Self { bindings: parsed }
    }

    /// Action bound to `key`; keys with ctrl or alt are never bound
    pub fn match_key(&self, key: &KeyEvent) -> Option<PageAction> {
        if key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
        {
            return None;
        }

        self.bindings
            .iter()
            .find(|(_, code)| *code == key.code)
            .map(|(binding, _)| binding.action)
    }

    /// First display hint of `action`
    pub fn hint_for(&self, action: PageAction) -> Option<&str> {
        self.bindings
            .iter()
            .find(|(binding, _)| binding.action == action)
            .map(|(binding, _)| binding.hint.as_str())
    }
}

impl Default for Keymap {
    fn default() -> Self {
        default_keymap()
    }
}

/// Get the default keymap
pub fn default_keymap() -> Keymap {
    use PageAction::*;

    let bindings = vec![
        // Navigation
        KeyBinding::new("left", "←", Previous),
        KeyBinding::new("h", "h", Previous),
        KeyBinding::new("right", "→", Next),
        KeyBinding::new("l", "l", Next),
        // Submission
        KeyBinding::new("b", "b", Submit(SubmitScope::Both)),
        KeyBinding::new("t", "t", Submit(SubmitScope::TitleOnly)),
        KeyBinding::new("d", "d", Submit(SubmitScope::DescriptionOnly)),
        KeyBinding::new("a", "a", Finalize),
        // End
        KeyBinding::new("q", "q", Cancel),
        KeyBinding::new("esc", "Esc", Cancel),
    ];

    Keymap::new(bindings)
}
