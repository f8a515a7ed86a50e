//! Input event types and key mappings.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Simplified key representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Escape,
    Backspace,
    Delete,
    Tab,
    BackTab,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    F(u8),
    Unknown,
}

impl From<KeyCode> for Key {
    fn from(code: KeyCode) -> Self {
        match code {
            KeyCode::Char(c) => Key::Char(c),
            KeyCode::Enter => Key::Enter,
            KeyCode::Esc => Key::Escape,
            KeyCode::Backspace => Key::Backspace,
            KeyCode::Delete => Key::Delete,
            KeyCode::Tab => Key::Tab,
            KeyCode::BackTab => Key::BackTab,
            KeyCode::Up => Key::Up,
            KeyCode::Down => Key::Down,
            KeyCode::Left => Key::Left,
            KeyCode::Right => Key::Right,
            KeyCode::Home => Key::Home,
            KeyCode::End => Key::End,
            KeyCode::PageUp => Key::PageUp,
            KeyCode::PageDown => Key::PageDown,
            KeyCode::F(n) => Key::F(n),
            _ => Key::Unknown,
        }
    }
}

/// Key modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
}

impl From<KeyModifiers> for Modifiers {
    fn from(mods: KeyModifiers) -> Self {
        Self {
            ctrl: mods.contains(KeyModifiers::CONTROL),
            alt: mods.contains(KeyModifiers::ALT),
            shift: mods.contains(KeyModifiers::SHIFT),
        }
    }
}

/// A processed input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputEvent {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl From<KeyEvent> for InputEvent {
    fn from(event: KeyEvent) -> Self {
        Self {
            key: Key::from(event.code),
            modifiers: Modifiers::from(event.modifiers),
        }
    }
}

impl InputEvent {
    /// Create a new input event.
    pub fn new(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }

    /// Get the character if this is plain text input (no Ctrl/Alt).
    pub fn text(&self) -> Option<char> {
        match self.key {
            Key::Char(c) if !self.modifiers.ctrl && !self.modifiers.alt => Some(c),
            _ => None,
        }
    }

    /// Check if this matches a key binding string (e.g., "Ctrl+q", "Enter", "L").
    ///
    /// Character bindings are case-sensitive and ignore Shift, which is
    /// already reflected in the character. `BackTab` ignores Shift too.
    pub fn matches(&self, binding: &str) -> bool {
        let mut expected = Modifiers::default();
        let mut expected_key = "";

        for part in binding.split('+') {
            match part.to_lowercase().as_str() {
                "ctrl" => expected.ctrl = true,
                "alt" => expected.alt = true,
                "shift" => expected.shift = true,
                _ => expected_key = part,
            }
        }

        if self.modifiers.ctrl != expected.ctrl || self.modifiers.alt != expected.alt {
            return false;
        }

        let key = match Self::parse_key(expected_key) {
            Some(key) => key,
            None => return false,
        };

        match key {
            Key::Char(_) | Key::BackTab => self.key == key,
            _ => self.key == key && self.modifiers.shift == expected.shift,
        }
    }

    fn parse_key(name: &str) -> Option<Key> {
        let mut chars = name.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Some(Key::Char(c));
        }

        let key = match name.to_lowercase().as_str() {
            "enter" => Key::Enter,
            "esc" | "escape" => Key::Escape,
            "backspace" => Key::Backspace,
            "delete" | "del" => Key::Delete,
            "tab" => Key::Tab,
            "backtab" => Key::BackTab,
            "space" => Key::Char(' '),
            "up" => Key::Up,
            "down" => Key::Down,
            "left" => Key::Left,
            "right" => Key::Right,
            "home" => Key::Home,
            "end" => Key::End,
            "pageup" => Key::PageUp,
            "pagedown" => Key::PageDown,
            s if s.starts_with('f') => Key::F(s[1..].parse().ok()?),
            _ => return None,
        };
        Some(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> InputEvent {
        InputEvent::from(KeyEvent::new(code, modifiers))
    }

    #[test]
    fn test_char_bindings_are_case_sensitive() {
        let upper = key(KeyCode::Char('L'), KeyModifiers::SHIFT);
        assert!(upper.matches("L"));
        assert!(!upper.matches("l"));

        let lower = key(KeyCode::Char('f'), KeyModifiers::NONE);
        assert!(lower.matches("f"));
        assert!(!lower.matches("F1"));
    }

    #[test]
    fn test_named_keys() {
        assert!(key(KeyCode::BackTab, KeyModifiers::SHIFT).matches("BackTab"));
        assert!(key(KeyCode::Char(' '), KeyModifiers::NONE).matches("Space"));
        assert!(key(KeyCode::F(5), KeyModifiers::NONE).matches("F5"));
        assert!(key(KeyCode::Char('c'), KeyModifiers::CONTROL).matches("Ctrl+c"));
        assert!(!key(KeyCode::Char('c'), KeyModifiers::NONE).matches("Ctrl+c"));
        assert!(!key(KeyCode::Enter, KeyModifiers::SHIFT).matches("Enter"));
    }

    #[test]
    fn test_text_skips_control_chords() {
        assert_eq!(key(KeyCode::Char('a'), KeyModifiers::NONE).text(), Some('a'));
        assert_eq!(key(KeyCode::Char('a'), KeyModifiers::CONTROL).text(), None);
        assert_eq!(key(KeyCode::Enter, KeyModifiers::NONE).text(), None);
    }
}
