use serde::{Deserialize, Serialize};

/// A position in image pixel coordinates.
///
/// Positions are not clamped: a drag that leaves the displayed image
/// reports coordinates outside `[0, width] x [0, height]`, including
/// negative ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Input events delivered to an [`Application`](crate::Application).
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Mouse button pressed.
    PointerPressed { button: MouseButton, position: Point },
    /// Mouse moved (with or without a button held).
    PointerMoved { position: Point },
    /// Mouse button released.
    PointerReleased { button: MouseButton, position: Point },
    /// Keyboard key pressed. Auto-repeat is filtered out.
    KeyPressed(Key),
    /// The user asked the window to close.
    CloseRequested,
}

/// Mouse buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Other(u16),
}

/// Keyboard keys (simplified set).
///
/// Letters are always reported lowercase in `Char`; digits as `'0'..='9'`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Char(char),
    Enter,
    Escape,
    Backspace,
    Space,
}

impl Key {
    /// The digit this key types, if it is one.
    pub fn digit(self) -> Option<char> {
        match self {
            Key::Char(c) if c.is_ascii_digit() => Some(c),
            _ => None,
        }
    }

    /// Compare two keys, ignoring the case of letters.
    pub fn matches(self, other: Key) -> bool {
        match (self, other) {
            (Key::Char(a), Key::Char(b)) => a.eq_ignore_ascii_case(&b),
            (a, b) => a == b,
        }
    }

    pub(crate) fn from_egui(key: egui::Key) -> Option<Self> {
        use egui::Key as K;
        let key = match key {
            K::Enter => Key::Enter,
            K::Escape => Key::Escape,
            K::Backspace => Key::Backspace,
            K::Space => Key::Space,
            K::Num0 => Key::Char('0'),
            K::Num1 => Key::Char('1'),
            K::Num2 => Key::Char('2'),
            K::Num3 => Key::Char('3'),
            K::Num4 => Key::Char('4'),
            K::Num5 => Key::Char('5'),
            K::Num6 => Key::Char('6'),
            K::Num7 => Key::Char('7'),
            K::Num8 => Key::Char('8'),
            K::Num9 => Key::Char('9'),
            other => {
                // Letter keys render as a single uppercase name ("A".."Z").
                let name = other.name();
                let mut chars = name.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) if c.is_ascii_alphabetic() => {
                        Key::Char(c.to_ascii_lowercase())
                    }
                    _ => return None,
                }
            }
        };
        Some(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digit_keys() {
        assert_eq!(Key::Char('7').digit(), Some('7'));
        assert_eq!(Key::Char('a').digit(), None);
        assert_eq!(Key::Enter.digit(), None);
    }

    #[test]
    fn test_matches_ignores_letter_case() {
        assert!(Key::Char('a').matches(Key::Char('A')));
        assert!(Key::Enter.matches(Key::Enter));
        assert!(!Key::Char('a').matches(Key::Char('d')));
        assert!(!Key::Escape.matches(Key::Enter));
    }

    #[test]
    fn test_from_egui() {
        assert_eq!(Key::from_egui(egui::Key::A), Some(Key::Char('a')));
        assert_eq!(Key::from_egui(egui::Key::Num5), Some(Key::Char('5')));
        assert_eq!(Key::from_egui(egui::Key::Enter), Some(Key::Enter));
        assert_eq!(Key::from_egui(egui::Key::F1), None);
    }
}
