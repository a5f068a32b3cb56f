//! Keybindings for session commands.
//!
//! Letter bindings match regardless of case. Digit keys are not bindable:
//! they always type field content.

use fieldbox_view::Key;
use serde::{Deserialize, Serialize};

/// A command the user can trigger from the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Go to the previous image (wrapping)
    PreviousImage,
    /// Go to the next image (wrapping)
    NextImage,
    /// Undo the last drawing step
    Undo,
    /// Reset the current image's annotation
    Clean,
    /// Commit the pending box and content
    Confirm,
    /// Save the resume point and exit
    Quit,
}

impl Action {
    /// Get the display name for this action.
    pub fn name(&self) -> &'static str {
        match self {
            Action::PreviousImage => "Previous image",
            Action::NextImage => "Next image",
            Action::Undo => "Undo",
            Action::Clean => "Clean",
            Action::Confirm => "Confirm",
            Action::Quit => "Quit",
        }
    }
}

/// Keybinding configuration for the application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub previous_image: Vec<Key>,
    pub next_image: Vec<Key>,
    pub undo: Vec<Key>,
    pub clean: Vec<Key>,
    pub confirm: Vec<Key>,
    pub quit: Vec<Key>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            previous_image: vec![Key::Char('a')],
            next_image: vec![Key::Char('d')],
            undo: vec![Key::Char('z')],
            clean: vec![Key::Char('c')],
            confirm: vec![Key::Enter],
            quit: vec![Key::Char('q'), Key::Escape],
        }
    }
}

impl KeyBindings {
    /// Create new keybindings with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the action bound to a key press, if any.
    ///
    /// Digits never map to an action.
    pub fn action_for_key(&self, key: Key) -> Option<Action> {
        if key.digit().is_some() {
            return None;
        }
        let table: [(&[Key], Action); 6] = [
            (self.quit.as_slice(), Action::Quit),
            (self.previous_image.as_slice(), Action::PreviousImage),
            (self.next_image.as_slice(), Action::NextImage),
            (self.undo.as_slice(), Action::Undo),
            (self.clean.as_slice(), Action::Clean),
            (self.confirm.as_slice(), Action::Confirm),
        ];
        table
            .iter()
            .find(|(keys, _)| keys.iter().any(|bound| bound.matches(key)))
            .map(|(_, action)| *action)
    }

    /// Check if a key is bound to more than one action.
    /// Returns the names of the conflicting actions, if any.
    pub fn conflicts(&self) -> Vec<(Key, &'static str, &'static str)> {
        let all: [(&[Key], Action); 6] = [
            (self.previous_image.as_slice(), Action::PreviousImage),
            (self.next_image.as_slice(), Action::NextImage),
            (self.undo.as_slice(), Action::Undo),
            (self.clean.as_slice(), Action::Clean),
            (self.confirm.as_slice(), Action::Confirm),
            (self.quit.as_slice(), Action::Quit),
        ];
        let mut found = Vec::new();
        for (i, (keys, action)) in all.iter().enumerate() {
            for (other_keys, other) in &all[i + 1..] {
                for key in keys.iter() {
                    if other_keys.iter().any(|k| k.matches(*key)) {
                        found.push((*key, action.name(), other.name()));
                    }
                }
            }
        }
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bindings() {
        let bindings = KeyBindings::new();
        assert_eq!(bindings.action_for_key(Key::Char('a')), Some(Action::PreviousImage));
        assert_eq!(bindings.action_for_key(Key::Char('D')), Some(Action::NextImage));
        assert_eq!(bindings.action_for_key(Key::Char('z')), Some(Action::Undo));
        assert_eq!(bindings.action_for_key(Key::Char('C')), Some(Action::Clean));
        assert_eq!(bindings.action_for_key(Key::Enter), Some(Action::Confirm));
        assert_eq!(bindings.action_for_key(Key::Escape), Some(Action::Quit));
        assert_eq!(bindings.action_for_key(Key::Char('q')), Some(Action::Quit));
        assert_eq!(bindings.action_for_key(Key::Char('x')), None);
    }

    #[test]
    fn test_digits_never_bound() {
        let bindings = KeyBindings {
            undo: vec![Key::Char('1')],
            ..KeyBindings::default()
        };
        assert_eq!(bindings.action_for_key(Key::Char('1')), None);
    }

    #[test]
    fn test_no_conflicts_by_default() {
        assert!(KeyBindings::default().conflicts().is_empty());
    }

    #[test]
    fn test_conflict_detected() {
        let bindings = KeyBindings {
            clean: vec![Key::Char('z')],
            ..KeyBindings::default()
        };
        let conflicts = bindings.conflicts();
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].1, "Undo");
        assert_eq!(conflicts[0].2, "Clean");
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let bindings: KeyBindings = serde_json::from_str(r#"{"undo": [{"Char": "u"}]}"#).unwrap();
        assert_eq!(bindings.action_for_key(Key::Char('u')), Some(Action::Undo));
        assert_eq!(bindings.action_for_key(Key::Char('z')), None);
        assert_eq!(bindings.action_for_key(Key::Char('d')), Some(Action::NextImage));
    }
}
