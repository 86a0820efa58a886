//! The engine-side capability interface for input methods.
//!
//! Platform layers never see a concrete engine type. They hold a
//! `&mut dyn TextEditingHost` and call the operations below synchronously on
//! the UI thread. Offsets and counts are UTF-16 code units unless a method
//! says otherwise, matching what input methods send.

use std::ops::Range;

use weaver_editor_core::WindowInsets;

/// Flag asking for styled text. Styles are not tracked, so it is ignored.
pub const GET_TEXT_WITH_STYLES: i32 = 1;

/// Key event action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    Down,
    Up,
    /// Repeated or multi-character event.
    Multiple,
}

impl KeyAction {
    pub const ACTION_DOWN: i32 = 0;
    pub const ACTION_UP: i32 = 1;
    pub const ACTION_MULTIPLE: i32 = 2;

    pub fn from_raw(raw: i32) -> Option<Self> {
        match raw {
            Self::ACTION_DOWN => Some(Self::Down),
            Self::ACTION_UP => Some(Self::Up),
            Self::ACTION_MULTIPLE => Some(Self::Multiple),
            _ => None,
        }
    }

    pub fn to_raw(self) -> i32 {
        match self {
            Self::Down => Self::ACTION_DOWN,
            Self::Up => Self::ACTION_UP,
            Self::Multiple => Self::ACTION_MULTIPLE,
        }
    }

    /// Whether the key is held down by this event.
    pub fn is_press(self) -> bool {
        !matches!(self, Self::Up)
    }
}

/// A key event as the input method delivers it. Forwarded uninterpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEventDescriptor {
    /// Platform key code.
    pub key_code: i32,
    pub action: KeyAction,
    /// Platform modifier bits.
    pub meta_state: i32,
    /// The character the key produces with its meta state, if any.
    pub unicode_char: Option<char>,
}

impl KeyEventDescriptor {
    pub fn new(key_code: i32, action: KeyAction) -> Self {
        Self {
            key_code,
            action,
            meta_state: 0,
            unicode_char: None,
        }
    }

    pub fn down(key_code: i32) -> Self {
        Self::new(key_code, KeyAction::Down)
    }

    pub fn up(key_code: i32) -> Self {
        Self::new(key_code, KeyAction::Up)
    }

    pub fn with_meta_state(mut self, meta_state: i32) -> Self {
        self.meta_state = meta_state;
        self
    }

    pub fn with_unicode_char(mut self, c: char) -> Self {
        self.unicode_char = Some(c);
        self
    }
}

/// The operations an input method performs on engine-owned text.
///
/// Mutating operations return `false` when the engine rejects the request.
/// Nothing here panics or retries.
pub trait TextEditingHost {
    /// Layout input: system bar, IME and cutout insets.
    fn apply_window_insets(&mut self, insets: &WindowInsets);

    /// Up to `n` units before the selection start. Never splits a
    /// character, so the result may be shorter than `n`.
    fn text_before_cursor(&self, n: i32, flags: i32) -> String;

    /// Up to `n` units after the selection end.
    fn text_after_cursor(&self, n: i32, flags: i32) -> String;

    /// The selected text, empty when the selection is collapsed.
    fn selected_text(&self, flags: i32) -> String;

    /// Replace the composing region (or the selection) and end composition.
    fn commit_text(&mut self, text: &str, new_cursor_position: i32) -> bool;

    /// Delete around the selection, counting UTF-16 units.
    fn delete_surrounding_text(&mut self, before: i32, after: i32) -> bool;

    /// Delete around the selection, counting code points.
    fn delete_surrounding_text_in_code_points(&mut self, before: i32, after: i32) -> bool;

    /// Replace the composing region (or the selection), keeping it composing.
    fn set_composing_text(&mut self, text: &str, new_cursor_position: i32) -> bool;

    /// Hand a key event to the engine's key handling. Returns whether it was
    /// handled.
    fn send_key_event(&mut self, event: &KeyEventDescriptor) -> bool;

    fn set_selection(&mut self, start: i32, end: i32) -> bool;
}

/// Selection and composing region in UTF-16 units.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ImeSelection {
    pub selection: Range<usize>,
    pub composing: Option<Range<usize>>,
}

impl ImeSelection {
    /// `(start, end)` as platform integers.
    pub fn selection_args(&self) -> (i32, i32) {
        (to_arg(self.selection.start), to_arg(self.selection.end))
    }

    /// `(start, end)` as platform integers, `-1` for both when nothing is
    /// composing.
    pub fn composing_args(&self) -> (i32, i32) {
        self.composing
            .as_ref()
            .map_or((-1, -1), |range| (to_arg(range.start), to_arg(range.end)))
    }
}

fn to_arg(offset: usize) -> i32 {
    i32::try_from(offset).unwrap_or(i32::MAX)
}

/// Read access to the engine's selection, for session setup and selection
/// change notifications.
pub trait SelectionSource {
    fn ime_selection(&self) -> ImeSelection;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_action_raw_values() {
        assert_eq!(KeyAction::from_raw(0), Some(KeyAction::Down));
        assert_eq!(KeyAction::from_raw(1), Some(KeyAction::Up));
        assert_eq!(KeyAction::from_raw(2), Some(KeyAction::Multiple));
        assert_eq!(KeyAction::from_raw(7), None);
        assert_eq!(KeyAction::Up.to_raw(), 1);
        assert!(KeyAction::Multiple.is_press());
        assert!(!KeyAction::Up.is_press());
    }

    #[test]
    fn test_composing_args_without_region() {
        let sel = ImeSelection {
            selection: 2..4,
            composing: None,
        };
        assert_eq!(sel.selection_args(), (2, 4));
        assert_eq!(sel.composing_args(), (-1, -1));
    }
}
