//! Keybinding configuration.
//!
//! Maps key combinations to editor actions. Bound actions are stored with a
//! placeholder range; `lookup` substitutes the range the key applies to.

use std::collections::HashMap;

use crate::actions::{EditorAction, Key, KeyCombo, Motion, Range};

/// Key combination -> action table.
#[derive(Debug, Clone)]
pub struct KeybindingConfig {
    bindings: HashMap<KeyCombo, EditorAction>,
}

impl KeybindingConfig {
    /// An empty table with no bindings.
    pub fn empty() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    /// Bind a key combination, replacing any previous binding.
    pub fn bind(&mut self, combo: KeyCombo, action: EditorAction) -> &mut Self {
        self.bindings.insert(combo, action);
        self
    }

    /// Remove a binding. Returns the action it was bound to.
    pub fn unbind(&mut self, combo: &KeyCombo) -> Option<EditorAction> {
        self.bindings.remove(combo)
    }

    /// Look up the action for a key combination, applying `range`.
    pub fn lookup(&self, combo: &KeyCombo, range: Range) -> Option<EditorAction> {
        self.bindings
            .get(combo)
            .cloned()
            .map(|action| action.with_range(range))
    }

    /// Whether the combination is bound.
    pub fn contains(&self, combo: &KeyCombo) -> bool {
        self.bindings.contains_key(combo)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl Default for KeybindingConfig {
    /// Bindings for soft keyboards and hardware keyboards attached to a
    /// touch device.
    fn default() -> Self {
        let placeholder = Range::caret(0);
        let mut config = Self::empty();

        config
            .bind(
                KeyCombo::new(Key::Backspace),
                EditorAction::DeleteBackward { range: placeholder },
            )
            .bind(
                KeyCombo::new(Key::Delete),
                EditorAction::DeleteForward { range: placeholder },
            )
            .bind(
                KeyCombo::ctrl(Key::Backspace),
                EditorAction::DeleteWordBackward { range: placeholder },
            )
            .bind(
                KeyCombo::alt(Key::Backspace),
                EditorAction::DeleteWordBackward { range: placeholder },
            )
            .bind(
                KeyCombo::ctrl(Key::Delete),
                EditorAction::DeleteWordForward { range: placeholder },
            )
            .bind(
                KeyCombo::alt(Key::Delete),
                EditorAction::DeleteWordForward { range: placeholder },
            )
            .bind(
                KeyCombo::ctrl_shift(Key::Backspace),
                EditorAction::DeleteToLineStart { range: placeholder },
            )
            .bind(
                KeyCombo::ctrl_shift(Key::Delete),
                EditorAction::DeleteToLineEnd { range: placeholder },
            )
            .bind(
                KeyCombo::new(Key::Enter),
                EditorAction::InsertLineBreak { range: placeholder },
            )
            .bind(
                KeyCombo::new(Key::Tab),
                EditorAction::Insert {
                    text: "\t".into(),
                    range: placeholder,
                },
            )
            .bind(KeyCombo::ctrl(Key::character("a")), EditorAction::SelectAll);

        let motions = [
            (Key::ArrowLeft, Motion::CharBackward),
            (Key::ArrowRight, Motion::CharForward),
            (Key::Home, Motion::LineStart),
            (Key::End, Motion::LineEnd),
        ];
        for (key, motion) in motions {
            config
                .bind(
                    KeyCombo::new(key.clone()),
                    EditorAction::Move {
                        motion,
                        extend: false,
                    },
                )
                .bind(
                    KeyCombo::shift(key),
                    EditorAction::Move {
                        motion,
                        extend: true,
                    },
                );
        }

        let ctrl_motions = [
            (Key::ArrowLeft, Motion::WordBackward),
            (Key::ArrowRight, Motion::WordForward),
            (Key::Home, Motion::DocumentStart),
            (Key::End, Motion::DocumentEnd),
        ];
        for (key, motion) in ctrl_motions {
            config
                .bind(
                    KeyCombo::ctrl(key.clone()),
                    EditorAction::Move {
                        motion,
                        extend: false,
                    },
                )
                .bind(
                    KeyCombo::ctrl_shift(key),
                    EditorAction::Move {
                        motion,
                        extend: true,
                    },
                );
        }

        config
    }
}
