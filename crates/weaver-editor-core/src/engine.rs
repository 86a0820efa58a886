//! The editing engine: a document, its keybindings and its layout inputs.

use crate::actions::{EditorAction, Key, KeyCombo, KeydownResult, Range};
use crate::document::{EditorDocument, PlainEditor};
use crate::execute::execute_action;
use crate::ime;
use crate::keybindings::KeybindingConfig;
use crate::layout::{Insets, LayoutState, WindowInsets};
use crate::text::{EditorRope, TextBuffer};

/// A self-contained editing engine.
///
/// Owns all text, cursor, selection, composition and layout state. Platform
/// bridges drive it through the document (for input method operations),
/// `handle_key` (for key events) and `apply_window_insets`.
#[derive(Clone)]
pub struct EditorEngine<T: TextBuffer = EditorRope> {
    doc: PlainEditor<T>,
    keybindings: KeybindingConfig,
    layout: LayoutState,
}

impl<T: TextBuffer> EditorEngine<T> {
    /// Create an engine over `buffer` with the default keybindings.
    pub fn new(buffer: T) -> Self {
        Self {
            doc: PlainEditor::new(buffer),
            keybindings: KeybindingConfig::default(),
            layout: LayoutState::new(),
        }
    }

    pub fn with_keybindings(mut self, keybindings: KeybindingConfig) -> Self {
        self.keybindings = keybindings;
        self
    }

    pub fn document(&self) -> &PlainEditor<T> {
        &self.doc
    }

    pub fn document_mut(&mut self) -> &mut PlainEditor<T> {
        &mut self.doc
    }

    pub fn keybindings(&self) -> &KeybindingConfig {
        &self.keybindings
    }

    pub fn keybindings_mut(&mut self) -> &mut KeybindingConfig {
        &mut self.keybindings
    }

    pub fn layout(&self) -> &LayoutState {
        &self.layout
    }

    /// Feed new window insets into layout. Returns true if they changed.
    pub fn apply_window_insets(&mut self, insets: &WindowInsets) -> bool {
        let changed = self.layout.apply_insets(*insets);
        if changed {
            tracing::debug!(
                revision = self.layout.revision(),
                ?insets,
                "window insets changed"
            );
        }
        changed
    }

    pub fn safe_area(&self) -> Insets {
        self.layout.safe_area()
    }

    /// Whether the engine acts on this key combination.
    pub fn handles_key(&self, combo: &KeyCombo) -> bool {
        self.keybindings.contains(combo) || text_for_key(combo).is_some()
    }

    /// Handle a key press or release.
    ///
    /// A press ends any composition, then runs the bound action or inserts
    /// the key's text. Escape during composition only ends composition. A
    /// release changes nothing and reports whether the press would have been
    /// handled.
    pub fn handle_key(&mut self, combo: &KeyCombo, pressed: bool) -> KeydownResult {
        if !pressed {
            return if self.handles_key(combo) {
                KeydownResult::Handled
            } else {
                KeydownResult::NotHandled
            };
        }

        if self.doc.composition().is_some() && combo.key == Key::Escape {
            ime::finish_composing_text(&mut self.doc);
            return KeydownResult::Handled;
        }

        let range = Range::from(self.doc.selection_range());

        if let Some(action) = self.keybindings.lookup(combo, range) {
            ime::finish_composing_text(&mut self.doc);
            execute_action(&mut self.doc, &action);
            return KeydownResult::Handled;
        }

        if let Some(text) = text_for_key(combo) {
            ime::finish_composing_text(&mut self.doc);
            let action = EditorAction::Insert {
                text: text.to_string(),
                range,
            };
            execute_action(&mut self.doc, &action);
            return KeydownResult::Handled;
        }

        KeydownResult::NotHandled
    }
}

impl<T: TextBuffer + Default> Default for EditorEngine<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

/// Text a key inserts when it is not bound to an action.
fn text_for_key(combo: &KeyCombo) -> Option<&str> {
    if combo.modifiers.has_command() {
        return None;
    }
    match &combo.key {
        Key::Character(s) => Some(s.as_str()),
        Key::Space => Some(" "),
        _ => None,
    }
}
