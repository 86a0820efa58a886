//! `TextEditingHost` for the weaver editing engine.
//!
//! Input methods count in UTF-16 code units, the engine in chars. Every
//! offset crossing this boundary is converted here:
//!
//! - queries narrow, so a surrogate pair cut by the window is left out;
//! - unit-count deletions widen, so a pair cut by the count goes whole;
//! - selections must land on char boundaries or are rejected.

use std::ops::Range;

use weaver_editor_core::{EditorDocument, EditorEngine, TextBuffer, WindowInsets, ime};

use crate::host::{ImeSelection, KeyEventDescriptor, SelectionSource, TextEditingHost};
use crate::keycode;

fn count(n: i32) -> Option<usize> {
    usize::try_from(n).ok()
}

/// Move the cursor by the relative rule, measured in UTF-16 units.
fn place_cursor<D: EditorDocument>(doc: &mut D, inserted: Range<usize>, new_cursor_position: i32) {
    let buffer = doc.buffer();
    let inserted = buffer.chars_to_utf16(inserted);
    let target = ime::relative_cursor(inserted, new_cursor_position, buffer.len_utf16());
    let cursor = buffer.utf16_to_char(target);
    doc.set_cursor_offset(cursor);
}

impl<T: TextBuffer> TextEditingHost for EditorEngine<T> {
    fn apply_window_insets(&mut self, insets: &WindowInsets) {
        EditorEngine::apply_window_insets(self, insets);
    }

    fn text_before_cursor(&self, n: i32, _flags: i32) -> String {
        let Some(n) = count(n).filter(|n| *n > 0) else {
            return String::new();
        };
        let doc = self.document();
        let buffer = doc.buffer();
        let start = doc.selection_range().start.min(doc.len_chars());

        let from = buffer.utf16_to_char_ceil(buffer.char_to_utf16(start).saturating_sub(n));
        ime::text_before_cursor(doc, start - from)
    }

    fn text_after_cursor(&self, n: i32, _flags: i32) -> String {
        let Some(n) = count(n).filter(|n| *n > 0) else {
            return String::new();
        };
        let doc = self.document();
        let buffer = doc.buffer();
        let end = doc.selection_range().end.min(doc.len_chars());

        let to = buffer.utf16_to_char(buffer.char_to_utf16(end).saturating_add(n));
        ime::text_after_cursor(doc, to.saturating_sub(end))
    }

    fn selected_text(&self, _flags: i32) -> String {
        ime::selected_text(self.document())
    }

    fn commit_text(&mut self, text: &str, new_cursor_position: i32) -> bool {
        let doc = self.document_mut();
        let inserted = ime::commit_text(doc, text);
        place_cursor(doc, inserted, new_cursor_position);
        true
    }

    fn delete_surrounding_text(&mut self, before: i32, after: i32) -> bool {
        let (Some(before), Some(after)) = (count(before), count(after)) else {
            return false;
        };
        let doc = self.document_mut();
        let buffer = doc.buffer();
        let sel = doc.selection_range();

        let from = buffer.utf16_to_char(buffer.char_to_utf16(sel.start).saturating_sub(before));
        let to = buffer.utf16_to_char_ceil(buffer.char_to_utf16(sel.end).saturating_add(after));
        let (before_chars, after_chars) = (sel.start - from, to.saturating_sub(sel.end));

        tracing::trace!(before_chars, after_chars, "delete surrounding in chars");
        ime::delete_surrounding(doc, before_chars, after_chars);
        true
    }

    fn delete_surrounding_text_in_code_points(&mut self, before: i32, after: i32) -> bool {
        let (Some(before), Some(after)) = (count(before), count(after)) else {
            return false;
        };
        ime::delete_surrounding(self.document_mut(), before, after);
        true
    }

    fn set_composing_text(&mut self, text: &str, new_cursor_position: i32) -> bool {
        let doc = self.document_mut();
        let inserted = ime::set_composing_text(doc, text);
        place_cursor(doc, inserted, new_cursor_position);
        true
    }

    fn send_key_event(&mut self, event: &KeyEventDescriptor) -> bool {
        let combo = keycode::key_combo(event);
        tracing::trace!(?combo, action = ?event.action, "decoded key event");
        self.handle_key(&combo, event.action.is_press()).is_handled()
    }

    fn set_selection(&mut self, start: i32, end: i32) -> bool {
        let (Some(start), Some(end)) = (count(start), count(end)) else {
            return false;
        };
        if start > end {
            return false;
        }
        let buffer = self.document().buffer();
        let (Some(start), Some(end)) = (
            buffer.utf16_to_char_exact(start),
            buffer.utf16_to_char_exact(end),
        ) else {
            return false;
        };
        ime::set_selection(self.document_mut(), start, end)
    }
}

impl<T: TextBuffer> SelectionSource for EditorEngine<T> {
    fn ime_selection(&self) -> ImeSelection {
        let doc = self.document();
        let buffer = doc.buffer();
        ImeSelection {
            selection: buffer.chars_to_utf16(doc.selection_range()),
            composing: doc
                .composition()
                .map(|comp| buffer.chars_to_utf16(comp.to_range())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use weaver_editor_core::EditorRope;

    fn make_engine(content: &str) -> EditorEngine {
        EditorEngine::new(EditorRope::from_str(content))
    }

    #[test]
    fn test_queries_never_split_pairs() {
        let mut engine = make_engine("a🌍b");
        assert!(engine.set_selection(3, 3));

        // One unit before the cursor is half of the pair.
        assert_eq!(engine.text_before_cursor(1, 0), "");
        assert_eq!(engine.text_before_cursor(2, 0), "🌍");
        assert_eq!(engine.text_before_cursor(3, 0), "a🌍");

        assert!(engine.set_selection(1, 1));
        assert_eq!(engine.text_after_cursor(1, 0), "");
        assert_eq!(engine.text_after_cursor(3, 0), "🌍b");
    }

    #[test]
    fn test_unit_deletion_widens_to_whole_pair() {
        let mut engine = make_engine("a🌍");
        assert!(engine.delete_surrounding_text(1, 0));
        assert_eq!(engine.document().content_string(), "a");
    }

    #[test]
    fn test_set_selection_rejects_mid_pair() {
        let mut engine = make_engine("🌍x");
        assert!(!engine.set_selection(1, 3));
        assert!(engine.set_selection(2, 3));
        assert_eq!(TextEditingHost::selected_text(&engine, 0), "x");
    }

    #[test]
    fn test_selection_in_utf16() {
        let mut engine = make_engine("🌍xy");
        assert!(engine.set_selection(2, 4));
        assert_eq!(
            engine.ime_selection(),
            ImeSelection {
                selection: 2..4,
                composing: None,
            }
        );
    }
}
