//! Input method operations in char units.
//!
//! These are the engine half of the input method protocol. Offsets and
//! counts here are chars; callers that speak UTF-16 convert before calling
//! (see the adapter in `weaver-editor-ime`).
//!
//! The composing region is a range over buffer text. Committing replaces it
//! and ends composition, composing replaces it and keeps it alive over the
//! new text. Deletions around the selection shift or shrink it.

use std::ops::Range;

use crate::document::EditorDocument;
use crate::types::{CompositionState, Selection};

/// The range the next commit or compose replaces: the composing region if
/// there is one, the selection otherwise.
pub fn replacement_range<D: EditorDocument>(doc: &D) -> Range<usize> {
    let len = doc.len_chars();
    let range = match doc.composition() {
        Some(comp) => comp.to_range(),
        None => doc.selection_range(),
    };
    range.start.min(len)..range.end.min(len)
}

/// Cursor position after inserting `inserted`, using the input method's
/// relative rule.
///
/// A positive position counts from the end of the inserted text, so `1`
/// means directly after it. Zero or negative counts from its start. The
/// result is clamped to `0..=len`. Unit agnostic: pass chars or UTF-16
/// offsets consistently.
pub fn relative_cursor(inserted: Range<usize>, new_cursor_position: i32, len: usize) -> usize {
    let base = if new_cursor_position > 0 {
        inserted.end as i64 + i64::from(new_cursor_position) - 1
    } else {
        inserted.start as i64 + i64::from(new_cursor_position)
    };
    base.clamp(0, len as i64) as usize
}

fn replace_range<D: EditorDocument>(doc: &mut D, range: Range<usize>, text: &str) -> Range<usize> {
    let edit = doc.splice(range, text);
    edit.affected_range()
}

/// Replace the composing region (or selection) with `text` and end
/// composition.
///
/// Leaves the cursor after the inserted text and returns its char range.
pub fn commit_text<D: EditorDocument>(doc: &mut D, text: &str) -> Range<usize> {
    let range = replacement_range(doc);
    let inserted = replace_range(doc, range, text);

    doc.set_composition(None);
    doc.set_selection(None);
    doc.set_cursor_offset(inserted.end);
    inserted
}

/// Replace the composing region (or selection) with `text`, keeping it as
/// the new composing region.
///
/// Empty `text` removes the region and ends composition. Leaves the cursor
/// after the inserted text and returns its char range.
pub fn set_composing_text<D: EditorDocument>(doc: &mut D, text: &str) -> Range<usize> {
    let range = replacement_range(doc);
    let inserted = replace_range(doc, range, text);

    let composition =
        (!inserted.is_empty()).then(|| CompositionState::new(inserted.start, inserted.end));
    doc.set_composition(composition);
    doc.set_selection(None);
    doc.set_cursor_offset(inserted.end);
    inserted
}

/// End composition, leaving the composed text in place.
pub fn finish_composing_text<D: EditorDocument>(doc: &mut D) {
    doc.set_composition(None);
}

/// Delete up to `before` chars preceding the selection and up to `after`
/// chars following it. The selection itself is kept.
///
/// Counts clamp to the buffer. Returns whether anything was deleted.
pub fn delete_surrounding<D: EditorDocument>(doc: &mut D, before: usize, after: usize) -> bool {
    let selection = doc.selection();
    let sel = doc.selection_range();
    let len = doc.len_chars();

    let after_range = sel.end..sel.end.saturating_add(after).min(len);
    let before_range = sel.start.saturating_sub(before)..sel.start;

    if after_range.is_empty() && before_range.is_empty() {
        return false;
    }

    // After first, so the before range stays valid.
    for range in [after_range, before_range.clone()] {
        if range.is_empty() {
            continue;
        }
        doc.delete(range.clone());
        let composition = doc.composition().and_then(|comp| comp.after_delete(range));
        doc.set_composition(composition);
    }

    let shift = before_range.len();
    match selection {
        Some(sel) => {
            let moved = Selection::new(sel.anchor - shift, sel.head - shift);
            doc.set_selection(Some(moved));
            doc.set_cursor_offset(moved.head);
        }
        None => doc.set_cursor_offset(sel.start - shift),
    }
    true
}

/// Set the selection to `start..end` in chars.
///
/// Rejects `start > end` or an end past the buffer. An empty range collapses
/// the selection to a cursor. Composition is left untouched.
pub fn set_selection<D: EditorDocument>(doc: &mut D, start: usize, end: usize) -> bool {
    if start > end || end > doc.len_chars() {
        return false;
    }

    if start == end {
        doc.set_selection(None);
    } else {
        doc.set_selection(Some(Selection::new(start, end)));
    }
    doc.set_cursor_offset(end);
    true
}

/// Up to `n` chars immediately before the selection start.
pub fn text_before_cursor<D: EditorDocument>(doc: &D, n: usize) -> String {
    let start = doc.selection_range().start.min(doc.len_chars());
    doc.slice(start.saturating_sub(n)..start)
        .map(|s| s.to_string())
        .unwrap_or_default()
}

/// Up to `n` chars immediately after the selection end.
pub fn text_after_cursor<D: EditorDocument>(doc: &D, n: usize) -> String {
    let len = doc.len_chars();
    let end = doc.selection_range().end.min(len);
    doc.slice(end..end.saturating_add(n).min(len))
        .map(|s| s.to_string())
        .unwrap_or_default()
}

/// The selected text, or an empty string.
pub fn selected_text<D: EditorDocument>(doc: &D) -> String {
    doc.selected_text()
        .map(|s| s.to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EditorRope, PlainEditor};
    use insta::assert_snapshot;

    fn make_editor(content: &str) -> PlainEditor<EditorRope> {
        PlainEditor::new(EditorRope::from_str(content))
    }

    /// Render the buffer with `|` at the cursor and `[..]` around the
    /// composing region.
    fn render(doc: &PlainEditor<EditorRope>) -> String {
        let mut out = String::new();
        let cursor = doc.cursor_offset();
        let comp = doc.composition();
        for (i, c) in doc.content_string().chars().enumerate() {
            if comp.is_some_and(|comp| comp.end == i) {
                out.push(']');
            }
            if i == cursor {
                out.push('|');
            }
            if comp.is_some_and(|comp| comp.start == i) {
                out.push('[');
            }
            out.push(c);
        }
        let len = doc.len_chars();
        if comp.is_some_and(|comp| comp.end == len) {
            out.push(']');
        }
        if cursor == len {
            out.push('|');
        }
        out
    }

    #[test]
    fn test_relative_cursor() {
        // "ab" inserted at 2..4 in a 6 char buffer.
        assert_eq!(relative_cursor(2..4, 1, 6), 4);
        assert_eq!(relative_cursor(2..4, 2, 6), 5);
        assert_eq!(relative_cursor(2..4, 0, 6), 2);
        assert_eq!(relative_cursor(2..4, -1, 6), 1);
        assert_eq!(relative_cursor(2..4, -10, 6), 0);
        assert_eq!(relative_cursor(2..4, 10, 6), 6);
    }

    #[test]
    fn test_compose_then_commit() {
        let mut doc = make_editor("x ");

        set_composing_text(&mut doc, "a");
        assert_snapshot!(render(&doc), @"x [a]|");

        set_composing_text(&mut doc, "ab");
        assert_snapshot!(render(&doc), @"x [ab]|");

        let inserted = commit_text(&mut doc, "abc");
        assert_eq!(inserted, 2..5);
        assert!(doc.composition().is_none());
        assert_snapshot!(render(&doc), @"x abc|");
    }

    #[test]
    fn test_commit_replaces_selection() {
        let mut doc = make_editor("hello world");
        assert!(set_selection(&mut doc, 6, 11));
        commit_text(&mut doc, "there");
        assert_snapshot!(render(&doc), @"hello there|");
    }

    #[test]
    fn test_empty_composing_text_removes_region() {
        let mut doc = make_editor("ab");
        set_composing_text(&mut doc, "cd");
        set_composing_text(&mut doc, "");
        assert!(doc.composition().is_none());
        assert_snapshot!(render(&doc), @"ab|");
    }

    #[test]
    fn test_delete_surrounding() {
        let mut doc = make_editor("hello");
        assert!(delete_surrounding(&mut doc, 2, 0));
        assert_snapshot!(render(&doc), @"hel|");

        // Oversized counts clamp.
        assert!(delete_surrounding(&mut doc, 99, 99));
        assert_snapshot!(render(&doc), @"|");

        assert!(!delete_surrounding(&mut doc, 1, 1));
    }

    #[test]
    fn test_delete_surrounding_keeps_selection() {
        let mut doc = make_editor("one two three");
        assert!(set_selection(&mut doc, 4, 7));
        assert!(delete_surrounding(&mut doc, 1, 1));
        assert_eq!(doc.content_string(), "onetwothree");
        assert_eq!(doc.selection(), Some(Selection::new(3, 6)));
        assert_eq!(selected_text(&doc), "two");
    }

    #[test]
    fn test_delete_surrounding_shifts_composition() {
        let mut doc = make_editor("ab ");
        set_composing_text(&mut doc, "cd");
        assert_snapshot!(render(&doc), @"ab [cd]|");

        // Moving the cursor into the region and deleting before it shrinks
        // the region from the front.
        doc.set_cursor_offset(4);
        assert!(delete_surrounding(&mut doc, 2, 0));
        assert_eq!(doc.content_string(), "abd");
        assert_eq!(doc.composition(), Some(CompositionState::new(2, 3)));
    }

    #[test]
    fn test_set_selection_validation() {
        let mut doc = make_editor("hello");
        assert!(!set_selection(&mut doc, 3, 2));
        assert!(!set_selection(&mut doc, 0, 6));
        assert_eq!(doc.cursor_offset(), 5);

        assert!(set_selection(&mut doc, 5, 5));
        assert!(doc.selection().is_none());
        assert!(set_selection(&mut doc, 1, 4));
        assert_eq!(selected_text(&doc), "ell");
    }

    #[test]
    fn test_set_selection_leaves_composition() {
        let mut doc = make_editor("");
        set_composing_text(&mut doc, "ab");
        assert!(set_selection(&mut doc, 0, 0));
        assert_eq!(doc.composition(), Some(CompositionState::new(0, 2)));
    }

    #[test]
    fn test_surrounding_text() {
        let mut doc = make_editor("hello world");
        assert!(set_selection(&mut doc, 4, 7));

        assert_eq!(text_before_cursor(&doc, 0), "");
        assert_eq!(text_before_cursor(&doc, 2), "ll");
        assert_eq!(text_before_cursor(&doc, 50), "hell");
        assert_eq!(text_after_cursor(&doc, 3), "orl");
        assert_eq!(text_after_cursor(&doc, 50), "orld");
        assert_eq!(selected_text(&doc), "o w");
    }

    #[test]
    fn test_finish_composing_keeps_text() {
        let mut doc = make_editor("");
        set_composing_text(&mut doc, "né");
        finish_composing_text(&mut doc);
        assert!(doc.composition().is_none());
        assert_snapshot!(render(&doc), @"né|");
    }
}
