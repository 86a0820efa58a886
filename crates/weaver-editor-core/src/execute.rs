//! Applying `EditorAction`s to an `EditorDocument`.

use std::ops::Range as Span;

use crate::actions::{EditorAction, Motion, Range};
use crate::document::EditorDocument;
use crate::text_helpers::{
    find_line_end, find_line_start, find_word_boundary_backward, find_word_boundary_forward,
    motion_target,
};
use crate::types::Selection;

/// Apply `action` to `doc`. Returns false when the action had nothing to
/// act on, such as backspace at the start of the document.
pub fn execute_action<D: EditorDocument>(doc: &mut D, action: &EditorAction) -> bool {
    tracing::trace!(?action, "execute action");

    match action {
        EditorAction::Insert { text, range } => insert(doc, text, *range),
        EditorAction::InsertLineBreak { range } => insert(doc, "\n", *range),
        EditorAction::SelectAll => select_all(doc),
        EditorAction::MoveCursor { offset } => move_cursor(doc, *offset),
        EditorAction::ExtendSelection { offset } => extend_selection(doc, *offset),
        EditorAction::Move { motion, extend } => apply_motion(doc, *motion, *extend),
        deletion => match deletion_span(doc, deletion) {
            Some(span) if !span.is_empty() => {
                doc.delete(span);
                finish_edit(doc);
                true
            }
            _ => false,
        },
    }
}

/// Ordered and clamped to the document.
fn clamp_range<D: EditorDocument>(doc: &D, range: Range) -> Range {
    let len = doc.len_chars();
    let range = range.normalize();
    Range::new(range.start.min(len), range.end.min(len))
}

/// What a delete action removes. A non-empty range is removed as is; a
/// caret grows by the action's unit. The line deletions widen the range to
/// the line edge.
fn deletion_span<D: EditorDocument>(doc: &D, action: &EditorAction) -> Option<Span<usize>> {
    let span = match *action {
        EditorAction::DeleteToLineStart { range } => {
            let range = clamp_range(doc, range);
            find_line_start(doc, range.start)..range.end
        }
        EditorAction::DeleteToLineEnd { range } => {
            let range = clamp_range(doc, range);
            range.start..find_line_end(doc, range.end)
        }
        EditorAction::DeleteBackward { range }
        | EditorAction::DeleteForward { range }
        | EditorAction::DeleteWordBackward { range }
        | EditorAction::DeleteWordForward { range } => {
            let range = clamp_range(doc, range);
            if !range.is_caret() {
                return Some(range.into());
            }
            let at = range.start;
            match action {
                EditorAction::DeleteBackward { .. } => at.saturating_sub(1)..at,
                EditorAction::DeleteForward { .. } => at..(at + 1).min(doc.len_chars()),
                EditorAction::DeleteWordBackward { .. } => {
                    find_word_boundary_backward(doc, at)..at
                }
                _ => at..find_word_boundary_forward(doc, at),
            }
        }
        _ => return None,
    };
    Some(span)
}

/// Edits leave no selection and end any composition; composed text stays
/// in the buffer as ordinary text.
fn finish_edit<D: EditorDocument>(doc: &mut D) {
    doc.set_selection(None);
    doc.set_composition(None);
}

fn insert<D: EditorDocument>(doc: &mut D, text: &str, range: Range) -> bool {
    let range = clamp_range(doc, range);
    doc.splice(range.into(), text);
    finish_edit(doc);
    true
}

fn select_all<D: EditorDocument>(doc: &mut D) -> bool {
    let len = doc.len_chars();
    doc.set_selection(Some(Selection::new(0, len)));
    doc.set_cursor_offset(len);
    true
}

fn move_cursor<D: EditorDocument>(doc: &mut D, offset: usize) -> bool {
    doc.set_cursor_offset(offset.min(doc.len_chars()));
    doc.set_selection(None);
    true
}

fn extend_selection<D: EditorDocument>(doc: &mut D, offset: usize) -> bool {
    let offset = offset.min(doc.len_chars());
    let anchor = doc
        .selection()
        .map_or_else(|| doc.cursor_offset(), |sel| sel.anchor);
    doc.set_selection(Some(Selection::new(anchor, offset)));
    doc.set_cursor_offset(offset);
    true
}

fn apply_motion<D: EditorDocument>(doc: &mut D, motion: Motion, extend: bool) -> bool {
    // A plain arrow press on a selection collapses it to the matching edge.
    if let Some(sel) = doc.selection().filter(|sel| !extend && !sel.is_collapsed()) {
        match motion {
            Motion::CharBackward => return move_cursor(doc, sel.start()),
            Motion::CharForward => return move_cursor(doc, sel.end()),
            _ => {}
        }
    }

    let target = motion_target(doc, doc.cursor_offset(), motion);
    if extend {
        extend_selection(doc, target)
    } else {
        move_cursor(doc, target)
    }
}
