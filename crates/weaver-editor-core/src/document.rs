//! Core editor document trait and implementations.
//!
//! Defines the `EditorDocument` trait for abstracting editor state, allowing
//! different storage strategies while sharing the core editing logic in
//! [`execute`](crate::execute) and [`ime`](crate::ime).

use std::ops::Range;

use smol_str::SmolStr;

use crate::text::TextBuffer;
use crate::types::{CompositionState, EditInfo, Selection};

/// Editor state as the engine sees it: a buffer plus cursor, selection,
/// composition and the last edit.
///
/// Offsets are char offsets. The cursor is the head of the selection; `None`
/// means collapsed at the cursor.
pub trait EditorDocument {
    type Buffer: TextBuffer;

    fn buffer(&self) -> &Self::Buffer;
    fn buffer_mut(&mut self) -> &mut Self::Buffer;

    fn cursor_offset(&self) -> usize;
    fn set_cursor_offset(&mut self, offset: usize);

    fn selection(&self) -> Option<Selection>;
    fn set_selection(&mut self, selection: Option<Selection>);

    fn last_edit(&self) -> Option<EditInfo>;
    fn set_last_edit(&mut self, edit: Option<EditInfo>);

    /// The IME composing region, if one is open.
    fn composition(&self) -> Option<CompositionState>;
    fn set_composition(&mut self, composition: Option<CompositionState>);

    fn content_string(&self) -> String {
        self.buffer().to_string()
    }

    fn len_chars(&self) -> usize {
        self.buffer().len_chars()
    }

    fn is_empty(&self) -> bool {
        self.len_chars() == 0
    }

    fn slice(&self, range: Range<usize>) -> Option<SmolStr> {
        self.buffer().slice(range)
    }

    fn char_at(&self, offset: usize) -> Option<char> {
        self.buffer().char_at(offset)
    }

    /// The selection as an ordered range, collapsed at the cursor when
    /// nothing is selected.
    fn selection_range(&self) -> Range<usize> {
        match self.selection() {
            Some(sel) => sel.to_range(),
            None => {
                let cursor = self.cursor_offset();
                cursor..cursor
            }
        }
    }

    /// Text under a non-empty selection.
    fn selected_text(&self) -> Option<SmolStr> {
        self.selection()
            .filter(|sel| !sel.is_collapsed())
            .and_then(|sel| self.slice(sel.to_range()))
    }

    /// Replace `range` with `text`, leave the cursor after the inserted text
    /// and record the edit. Insertion and deletion are the two degenerate
    /// cases.
    fn splice(&mut self, range: Range<usize>, text: &str) -> EditInfo {
        let removed_newline = !range.is_empty()
            && self
                .slice(range.clone())
                .is_some_and(|removed| removed.contains('\n'));

        match (range.is_empty(), text.is_empty()) {
            (true, true) => {}
            (true, false) => self.buffer_mut().insert(range.start, text),
            (false, true) => self.buffer_mut().delete(range.clone()),
            (false, false) => self.buffer_mut().replace(range.clone(), text),
        }

        let inserted_len = text.chars().count();
        self.set_cursor_offset(range.start + inserted_len);

        let edit = EditInfo {
            edit_char_pos: range.start,
            inserted_len,
            deleted_len: range.len(),
            contains_newline: removed_newline || text.contains('\n'),
            doc_len_after: self.len_chars(),
        };
        self.set_last_edit(Some(edit.clone()));
        edit
    }

    fn insert(&mut self, offset: usize, text: &str) -> EditInfo {
        self.splice(offset..offset, text)
    }

    fn delete(&mut self, range: Range<usize>) -> EditInfo {
        self.splice(range, "")
    }

    fn replace(&mut self, range: Range<usize>, text: &str) -> EditInfo {
        self.splice(range, text)
    }
}

/// `EditorDocument` over plain fields.
#[derive(Clone, Default)]
pub struct PlainEditor<T: TextBuffer> {
    buffer: T,
    cursor: usize,
    selection: Option<Selection>,
    last_edit: Option<EditInfo>,
    composition: Option<CompositionState>,
}

impl<T: TextBuffer> PlainEditor<T> {
    /// Cursor starts at the end of `buffer`.
    pub fn new(buffer: T) -> Self {
        let cursor = buffer.len_chars();
        Self {
            buffer,
            cursor,
            selection: None,
            last_edit: None,
            composition: None,
        }
    }
}

impl<T: TextBuffer> EditorDocument for PlainEditor<T> {
    type Buffer = T;

    fn buffer(&self) -> &T {
        &self.buffer
    }

    fn buffer_mut(&mut self) -> &mut T {
        &mut self.buffer
    }

    fn cursor_offset(&self) -> usize {
        self.cursor
    }

    fn set_cursor_offset(&mut self, offset: usize) {
        self.cursor = offset;
    }

    fn selection(&self) -> Option<Selection> {
        self.selection
    }

    fn set_selection(&mut self, selection: Option<Selection>) {
        self.selection = selection;
    }

    fn last_edit(&self) -> Option<EditInfo> {
        self.last_edit.clone()
    }

    fn set_last_edit(&mut self, edit: Option<EditInfo>) {
        self.last_edit = edit;
    }

    fn composition(&self) -> Option<CompositionState> {
        self.composition
    }

    fn set_composition(&mut self, composition: Option<CompositionState>) {
        self.composition = composition;
    }
}
