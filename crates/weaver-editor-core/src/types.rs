//! Selection, composition and edit records. All offsets are char offsets.

use std::ops::Range;

/// A selection from `anchor` (where it started) to `head` (the cursor).
/// `head` may sit before `anchor`.
#[derive(Clone, Debug, Copy, PartialEq, Eq)]
pub struct Selection {
    pub anchor: usize,
    pub head: usize,
}

impl Selection {
    pub fn new(anchor: usize, head: usize) -> Self {
        Self { anchor, head }
    }

    pub fn collapsed(offset: usize) -> Self {
        Self::new(offset, offset)
    }

    pub fn start(&self) -> usize {
        self.anchor.min(self.head)
    }

    pub fn end(&self) -> usize {
        self.anchor.max(self.head)
    }

    pub fn is_collapsed(&self) -> bool {
        self.anchor == self.head
    }

    pub fn len(&self) -> usize {
        self.end() - self.start()
    }

    pub fn is_empty(&self) -> bool {
        self.is_collapsed()
    }

    /// Ordered bounds.
    pub fn to_range(&self) -> Range<usize> {
        self.start()..self.end()
    }

    pub fn is_backwards(&self) -> bool {
        self.head < self.anchor
    }
}

/// The IME composing region: text the input method has placed in the buffer
/// but not committed. Only the bounds are kept; the text is ordinary buffer
/// content.
#[derive(Clone, Debug, Copy, PartialEq, Eq)]
pub struct CompositionState {
    /// Char offset where the composing region starts
    pub start: usize,
    /// Char offset where the composing region ends (exclusive)
    pub end: usize,
}

impl CompositionState {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Composition covering `len` chars starting at `start`.
    pub fn with_len(start: usize, len: usize) -> Self {
        Self {
            start,
            end: start + len,
        }
    }

    /// Number of chars in the composing region.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn contains(&self, offset: usize) -> bool {
        offset >= self.start && offset < self.end
    }

    pub fn to_range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Composition bounds after `deleted` was removed from the buffer.
    ///
    /// Returns None if the whole region was deleted.
    pub fn after_delete(&self, deleted: Range<usize>) -> Option<Self> {
        let removed = deleted.len();
        let shift = |offset: usize| {
            if offset <= deleted.start {
                offset
            } else if offset >= deleted.end {
                offset - removed
            } else {
                deleted.start
            }
        };

        let adjusted = Self::new(shift(self.start), shift(self.end));
        (!adjusted.is_empty()).then_some(adjusted)
    }
}

/// The most recent edit, kept so a host can invalidate only what changed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EditInfo {
    pub edit_char_pos: usize,
    pub inserted_len: usize,
    pub deleted_len: usize,
    /// The inserted or removed text had a line break, so line layout after
    /// `edit_char_pos` is invalid too.
    pub contains_newline: bool,
    pub doc_len_after: usize,
}

impl EditInfo {
    /// A later edit has changed the document length.
    pub fn is_stale(&self, current_doc_len: usize) -> bool {
        self.doc_len_after != current_doc_len
    }

    /// The inserted text's range, empty for a pure deletion.
    pub fn affected_range(&self) -> Range<usize> {
        self.edit_char_pos..self.edit_char_pos + self.inserted_len
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backwards_selection_orders_bounds() {
        let sel = Selection::new(10, 5);
        assert!(sel.is_backwards());
        assert_eq!(sel.to_range(), 5..10);
        assert_eq!(sel.len(), 5);
        assert!(!Selection::new(5, 10).is_backwards());
    }

    #[test]
    fn test_collapsed_selection() {
        let sel = Selection::collapsed(7);
        assert!(sel.is_empty());
        assert_eq!(sel.to_range(), 7..7);
    }

    #[test]
    fn test_composition_contains() {
        let comp = CompositionState::with_len(10, 2);
        assert_eq!(comp.end, 12);
        assert!(!comp.contains(9));
        assert!(comp.contains(10));
        assert!(comp.contains(11));
        assert!(!comp.contains(12));
    }

    #[test]
    fn test_composition_after_delete_before_region() {
        let comp = CompositionState::new(5, 8);
        assert_eq!(comp.after_delete(0..2), Some(CompositionState::new(3, 6)));
    }

    #[test]
    fn test_composition_after_delete_after_region() {
        let comp = CompositionState::new(5, 8);
        assert_eq!(comp.after_delete(8..10), Some(comp));
    }

    #[test]
    fn test_composition_after_delete_overlapping() {
        let comp = CompositionState::new(5, 8);
        // Deleting 3..6 eats the first composing char.
        assert_eq!(comp.after_delete(3..6), Some(CompositionState::new(3, 5)));
        // Deleting 7..9 eats the last one.
        assert_eq!(comp.after_delete(7..9), Some(CompositionState::new(5, 7)));
    }

    #[test]
    fn test_composition_after_delete_whole_region() {
        let comp = CompositionState::new(5, 8);
        assert_eq!(comp.after_delete(4..9), None);
    }

    #[test]
    fn test_edit_info_stale() {
        let edit = EditInfo {
            edit_char_pos: 5,
            inserted_len: 3,
            deleted_len: 0,
            contains_newline: false,
            doc_len_after: 100,
        };

        assert!(!edit.is_stale(100));
        assert!(edit.is_stale(101));
        assert_eq!(edit.affected_range(), 5..8);
    }
}
