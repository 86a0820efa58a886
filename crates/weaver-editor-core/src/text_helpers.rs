//! Line and word boundaries, and where each `Motion` lands.
//!
//! Word characters are alphanumerics and `_`. Everything else, emoji
//! included, separates words.

use crate::actions::Motion;
use crate::document::EditorDocument;

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Step back from `pos` while the char before it satisfies `pred`.
fn scan_back<D: EditorDocument>(doc: &D, mut pos: usize, pred: impl Fn(char) -> bool) -> usize {
    while pos > 0 && doc.char_at(pos - 1).is_some_and(&pred) {
        pos -= 1;
    }
    pos
}

/// Step forward from `pos` while the char at it satisfies `pred`.
fn scan_forward<D: EditorDocument>(doc: &D, mut pos: usize, pred: impl Fn(char) -> bool) -> usize {
    while doc.char_at(pos).is_some_and(&pred) {
        pos += 1;
    }
    pos
}

pub fn find_line_start<D: EditorDocument>(doc: &D, offset: usize) -> usize {
    scan_back(doc, offset.min(doc.len_chars()), |c| c != '\n')
}

/// The line's `\n`, or the end of the document on the last line.
pub fn find_line_end<D: EditorDocument>(doc: &D, offset: usize) -> usize {
    scan_forward(doc, offset.min(doc.len_chars()), |c| c != '\n')
}

/// Start of the word before `cursor`, skipping separators first.
pub fn find_word_boundary_backward<D: EditorDocument>(doc: &D, cursor: usize) -> usize {
    let pos = scan_back(doc, cursor.min(doc.len_chars()), |c| !is_word_char(c));
    scan_back(doc, pos, is_word_char)
}

/// Start of the next word: the rest of this word, then separators.
pub fn find_word_boundary_forward<D: EditorDocument>(doc: &D, cursor: usize) -> usize {
    let pos = scan_forward(doc, cursor.min(doc.len_chars()), is_word_char);
    scan_forward(doc, pos, |c| !is_word_char(c))
}

/// Where `motion` takes a cursor at `head`.
pub fn motion_target<D: EditorDocument>(doc: &D, head: usize, motion: Motion) -> usize {
    let len = doc.len_chars();
    let head = head.min(len);
    match motion {
        Motion::CharBackward => head.saturating_sub(1),
        Motion::CharForward => (head + 1).min(len),
        Motion::WordBackward => find_word_boundary_backward(doc, head),
        Motion::WordForward => find_word_boundary_forward(doc, head),
        Motion::LineStart => find_line_start(doc, head),
        Motion::LineEnd => find_line_end(doc, head),
        Motion::DocumentStart => 0,
        Motion::DocumentEnd => len,
    }
}
