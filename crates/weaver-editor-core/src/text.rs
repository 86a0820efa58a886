//! Text storage.
//!
//! The engine addresses text in chars (Unicode scalar values). Input methods
//! address it in UTF-16 code units, so every buffer also converts between
//! the two. A UTF-16 offset can land between the halves of a surrogate pair;
//! the conversions below say which way such an offset rounds.

use smol_str::{SmolStr, ToSmolStr};
use std::ops::Range;

pub trait TextBuffer {
    fn len_chars(&self) -> usize;

    fn len_utf16(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len_chars() == 0
    }

    fn insert(&mut self, char_offset: usize, text: &str);

    fn delete(&mut self, char_range: Range<usize>);

    fn replace(&mut self, char_range: Range<usize>, text: &str) {
        self.delete(char_range.clone());
        self.insert(char_range.start, text);
    }

    /// `None` if the range is reversed or runs past the end.
    fn slice(&self, char_range: Range<usize>) -> Option<SmolStr>;

    fn char_at(&self, char_offset: usize) -> Option<char>;

    fn to_string(&self) -> String;

    /// Clamps past the end.
    fn char_to_utf16(&self, char_offset: usize) -> usize;

    /// Rounds down inside a surrogate pair and clamps past the end.
    fn utf16_to_char(&self, utf16_offset: usize) -> usize;

    /// Rounds up inside a surrogate pair and clamps past the end.
    fn utf16_to_char_ceil(&self, utf16_offset: usize) -> usize {
        let char_offset = self.utf16_to_char(utf16_offset);
        if self.char_to_utf16(char_offset) < utf16_offset.min(self.len_utf16()) {
            char_offset + 1
        } else {
            char_offset
        }
    }

    /// `None` unless the offset is inside the buffer and on a char boundary.
    fn utf16_to_char_exact(&self, utf16_offset: usize) -> Option<usize> {
        if utf16_offset > self.len_utf16() {
            return None;
        }
        let char_offset = self.utf16_to_char(utf16_offset);
        (self.char_to_utf16(char_offset) == utf16_offset).then_some(char_offset)
    }

    fn chars_to_utf16(&self, char_range: Range<usize>) -> Range<usize> {
        self.char_to_utf16(char_range.start)..self.char_to_utf16(char_range.end)
    }
}

/// Ropey-backed buffer. Edits and offset conversions are O(log n).
#[derive(Clone, Default)]
pub struct EditorRope {
    rope: ropey::Rope,
}

impl EditorRope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_str(s: &str) -> Self {
        Self {
            rope: ropey::Rope::from_str(s),
        }
    }

    pub fn rope(&self) -> &ropey::Rope {
        &self.rope
    }
}

impl TextBuffer for EditorRope {
    fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    fn len_utf16(&self) -> usize {
        self.rope.len_utf16_cu()
    }

    fn insert(&mut self, char_offset: usize, text: &str) {
        self.rope.insert(char_offset, text);
    }

    fn delete(&mut self, char_range: Range<usize>) {
        self.rope.remove(char_range);
    }

    fn slice(&self, char_range: Range<usize>) -> Option<SmolStr> {
        if char_range.start > char_range.end || char_range.end > self.len_chars() {
            return None;
        }
        Some(self.rope.slice(char_range).to_smolstr())
    }

    fn char_at(&self, char_offset: usize) -> Option<char> {
        (char_offset < self.len_chars()).then(|| self.rope.char(char_offset))
    }

    fn to_string(&self) -> String {
        self.rope.to_string()
    }

    fn char_to_utf16(&self, char_offset: usize) -> usize {
        self.rope
            .char_to_utf16_cu(char_offset.min(self.rope.len_chars()))
    }

    fn utf16_to_char(&self, utf16_offset: usize) -> usize {
        self.rope
            .utf16_cu_to_char(utf16_offset.min(self.rope.len_utf16_cu()))
    }
}

impl From<&str> for EditorRope {
    fn from(s: &str) -> Self {
        Self::from_str(s)
    }
}

impl From<String> for EditorRope {
    fn from(s: String) -> Self {
        Self::from_str(&s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edits() {
        let mut rope = EditorRope::from_str("hello world");

        rope.insert(5, " big");
        assert_eq!(rope.to_string(), "hello big world");

        rope.delete(5..9);
        assert_eq!(rope.to_string(), "hello world");

        rope.replace(6..11, "rust");
        assert_eq!(rope.to_string(), "hello rust");
    }

    #[test]
    fn test_out_of_range_reads() {
        let rope = EditorRope::from_str("hello");
        assert_eq!(rope.char_at(4), Some('o'));
        assert_eq!(rope.char_at(5), None);
        assert_eq!(rope.slice(1..3).as_deref(), Some("el"));
        assert_eq!(rope.slice(3..1), None);
        assert_eq!(rope.slice(0..100), None);
    }

    #[test]
    fn test_utf16_rounding() {
        // The globe is a surrogate pair: units 1 and 2.
        let rope = EditorRope::from_str("a🌍b");
        assert_eq!(rope.len_chars(), 3);
        assert_eq!(rope.len_utf16(), 4);

        assert_eq!(rope.char_to_utf16(2), 3);
        assert_eq!(rope.utf16_to_char(3), 2);

        assert_eq!(rope.utf16_to_char(2), 1);
        assert_eq!(rope.utf16_to_char_ceil(2), 2);
        assert_eq!(rope.utf16_to_char_exact(2), None);

        assert_eq!(rope.utf16_to_char_ceil(1), 1);
        assert_eq!(rope.utf16_to_char_ceil(99), 3);
        assert_eq!(rope.utf16_to_char_exact(3), Some(2));
        assert_eq!(rope.utf16_to_char_exact(5), None);

        assert_eq!(rope.chars_to_utf16(1..3), 1..4);
    }
}
