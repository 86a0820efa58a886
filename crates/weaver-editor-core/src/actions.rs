//! What the engine can be asked to do, and the decoded keys that ask it.
//!
//! Platform layers turn their native key events into `KeyCombo`s; bindings
//! map combos to `EditorAction`s.

use smol_str::SmolStr;

/// A char range an action applies to. Unlike `std::ops::Range` it is `Copy`
/// and may arrive reversed; `normalize` orders it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Range {
    pub start: usize,
    pub end: usize,
}

impl Range {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn caret(offset: usize) -> Self {
        Self::new(offset, offset)
    }

    pub fn is_caret(&self) -> bool {
        self.start == self.end
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn normalize(self) -> Self {
        Self::new(self.start.min(self.end), self.start.max(self.end))
    }
}

impl From<std::ops::Range<usize>> for Range {
    fn from(r: std::ops::Range<usize>) -> Self {
        Self::new(r.start, r.end)
    }
}

impl From<Range> for std::ops::Range<usize> {
    fn from(r: Range) -> Self {
        r.start..r.end
    }
}

/// Cursor motions that need no layout information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Motion {
    CharBackward,
    CharForward,
    WordBackward,
    WordForward,
    LineStart,
    LineEnd,
    DocumentStart,
    DocumentEnd,
}

/// An editing operation, independent of the key or input method that
/// triggered it.
///
/// Actions carrying a `range` act on it: a non-empty range is the text to
/// replace or remove, a caret is where the action's unit is measured from.
#[derive(Debug, Clone, PartialEq)]
pub enum EditorAction {
    Insert { text: String, range: Range },
    InsertLineBreak { range: Range },

    /// Backspace.
    DeleteBackward { range: Range },
    DeleteForward { range: Range },
    DeleteWordBackward { range: Range },
    DeleteWordForward { range: Range },
    DeleteToLineStart { range: Range },
    DeleteToLineEnd { range: Range },

    SelectAll,

    MoveCursor { offset: usize },
    ExtendSelection { offset: usize },
    Move { motion: Motion, extend: bool },
}

impl EditorAction {
    /// The same action aimed at `range`. Actions without one are returned
    /// unchanged.
    pub fn with_range(self, range: Range) -> Self {
        match self {
            Self::Insert { text, .. } => Self::Insert { text, range },
            Self::InsertLineBreak { .. } => Self::InsertLineBreak { range },
            Self::DeleteBackward { .. } => Self::DeleteBackward { range },
            Self::DeleteForward { .. } => Self::DeleteForward { range },
            Self::DeleteWordBackward { .. } => Self::DeleteWordBackward { range },
            Self::DeleteWordForward { .. } => Self::DeleteWordForward { range },
            Self::DeleteToLineStart { .. } => Self::DeleteToLineStart { range },
            Self::DeleteToLineEnd { .. } => Self::DeleteToLineEnd { range },
            other => other,
        }
    }
}

/// A decoded key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    /// Whatever the key types, already shifted.
    Character(SmolStr),
    Unidentified,

    Backspace,
    Delete,
    Enter,
    Tab,
    Escape,
    Space,

    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    Home,
    End,
    PageUp,
    PageDown,

    Alt,
    CapsLock,
    Control,
    Fn,
    Meta,
    NumLock,
    ScrollLock,
    Shift,
    Symbol,
}

impl Key {
    pub fn character(s: impl Into<SmolStr>) -> Self {
        Self::Character(s.into())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        ctrl: false,
        alt: false,
        shift: false,
        meta: false,
    };
    pub const CTRL: Self = Self::NONE.with_ctrl();
    pub const ALT: Self = Self::NONE.with_alt();
    pub const SHIFT: Self = Self::NONE.with_shift();
    pub const META: Self = Self::NONE.with_meta();
    pub const CTRL_SHIFT: Self = Self::CTRL.with_shift();

    pub const fn with_ctrl(self) -> Self {
        Self { ctrl: true, ..self }
    }

    pub const fn with_alt(self) -> Self {
        Self { alt: true, ..self }
    }

    pub const fn with_shift(self) -> Self {
        Self {
            shift: true,
            ..self
        }
    }

    pub const fn with_meta(self) -> Self {
        Self { meta: true, ..self }
    }

    /// Ctrl, alt or meta is held. A character typed with one of these is a
    /// shortcut, not text.
    pub fn has_command(&self) -> bool {
        self.ctrl || self.alt || self.meta
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyCombo {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyCombo {
    pub fn new(key: Key) -> Self {
        Self::with_modifiers(key, Modifiers::NONE)
    }

    pub fn with_modifiers(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }

    pub fn ctrl(key: Key) -> Self {
        Self::with_modifiers(key, Modifiers::CTRL)
    }

    pub fn alt(key: Key) -> Self {
        Self::with_modifiers(key, Modifiers::ALT)
    }

    pub fn shift(key: Key) -> Self {
        Self::with_modifiers(key, Modifiers::SHIFT)
    }

    pub fn ctrl_shift(key: Key) -> Self {
        Self::with_modifiers(key, Modifiers::CTRL_SHIFT)
    }
}

/// Whether the engine consumed a key event.
#[derive(Debug, Clone, PartialEq)]
pub enum KeydownResult {
    Handled,
    /// Neither a binding nor text; the platform may act on it.
    NotHandled,
}

impl KeydownResult {
    pub fn is_handled(&self) -> bool {
        matches!(self, Self::Handled)
    }
}
