//! weaver-editor-core: Pure Rust editing engine without platform dependencies.
//!
//! This crate provides:
//! - `TextBuffer` trait for text storage abstraction
//! - `EditorRope` - ropey-backed implementation
//! - `EditorDocument` trait and `PlainEditor` - cursor, selection, composition
//! - Editor actions, keybindings and key handling
//! - Input method operations in char units (`ime`)
//! - Window inset state for layout (`layout`)
//! - `EditorEngine` - all of the above behind one handle

pub mod actions;
pub mod document;
pub mod engine;
pub mod execute;
pub mod ime;
pub mod keybindings;
pub mod layout;
pub mod text;
pub mod text_helpers;
pub mod types;

pub use actions::{EditorAction, Key, KeyCombo, KeydownResult, Modifiers, Motion, Range};
pub use document::{EditorDocument, PlainEditor};
pub use engine::EditorEngine;
pub use execute::execute_action;
pub use keybindings::KeybindingConfig;
pub use layout::{Insets, LayoutState, WindowInsets};
pub use smol_str::SmolStr;
pub use text::{EditorRope, TextBuffer};
pub use types::{CompositionState, EditInfo, Selection};
