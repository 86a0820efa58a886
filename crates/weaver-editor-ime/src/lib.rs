//! Input method bridge for the weaver editing engine.
//!
//! Connects a platform input method (soft keyboards, composing text, key
//! injection) to an engine that owns all text state. Platform agnostic: the
//! Android glue lives in `weaver-editor-android`.
//!
//! # Architecture
//!
//! - `host`: `TextEditingHost`, the ten operations an input method performs
//! - `adapter`: `TextEditingHost` for `EditorEngine`, UTF-16 <-> char offsets
//! - `keycode`: platform key codes to `KeyCombo`
//! - `bridge`: `InputBridge`, the per-session connection
//! - `insets`: `InsetTranslator`, window inset forwarding
//! - `surface`: `InputSurface`, engine ownership and input-method notifications
//! - `slot`: `SurfaceSlot`, a surface shared with platform callbacks
//!
//! # Re-exports
//!
//! This crate re-exports `weaver-editor-core` for convenience.

pub use weaver_editor_core;

pub mod adapter;
pub mod bridge;
pub mod config;
pub mod error;
pub mod host;
pub mod insets;
pub mod keycode;
pub mod slot;
pub mod surface;

pub use bridge::InputBridge;
pub use config::{ImeAction, InputClass, InputType, SurfaceConfig, TextVariation};
pub use error::{ServiceError, SurfaceError};
pub use host::{
    GET_TEXT_WITH_STYLES, ImeSelection, KeyAction, KeyEventDescriptor, SelectionSource,
    TextEditingHost,
};
pub use insets::{InsetDispatch, InsetSource, InsetTranslator};
pub use slot::SurfaceSlot;
pub use surface::{EditorInfo, InputMethodService, InputSurface};
