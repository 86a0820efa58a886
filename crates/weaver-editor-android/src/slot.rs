//! The UI thread's input surface.
//!
//! Every native method and every entry point runs on the UI thread, so the
//! surface lives in a thread-local `SurfaceSlot`. A native that arrives
//! while the slot is borrowed gets `SurfaceError::Busy` instead of a panic;
//! starting and ending text input release the slot before calling the
//! `InputMethodManager`, which may call straight back into the view.

use weaver_editor_ime::SurfaceSlot;
use weaver_editor_ime::weaver_editor_core::EditorEngine;

use crate::error::AndroidError;
use crate::service::JniInputMethodService;

pub type AndroidSurface = weaver_editor_ime::InputSurface<EditorEngine, JniInputMethodService>;

type AndroidSlot = SurfaceSlot<EditorEngine, JniInputMethodService>;

thread_local! {
    static SURFACE: AndroidSlot = const { SurfaceSlot::new() };
}

pub fn with_slot<R>(f: impl FnOnce(&AndroidSlot) -> R) -> R {
    SURFACE.with(f)
}

pub fn with_surface<R>(
    f: impl FnOnce(&mut AndroidSurface) -> Result<R, AndroidError>,
) -> Result<R, AndroidError> {
    with_slot(|slot| slot.with_surface(f))
}
