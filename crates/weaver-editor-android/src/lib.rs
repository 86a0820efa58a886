//! Android glue for the weaver IME bridge.
//!
//! Registers the native methods of the Java editor view, keeps the UI
//! thread's `InputSurface` and drives the view's `InputMethodManager` over
//! JNI. Logging goes to logcat through [`install_log`].
//!
//! The Java view is expected to declare the natives registered by
//! [`register_view`], hold its `InputMethodManager` in an
//! `inputMethodManager` field, and call into its natives from the UI thread
//! only. Everything here must also be called from the UI thread.
//!
//! The crate is empty on other targets.

#![cfg(target_os = "android")]

mod error;
mod log;
mod natives;
mod service;
mod slot;

use jni::JNIEnv;
use jni::objects::{JClass, JObject};
use weaver_editor_ime::weaver_editor_core::EditorEngine;
use weaver_editor_ime::{EditorInfo, InputSurface, SurfaceConfig, SurfaceError};

pub use error::AndroidError;
pub use log::{AndroidWriter, MakeAndroidWriter, install_log};
pub use natives::register_natives;
pub use service::JniInputMethodService;
pub use slot::AndroidSurface;

/// Load `class_name` through the activity's class loader. The system class
/// loader cannot see application classes from a native thread.
pub fn load_view_class<'local>(
    env: &mut JNIEnv<'local>,
    activity: &JObject<'_>,
    class_name: &str,
) -> Result<JClass<'local>, AndroidError> {
    let name = env.new_string(class_name)?;
    let loader = env
        .call_method(activity, "getClassLoader", "()Ljava/lang/ClassLoader;", &[])?
        .l()?;
    if loader.is_null() {
        return Err(AndroidError::Null("class loader"));
    }

    let class = env
        .call_method(
            &loader,
            "loadClass",
            "(Ljava/lang/String;)Ljava/lang/Class;",
            &[(&name).into()],
        )?
        .l()?;
    Ok(JClass::from(class))
}

/// Load the view class and register its natives.
pub fn register_view(
    env: &mut JNIEnv<'_>,
    activity: &JObject<'_>,
    class_name: &str,
) -> Result<(), AndroidError> {
    let class = load_view_class(env, activity, class_name)?;
    register_natives(env, &class)?;
    tracing::debug!(class_name, "view registered");
    Ok(())
}

/// Attach `engine` to a new surface for `view`, replacing any previous one.
/// The window decoration state carries over to the new surface.
pub fn attach(
    env: &mut JNIEnv<'_>,
    view: &JObject<'_>,
    config: SurfaceConfig,
    engine: EditorEngine,
) -> Result<(), AndroidError> {
    let service = JniInputMethodService::new(env, view)?;
    let mut surface = InputSurface::new(config, service);
    surface.attach(engine)?;

    if slot::with_slot(|slot| slot.install(surface))?.is_some() {
        tracing::warn!("replaced an attached input surface");
    }
    Ok(())
}

/// Tear the surface down and hand the engine back.
pub fn detach() -> Result<EditorEngine, AndroidError> {
    let mut surface = slot::with_slot(|slot| slot.take())?.ok_or(SurfaceError::NoSurface)?;
    Ok(surface.detach()?)
}

/// The view's window decoration is attached. Recorded even before a
/// surface is attached.
pub fn decor_attached() {
    slot::with_slot(|slot| slot.set_decor_attached(true));
}

pub fn decor_detached() {
    slot::with_slot(|slot| slot.set_decor_attached(false));
}

/// Fill the platform `EditorInfo` for a new input connection. Safe to call
/// from inside `start_text_input`, which the platform does on restart.
pub fn create_input_connection(
    env: &mut JNIEnv<'_>,
    out_attrs: &JObject<'_>,
) -> Result<(), AndroidError> {
    if out_attrs.is_null() {
        return Err(AndroidError::Null("outAttrs"));
    }

    let mut info = EditorInfo::default();
    slot::with_slot(|slot| slot.create_input_connection(&mut info))?;

    for (field, value) in [
        ("inputType", info.input_type),
        ("imeOptions", info.ime_options),
        ("initialSelStart", info.initial_sel_start),
        ("initialSelEnd", info.initial_sel_end),
    ] {
        env.set_field(out_attrs, field, "I", value.into())?;
    }
    Ok(())
}

pub fn start_text_input() -> Result<(), AndroidError> {
    Ok(slot::with_slot(|slot| slot.start_text_input())?)
}

pub fn end_text_input() -> Result<(), AndroidError> {
    Ok(slot::with_slot(|slot| slot.end_text_input())?)
}

/// Edit the engine from the host side, then report the selection to the
/// input method.
pub fn with_engine<R>(f: impl FnOnce(&mut EditorEngine) -> R) -> Result<R, AndroidError> {
    slot::with_surface(|surface| {
        let engine = surface.host_mut().ok_or(SurfaceError::NotAttached)?;
        let result = f(engine);
        surface.notify_selection_changed()?;
        Ok(result)
    })
}
