//! Native methods of the Java view.
//!
//! Each native borrows the UI thread's surface for the length of the call.
//! Mutating natives report the resulting selection to the input method
//! once the engine has returned. Failures are logged and answered with the
//! operation's failure value: `false`, or a null string.

use std::ffi::c_void;

use jni::objects::{JClass, JObject, JString};
use jni::sys::{JNI_FALSE, JNI_TRUE, jboolean, jint, jstring};
use jni::{JNIEnv, NativeMethod};
use weaver_editor_ime::weaver_editor_core::WindowInsets;
use weaver_editor_ime::{InputBridge, KeyAction, KeyEventDescriptor};

use crate::error::AndroidError;
use crate::slot::with_surface;

pub fn register_natives(env: &mut JNIEnv<'_>, class: &JClass<'_>) -> Result<(), AndroidError> {
    let methods = [
        native(
            "onApplyWindowInsetsNative",
            "(IIIIIIIIIIII)V",
            on_apply_window_insets as *mut c_void,
        ),
        native(
            "getTextBeforeCursorNative",
            "(II)Ljava/lang/String;",
            get_text_before_cursor as *mut c_void,
        ),
        native(
            "getTextAfterCursorNative",
            "(II)Ljava/lang/String;",
            get_text_after_cursor as *mut c_void,
        ),
        native(
            "getSelectedTextNative",
            "(I)Ljava/lang/String;",
            get_selected_text as *mut c_void,
        ),
        native(
            "commitTextNative",
            "(Ljava/lang/String;I)Z",
            commit_text as *mut c_void,
        ),
        native(
            "deleteSurroundingTextNative",
            "(II)Z",
            delete_surrounding_text as *mut c_void,
        ),
        native(
            "deleteSurroundingTextInCodePointsNative",
            "(II)Z",
            delete_surrounding_text_in_code_points as *mut c_void,
        ),
        native(
            "setComposingTextNative",
            "(Ljava/lang/String;I)Z",
            set_composing_text as *mut c_void,
        ),
        native(
            "sendKeyEventNative",
            "(Landroid/view/KeyEvent;)Z",
            send_key_event as *mut c_void,
        ),
        native("setSelectionNative", "(II)Z", set_selection as *mut c_void),
    ];

    env.register_native_methods(class, &methods)?;
    tracing::debug!(count = methods.len(), "registered view natives");
    Ok(())
}

fn native(name: &str, sig: &str, fn_ptr: *mut c_void) -> NativeMethod {
    NativeMethod {
        name: name.into(),
        sig: sig.into(),
        fn_ptr,
    }
}

/// Run a mutating bridge operation, then report the selection.
fn edit(
    op: &'static str,
    f: impl FnOnce(&mut InputBridge<'_>) -> bool,
) -> Result<bool, AndroidError> {
    with_surface(|surface| {
        let handled = f(&mut surface.bridge()?);
        if let Err(err) = surface.notify_selection_changed() {
            tracing::warn!(op, %err, "selection update failed");
        }
        Ok(handled)
    })
}

fn query(op: &'static str, f: impl FnOnce(&InputBridge<'_>) -> String) -> Option<String> {
    match with_surface(|surface| Ok(f(&surface.bridge()?))) {
        Ok(text) => Some(text),
        Err(err) => {
            tracing::error!(op, %err, "ime query failed");
            None
        }
    }
}

fn answer(op: &'static str, result: Result<bool, AndroidError>) -> jboolean {
    match result {
        Ok(true) => JNI_TRUE,
        Ok(false) => JNI_FALSE,
        Err(err) => {
            tracing::error!(op, %err, "ime call failed");
            JNI_FALSE
        }
    }
}

fn to_java(env: &mut JNIEnv<'_>, op: &'static str, text: Option<String>) -> jstring {
    let Some(text) = text else {
        return std::ptr::null_mut();
    };
    match env.new_string(text) {
        Ok(string) => string.into_raw(),
        Err(err) => {
            tracing::error!(op, %err, "failed creating java string");
            std::ptr::null_mut()
        }
    }
}

fn from_java(env: &mut JNIEnv<'_>, text: &JString<'_>) -> Result<String, AndroidError> {
    if text.is_null() {
        return Err(AndroidError::Null("text"));
    }
    Ok(env.get_string(text)?.into())
}

fn int_method(env: &mut JNIEnv<'_>, obj: &JObject<'_>, name: &str) -> Result<i32, AndroidError> {
    Ok(env.call_method(obj, name, "()I", &[])?.i()?)
}

fn key_event(
    env: &mut JNIEnv<'_>,
    event: &JObject<'_>,
) -> Result<KeyEventDescriptor, AndroidError> {
    if event.is_null() {
        return Err(AndroidError::Null("event"));
    }

    let key_code = int_method(env, event, "getKeyCode")?;
    let action = int_method(env, event, "getAction")?;
    let meta_state = int_method(env, event, "getMetaState")?;
    let unicode = int_method(env, event, "getUnicodeChar")?;

    // Unknown actions are treated as presses.
    let action = KeyAction::from_raw(action).unwrap_or(KeyAction::Down);
    let mut descriptor = KeyEventDescriptor::new(key_code, action).with_meta_state(meta_state);
    // Zero means no character; the high bit flags a dead key.
    if let Some(c) = u32::try_from(unicode)
        .ok()
        .filter(|c| *c != 0)
        .and_then(char::from_u32)
    {
        descriptor = descriptor.with_unicode_char(c);
    }
    Ok(descriptor)
}

#[allow(clippy::too_many_arguments)]
extern "system" fn on_apply_window_insets<'local>(
    _env: JNIEnv<'local>,
    _view: JObject<'local>,
    system_bars_left: jint,
    system_bars_top: jint,
    system_bars_right: jint,
    system_bars_bottom: jint,
    ime_left: jint,
    ime_top: jint,
    ime_right: jint,
    ime_bottom: jint,
    cutout_left: jint,
    cutout_top: jint,
    cutout_right: jint,
    cutout_bottom: jint,
) {
    let insets = WindowInsets::from_args([
        system_bars_left,
        system_bars_top,
        system_bars_right,
        system_bars_bottom,
        ime_left,
        ime_top,
        ime_right,
        ime_bottom,
        cutout_left,
        cutout_top,
        cutout_right,
        cutout_bottom,
    ]);

    match with_surface(|surface| Ok(surface.apply_window_insets(&insets)?)) {
        Ok(dispatch) => tracing::trace!(?dispatch, "window insets"),
        Err(err) => tracing::error!(%err, "window insets not applied"),
    }
}

extern "system" fn get_text_before_cursor<'local>(
    mut env: JNIEnv<'local>,
    _view: JObject<'local>,
    n: jint,
    flags: jint,
) -> jstring {
    let op = "getTextBeforeCursor";
    let text = query(op, |bridge| bridge.text_before_cursor(n, flags));
    to_java(&mut env, op, text)
}

extern "system" fn get_text_after_cursor<'local>(
    mut env: JNIEnv<'local>,
    _view: JObject<'local>,
    n: jint,
    flags: jint,
) -> jstring {
    let op = "getTextAfterCursor";
    let text = query(op, |bridge| bridge.text_after_cursor(n, flags));
    to_java(&mut env, op, text)
}

extern "system" fn get_selected_text<'local>(
    mut env: JNIEnv<'local>,
    _view: JObject<'local>,
    flags: jint,
) -> jstring {
    let op = "getSelectedText";
    let text = query(op, |bridge| bridge.selected_text(flags));
    to_java(&mut env, op, text)
}

extern "system" fn commit_text<'local>(
    mut env: JNIEnv<'local>,
    _view: JObject<'local>,
    text: JString<'local>,
    new_cursor_position: jint,
) -> jboolean {
    let result = from_java(&mut env, &text).and_then(|text| {
        edit("commitText", |bridge| {
            bridge.commit_text(&text, new_cursor_position)
        })
    });
    answer("commitText", result)
}

extern "system" fn delete_surrounding_text<'local>(
    _env: JNIEnv<'local>,
    _view: JObject<'local>,
    before: jint,
    after: jint,
) -> jboolean {
    let op = "deleteSurroundingText";
    answer(
        op,
        edit(op, |bridge| bridge.delete_surrounding_text(before, after)),
    )
}

extern "system" fn delete_surrounding_text_in_code_points<'local>(
    _env: JNIEnv<'local>,
    _view: JObject<'local>,
    before: jint,
    after: jint,
) -> jboolean {
    let op = "deleteSurroundingTextInCodePoints";
    answer(
        op,
        edit(op, |bridge| {
            bridge.delete_surrounding_text_in_code_points(before, after)
        }),
    )
}

extern "system" fn set_composing_text<'local>(
    mut env: JNIEnv<'local>,
    _view: JObject<'local>,
    text: JString<'local>,
    new_cursor_position: jint,
) -> jboolean {
    let result = from_java(&mut env, &text).and_then(|text| {
        edit("setComposingText", |bridge| {
            bridge.set_composing_text(&text, new_cursor_position)
        })
    });
    answer("setComposingText", result)
}

extern "system" fn send_key_event<'local>(
    mut env: JNIEnv<'local>,
    _view: JObject<'local>,
    event: JObject<'local>,
) -> jboolean {
    let result = key_event(&mut env, &event)
        .and_then(|event| edit("sendKeyEvent", |bridge| bridge.send_key_event(&event)));
    answer("sendKeyEvent", result)
}

extern "system" fn set_selection<'local>(
    _env: JNIEnv<'local>,
    _view: JObject<'local>,
    start: jint,
    end: jint,
) -> jboolean {
    let op = "setSelection";
    answer(op, edit(op, |bridge| bridge.set_selection(start, end)))
}
