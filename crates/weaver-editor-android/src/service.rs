//! The platform `InputMethodManager`, driven over JNI.

use std::sync::Arc;

use jni::objects::{GlobalRef, JObject};
use jni::{JNIEnv, JavaVM};
use weaver_editor_ime::{InputMethodService, ServiceError};

use crate::error::AndroidError;

const IMM_FIELD: &str = "inputMethodManager";
const IMM_TYPE: &str = "Landroid/view/inputmethod/InputMethodManager;";

/// Local frame capacity for one service call.
const FRAME_CAPACITY: i32 = 8;

/// `InputMethodService` backed by the view's `InputMethodManager` field.
/// Clones are handles to the same view.
#[derive(Clone)]
pub struct JniInputMethodService {
    vm: Arc<JavaVM>,
    view: GlobalRef,
}

impl JniInputMethodService {
    pub fn new(env: &mut JNIEnv<'_>, view: &JObject<'_>) -> Result<Self, AndroidError> {
        if view.is_null() {
            return Err(AndroidError::Null("view"));
        }
        Ok(Self {
            vm: Arc::new(env.get_java_vm()?),
            view: env.new_global_ref(view)?,
        })
    }

    pub fn view(&self) -> &GlobalRef {
        &self.view
    }

    /// Run `f` with the view and its input method manager inside a local
    /// frame, so local references die with the call.
    fn with_manager<T>(
        &self,
        call: &'static str,
        f: impl FnOnce(&mut JNIEnv<'_>, &JObject<'_>, &JObject<'_>) -> Result<T, AndroidError>,
    ) -> Result<T, ServiceError> {
        let mut env = self
            .vm
            .attach_current_thread()
            .map_err(|err| AndroidError::from(err).into_service(call))?;

        let view = self.view.as_obj();
        env.with_local_frame(FRAME_CAPACITY, |env| {
            let imm = env.get_field(view, IMM_FIELD, IMM_TYPE)?.l()?;
            if imm.is_null() {
                return Err(AndroidError::Null(IMM_FIELD));
            }
            f(env, view, &imm)
        })
        .map_err(|err| {
            tracing::error!(call, %err, "input method manager call failed");
            err.into_service(call)
        })
    }
}

impl InputMethodService for JniInputMethodService {
    fn is_active(&mut self) -> Result<bool, ServiceError> {
        self.with_manager("isActive", |env, view, imm| {
            Ok(env
                .call_method(imm, "isActive", "(Landroid/view/View;)Z", &[view.into()])?
                .z()?)
        })
    }

    fn show_soft_input(&mut self, flags: i32) -> Result<bool, ServiceError> {
        self.with_manager("showSoftInput", |env, view, imm| {
            Ok(env
                .call_method(
                    imm,
                    "showSoftInput",
                    "(Landroid/view/View;I)Z",
                    &[view.into(), flags.into()],
                )?
                .z()?)
        })
    }

    fn hide_soft_input(&mut self, flags: i32) -> Result<bool, ServiceError> {
        self.with_manager("hideSoftInputFromWindow", |env, view, imm| {
            let token = env
                .call_method(view, "getWindowToken", "()Landroid/os/IBinder;", &[])?
                .l()?;
            if token.is_null() {
                return Err(AndroidError::Null("window token"));
            }

            Ok(env
                .call_method(
                    imm,
                    "hideSoftInputFromWindow",
                    "(Landroid/os/IBinder;I)Z",
                    &[(&token).into(), flags.into()],
                )?
                .z()?)
        })
    }

    fn restart_input(&mut self) -> Result<(), ServiceError> {
        self.with_manager("restartInput", |env, view, imm| {
            Ok(env
                .call_method(imm, "restartInput", "(Landroid/view/View;)V", &[view.into()])?
                .v()?)
        })
    }

    fn update_selection(
        &mut self,
        sel_start: i32,
        sel_end: i32,
        composing_start: i32,
        composing_end: i32,
    ) -> Result<(), ServiceError> {
        self.with_manager("updateSelection", |env, view, imm| {
            Ok(env
                .call_method(
                    imm,
                    "updateSelection",
                    "(Landroid/view/View;IIII)V",
                    &[
                        view.into(),
                        sel_start.into(),
                        sel_end.into(),
                        composing_start.into(),
                        composing_end.into(),
                    ],
                )?
                .v()?)
        })
    }
}
