//! Test doubles shared by the integration tests.

#![allow(dead_code)]

use std::cell::RefCell;
use std::ops::Range;
use std::rc::{Rc, Weak};

use weaver_editor_core::{EditorDocument, EditorEngine, EditorRope, WindowInsets};
use weaver_editor_ime::{
    EditorInfo, ImeSelection, InputMethodService, KeyEventDescriptor, SelectionSource,
    ServiceError, SurfaceError, SurfaceSlot, TextEditingHost,
};

pub fn engine(content: &str) -> EditorEngine {
    EditorEngine::new(EditorRope::from_str(content))
}

/// Buffer contents with `|` at the cursor, or `[` `]` around a selection.
pub fn render(engine: &EditorEngine) -> String {
    let doc = engine.document();
    let text = doc.content_string();
    let sel = doc.selection_range();
    let mut out = String::new();
    for (i, c) in text.chars().enumerate() {
        if sel.is_empty() && i == sel.start {
            out.push('|');
        } else if !sel.is_empty() && i == sel.start {
            out.push('[');
        } else if !sel.is_empty() && i == sel.end {
            out.push(']');
        }
        out.push(c);
    }
    let len = doc.len_chars();
    if sel.is_empty() && sel.start == len {
        out.push('|');
    } else if !sel.is_empty() && sel.end == len {
        out.push(']');
    }
    out
}

/// A host that records every call and answers with canned values.
#[derive(Debug, Default)]
pub struct RecordingHost {
    pub calls: Vec<String>,
    pub answer: bool,
    pub text: String,
    pub selection: Range<usize>,
    pub composing: Option<Range<usize>>,
}

impl RecordingHost {
    pub fn answering(answer: bool) -> Self {
        Self {
            answer,
            ..Self::default()
        }
    }
}

impl TextEditingHost for RecordingHost {
    fn apply_window_insets(&mut self, insets: &WindowInsets) {
        self.calls
            .push(format!("apply_window_insets {:?}", insets.to_args()));
    }

    fn text_before_cursor(&self, _n: i32, _flags: i32) -> String {
        self.text.clone()
    }

    fn text_after_cursor(&self, _n: i32, _flags: i32) -> String {
        self.text.clone()
    }

    fn selected_text(&self, _flags: i32) -> String {
        self.text.clone()
    }

    fn commit_text(&mut self, text: &str, new_cursor_position: i32) -> bool {
        self.calls
            .push(format!("commit_text {text:?} {new_cursor_position}"));
        self.answer
    }

    fn delete_surrounding_text(&mut self, before: i32, after: i32) -> bool {
        self.calls
            .push(format!("delete_surrounding_text {before} {after}"));
        self.answer
    }

    fn delete_surrounding_text_in_code_points(&mut self, before: i32, after: i32) -> bool {
        self.calls
            .push(format!("delete_surrounding_text_in_code_points {before} {after}"));
        self.answer
    }

    fn set_composing_text(&mut self, text: &str, new_cursor_position: i32) -> bool {
        self.calls
            .push(format!("set_composing_text {text:?} {new_cursor_position}"));
        self.answer
    }

    fn send_key_event(&mut self, event: &KeyEventDescriptor) -> bool {
        self.calls.push(format!(
            "send_key_event {} {:?} {}",
            event.key_code, event.action, event.meta_state
        ));
        self.answer
    }

    fn set_selection(&mut self, start: i32, end: i32) -> bool {
        self.calls.push(format!("set_selection {start} {end}"));
        self.answer
    }
}

impl SelectionSource for RecordingHost {
    fn ime_selection(&self) -> ImeSelection {
        ImeSelection {
            selection: self.selection.clone(),
            composing: self.composing.clone(),
        }
    }
}

/// An input-method service that records calls.
#[derive(Debug, Default)]
pub struct RecordingService {
    pub calls: Vec<String>,
    pub active: bool,
    pub fail: bool,
}

impl RecordingService {
    fn result<T>(&mut self, call: &'static str, value: T) -> Result<T, ServiceError> {
        self.calls.push(call.to_string());
        if self.fail {
            Err(ServiceError::call(call, "test failure"))
        } else {
            Ok(value)
        }
    }
}

impl InputMethodService for RecordingService {
    fn is_active(&mut self) -> Result<bool, ServiceError> {
        let active = self.active;
        self.result("is_active", active)
    }

    fn show_soft_input(&mut self, flags: i32) -> Result<bool, ServiceError> {
        self.calls.push(format!("show_soft_input {flags}"));
        if self.fail {
            return Err(ServiceError::call("show_soft_input", "test failure"));
        }
        Ok(true)
    }

    fn hide_soft_input(&mut self, flags: i32) -> Result<bool, ServiceError> {
        self.calls.push(format!("hide_soft_input {flags}"));
        if self.fail {
            return Err(ServiceError::call("hide_soft_input", "test failure"));
        }
        Ok(true)
    }

    fn restart_input(&mut self) -> Result<(), ServiceError> {
        self.result("restart_input", ())
    }

    fn update_selection(
        &mut self,
        sel_start: i32,
        sel_end: i32,
        composing_start: i32,
        composing_end: i32,
    ) -> Result<(), ServiceError> {
        self.calls.push(format!(
            "update_selection {sel_start} {sel_end} {composing_start} {composing_end}"
        ));
        if self.fail {
            return Err(ServiceError::call("update_selection", "test failure"));
        }
        Ok(())
    }
}

/// A service that behaves like the platform on restart: it opens the new
/// input connection through the slot before `restart_input` returns.
#[derive(Clone)]
pub struct ReconnectingService {
    pub slot: Weak<SurfaceSlot<RecordingHost, ReconnectingService>>,
    pub sessions: Rc<RefCell<Vec<Result<EditorInfo, SurfaceError>>>>,
}

impl ReconnectingService {
    pub fn new(slot: &Rc<SurfaceSlot<RecordingHost, ReconnectingService>>) -> Self {
        Self {
            slot: Rc::downgrade(slot),
            sessions: Rc::default(),
        }
    }
}

impl InputMethodService for ReconnectingService {
    fn is_active(&mut self) -> Result<bool, ServiceError> {
        Ok(true)
    }

    fn show_soft_input(&mut self, _flags: i32) -> Result<bool, ServiceError> {
        Ok(true)
    }

    fn hide_soft_input(&mut self, _flags: i32) -> Result<bool, ServiceError> {
        Ok(true)
    }

    fn restart_input(&mut self) -> Result<(), ServiceError> {
        let slot = self.slot.upgrade().ok_or(ServiceError::Unavailable("slot"))?;
        let mut info = EditorInfo::default();
        let session = slot.create_input_connection(&mut info).map(|()| info);
        self.sessions.borrow_mut().push(session);
        Ok(())
    }

    fn update_selection(
        &mut self,
        _sel_start: i32,
        _sel_end: i32,
        _composing_start: i32,
        _composing_end: i32,
    ) -> Result<(), ServiceError> {
        Ok(())
    }
}
