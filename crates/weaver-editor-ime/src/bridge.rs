//! The input bridge handed to the platform for one input session.
//!
//! Each operation forwards 1:1 to the borrowed host and returns the host's
//! answer unchanged. The bridge holds no text state and cannot outlive the
//! host it borrows.

use crate::host::{KeyEventDescriptor, TextEditingHost};

/// A per-session input connection over a borrowed engine.
pub struct InputBridge<'s> {
    host: &'s mut dyn TextEditingHost,
}

impl<'s> InputBridge<'s> {
    pub fn new(host: &'s mut dyn TextEditingHost) -> Self {
        Self { host }
    }

    pub fn text_before_cursor(&self, n: i32, flags: i32) -> String {
        tracing::trace!(n, flags, "get text before cursor");
        self.host.text_before_cursor(n, flags)
    }

    pub fn text_after_cursor(&self, n: i32, flags: i32) -> String {
        tracing::trace!(n, flags, "get text after cursor");
        self.host.text_after_cursor(n, flags)
    }

    pub fn selected_text(&self, flags: i32) -> String {
        tracing::trace!(flags, "get selected text");
        self.host.selected_text(flags)
    }

    pub fn commit_text(&mut self, text: &str, new_cursor_position: i32) -> bool {
        tracing::trace!(text, new_cursor_position, "commit text");
        self.host.commit_text(text, new_cursor_position)
    }

    pub fn delete_surrounding_text(&mut self, before: i32, after: i32) -> bool {
        tracing::trace!(before, after, "delete surrounding text");
        self.host.delete_surrounding_text(before, after)
    }

    pub fn delete_surrounding_text_in_code_points(&mut self, before: i32, after: i32) -> bool {
        tracing::trace!(before, after, "delete surrounding text in code points");
        self.host.delete_surrounding_text_in_code_points(before, after)
    }

    pub fn set_composing_text(&mut self, text: &str, new_cursor_position: i32) -> bool {
        tracing::trace!(text, new_cursor_position, "set composing text");
        self.host.set_composing_text(text, new_cursor_position)
    }

    pub fn send_key_event(&mut self, event: &KeyEventDescriptor) -> bool {
        tracing::trace!(
            key_code = event.key_code,
            action = ?event.action,
            meta_state = event.meta_state,
            "send key event"
        );
        self.host.send_key_event(event)
    }

    pub fn set_selection(&mut self, start: i32, end: i32) -> bool {
        tracing::trace!(start, end, "set selection");
        self.host.set_selection(start, end)
    }
}
