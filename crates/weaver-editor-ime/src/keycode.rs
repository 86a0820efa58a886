//! Android key codes and meta state to engine key combinations.

use weaver_editor_core::{Key, KeyCombo, Modifiers};

use crate::host::KeyEventDescriptor;

pub const KEYCODE_UNKNOWN: i32 = 0;
pub const KEYCODE_0: i32 = 7;
pub const KEYCODE_9: i32 = 16;
pub const KEYCODE_DPAD_UP: i32 = 19;
pub const KEYCODE_DPAD_DOWN: i32 = 20;
pub const KEYCODE_DPAD_LEFT: i32 = 21;
pub const KEYCODE_DPAD_RIGHT: i32 = 22;
pub const KEYCODE_A: i32 = 29;
pub const KEYCODE_C: i32 = 31;
pub const KEYCODE_Z: i32 = 54;
pub const KEYCODE_ALT_LEFT: i32 = 57;
pub const KEYCODE_ALT_RIGHT: i32 = 58;
pub const KEYCODE_SHIFT_LEFT: i32 = 59;
pub const KEYCODE_SHIFT_RIGHT: i32 = 60;
pub const KEYCODE_TAB: i32 = 61;
pub const KEYCODE_SPACE: i32 = 62;
pub const KEYCODE_SYM: i32 = 63;
pub const KEYCODE_ENTER: i32 = 66;
pub const KEYCODE_DEL: i32 = 67;
pub const KEYCODE_PAGE_UP: i32 = 92;
pub const KEYCODE_PAGE_DOWN: i32 = 93;
pub const KEYCODE_ESCAPE: i32 = 111;
pub const KEYCODE_FORWARD_DEL: i32 = 112;
pub const KEYCODE_CTRL_LEFT: i32 = 113;
pub const KEYCODE_CTRL_RIGHT: i32 = 114;
pub const KEYCODE_CAPS_LOCK: i32 = 115;
pub const KEYCODE_SCROLL_LOCK: i32 = 116;
pub const KEYCODE_META_LEFT: i32 = 117;
pub const KEYCODE_META_RIGHT: i32 = 118;
pub const KEYCODE_FUNCTION: i32 = 119;
pub const KEYCODE_MOVE_HOME: i32 = 122;
pub const KEYCODE_MOVE_END: i32 = 123;
pub const KEYCODE_NUM_LOCK: i32 = 143;
pub const KEYCODE_NUMPAD_ENTER: i32 = 160;

pub const META_SHIFT_ON: i32 = 0x1;
pub const META_ALT_ON: i32 = 0x2;
pub const META_CTRL_ON: i32 = 0x1000;
pub const META_META_ON: i32 = 0x10000;

/// Modifier state from Android meta bits.
pub fn modifiers(meta_state: i32) -> Modifiers {
    Modifiers {
        ctrl: meta_state & META_CTRL_ON != 0,
        alt: meta_state & META_ALT_ON != 0,
        shift: meta_state & META_SHIFT_ON != 0,
        meta: meta_state & META_META_ON != 0,
    }
}

fn named_key(key_code: i32) -> Option<Key> {
    let key = match key_code {
        KEYCODE_DEL => Key::Backspace,
        KEYCODE_FORWARD_DEL => Key::Delete,
        KEYCODE_ENTER | KEYCODE_NUMPAD_ENTER => Key::Enter,
        KEYCODE_TAB => Key::Tab,
        KEYCODE_SPACE => Key::Space,
        KEYCODE_ESCAPE => Key::Escape,
        KEYCODE_DPAD_LEFT => Key::ArrowLeft,
        KEYCODE_DPAD_RIGHT => Key::ArrowRight,
        KEYCODE_DPAD_UP => Key::ArrowUp,
        KEYCODE_DPAD_DOWN => Key::ArrowDown,
        KEYCODE_MOVE_HOME => Key::Home,
        KEYCODE_MOVE_END => Key::End,
        KEYCODE_PAGE_UP => Key::PageUp,
        KEYCODE_PAGE_DOWN => Key::PageDown,
        KEYCODE_ALT_LEFT | KEYCODE_ALT_RIGHT => Key::Alt,
        KEYCODE_SHIFT_LEFT | KEYCODE_SHIFT_RIGHT => Key::Shift,
        KEYCODE_CTRL_LEFT | KEYCODE_CTRL_RIGHT => Key::Control,
        KEYCODE_META_LEFT | KEYCODE_META_RIGHT => Key::Meta,
        KEYCODE_CAPS_LOCK => Key::CapsLock,
        KEYCODE_NUM_LOCK => Key::NumLock,
        KEYCODE_SCROLL_LOCK => Key::ScrollLock,
        KEYCODE_FUNCTION => Key::Fn,
        KEYCODE_SYM => Key::Symbol,
        _ => return None,
    };
    Some(key)
}

/// The unmodified character printed on letter and digit keys.
fn base_char(key_code: i32) -> Option<char> {
    match key_code {
        KEYCODE_A..=KEYCODE_Z => char::from_u32((b'a' as i32 + key_code - KEYCODE_A) as u32),
        KEYCODE_0..=KEYCODE_9 => char::from_u32((b'0' as i32 + key_code - KEYCODE_0) as u32),
        _ => None,
    }
}

/// Decode a key event into a key combination.
///
/// Shortcuts (a command modifier held) use the key's base character so
/// bindings are layout independent. Otherwise the event's own character wins,
/// falling back to the base character with shift applied.
pub fn key_combo(event: &KeyEventDescriptor) -> KeyCombo {
    let modifiers = modifiers(event.meta_state);

    if let Some(key) = named_key(event.key_code) {
        return KeyCombo::with_modifiers(key, modifiers);
    }

    let base = base_char(event.key_code);
    let printable = event.unicode_char.filter(|c| !c.is_control());

    let c = if modifiers.has_command() {
        base.or(printable)
    } else {
        printable.or_else(|| {
            base.map(|c| {
                if modifiers.shift {
                    c.to_ascii_uppercase()
                } else {
                    c
                }
            })
        })
    };

    let key = match c {
        Some(c) => Key::character(c.to_string()),
        None => Key::Unidentified,
    };
    KeyCombo::with_modifiers(key, modifiers)
}
