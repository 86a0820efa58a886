//! Surface configuration: the input mode declared to the input method and
//! how the surface treats window insets.

use serde::{Deserialize, Serialize};

/// Broad input class. Chooses the keyboard layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputClass {
    #[default]
    Text,
    Number,
    Phone,
    Datetime,
}

impl InputClass {
    pub fn to_raw(self) -> i32 {
        match self {
            Self::Text => 0x1,
            Self::Number => 0x2,
            Self::Phone => 0x3,
            Self::Datetime => 0x4,
        }
    }
}

/// Variation of the text class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextVariation {
    #[default]
    Normal,
    Uri,
    EmailAddress,
    Password,
    VisiblePassword,
}

impl TextVariation {
    pub fn to_raw(self) -> i32 {
        match self {
            Self::Normal => 0x0,
            Self::Uri => 0x10,
            Self::EmailAddress => 0x20,
            Self::Password => 0x80,
            Self::VisiblePassword => 0x90,
        }
    }
}

/// The input type declared when a session starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InputType {
    pub class: InputClass,
    /// Only meaningful for the text class.
    pub variation: TextVariation,
    pub cap_sentences: bool,
    pub auto_correct: bool,
    pub multi_line: bool,
    pub no_suggestions: bool,
}

impl InputType {
    const FLAG_CAP_SENTENCES: i32 = 0x4000;
    const FLAG_AUTO_CORRECT: i32 = 0x8000;
    const FLAG_MULTI_LINE: i32 = 0x20000;
    const FLAG_NO_SUGGESTIONS: i32 = 0x80000;

    /// Plain text with no flags.
    pub fn text() -> Self {
        Self::default()
    }

    pub fn with_class(class: InputClass) -> Self {
        Self {
            class,
            ..Self::default()
        }
    }

    pub fn variation(mut self, variation: TextVariation) -> Self {
        self.variation = variation;
        self
    }

    pub fn multi_line(mut self, multi_line: bool) -> Self {
        self.multi_line = multi_line;
        self
    }

    /// The platform's packed input type.
    pub fn to_raw(self) -> i32 {
        let mut raw = self.class.to_raw();
        if self.class != InputClass::Text {
            return raw;
        }

        raw |= self.variation.to_raw();
        for (set, flag) in [
            (self.cap_sentences, Self::FLAG_CAP_SENTENCES),
            (self.auto_correct, Self::FLAG_AUTO_CORRECT),
            (self.multi_line, Self::FLAG_MULTI_LINE),
            (self.no_suggestions, Self::FLAG_NO_SUGGESTIONS),
        ] {
            if set {
                raw |= flag;
            }
        }
        raw
    }
}

/// The editor action shown on the keyboard's enter key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImeAction {
    #[default]
    Unspecified,
    None,
    Go,
    Search,
    Send,
    Next,
    Done,
    Previous,
}

impl ImeAction {
    pub fn to_raw(self) -> i32 {
        match self {
            Self::Unspecified => 0,
            Self::None => 1,
            Self::Go => 2,
            Self::Search => 3,
            Self::Send => 4,
            Self::Next => 5,
            Self::Done => 6,
            Self::Previous => 7,
        }
    }
}

/// Input surface configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceConfig {
    pub input_type: InputType,
    pub ime_action: ImeAction,
    /// Keep the keyboard from taking over the screen in landscape.
    pub no_fullscreen: bool,
    /// The engine draws under system bars and the IME panel, so inset
    /// handling is taken over from the platform.
    pub draws_behind_system_bars: bool,
    /// Show the soft keyboard when a session starts.
    pub show_soft_input_on_focus: bool,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            input_type: InputType::text(),
            ime_action: ImeAction::Unspecified,
            no_fullscreen: false,
            draws_behind_system_bars: true,
            show_soft_input_on_focus: true,
        }
    }
}

impl SurfaceConfig {
    const IME_FLAG_NO_FULLSCREEN: i32 = 0x2000000;

    pub fn with_input_type(mut self, input_type: InputType) -> Self {
        self.input_type = input_type;
        self
    }

    pub fn with_ime_action(mut self, ime_action: ImeAction) -> Self {
        self.ime_action = ime_action;
        self
    }

    pub fn with_no_fullscreen(mut self, no_fullscreen: bool) -> Self {
        self.no_fullscreen = no_fullscreen;
        self
    }

    pub fn with_draws_behind_system_bars(mut self, draws_behind: bool) -> Self {
        self.draws_behind_system_bars = draws_behind;
        self
    }

    pub fn with_show_soft_input_on_focus(mut self, show: bool) -> Self {
        self.show_soft_input_on_focus = show;
        self
    }

    /// Packed IME options: action plus flags.
    pub fn ime_options(&self) -> i32 {
        let mut options = self.ime_action.to_raw();
        if self.no_fullscreen {
            options |= Self::IME_FLAG_NO_FULLSCREEN;
        }
        options
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_plain_text() {
        let config = SurfaceConfig::default();
        assert_eq!(config.input_type.to_raw(), 0x1);
        assert_eq!(config.ime_options(), 0);
    }

    #[test]
    fn test_text_flags_pack() {
        let input_type = InputType::text()
            .variation(TextVariation::EmailAddress)
            .multi_line(true);
        assert_eq!(input_type.to_raw(), 0x1 | 0x20 | 0x20000);
    }

    #[test]
    fn test_non_text_class_ignores_text_flags() {
        let input_type = InputType::with_class(InputClass::Number).multi_line(true);
        assert_eq!(input_type.to_raw(), 0x2);
    }

    #[test]
    fn test_ime_options() {
        let config = SurfaceConfig::default()
            .with_ime_action(ImeAction::Done)
            .with_no_fullscreen(true);
        assert_eq!(config.ime_options(), 6 | 0x2000000);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: SurfaceConfig = serde_json::from_str(
            r#"{ "ime_action": "send", "input_type": { "multi_line": true } }"#,
        )
        .unwrap();
        assert_eq!(config.ime_action, ImeAction::Send);
        assert_eq!(config.input_type.to_raw(), 0x1 | 0x20000);
        assert!(config.draws_behind_system_bars);
        assert!(config.show_soft_input_on_focus);
    }
}
