//! The input surface: owner of the engine handle for one platform view.
//!
//! The surface holds the engine between `attach` and `detach`, hands out
//! bridges that borrow it, forwards insets through its translator and tells
//! the platform's input-method service about selection changes. It keeps no
//! text of its own.

use crate::bridge::InputBridge;
use crate::config::SurfaceConfig;
use crate::error::{ServiceError, SurfaceError};
use crate::host::{ImeSelection, SelectionSource, TextEditingHost};
use crate::insets::{InsetDispatch, InsetSource, InsetTranslator};

/// The platform's input-method service, as the surface drives it.
pub trait InputMethodService {
    /// Whether the input method is active for this surface's view.
    fn is_active(&mut self) -> Result<bool, ServiceError>;

    fn show_soft_input(&mut self, flags: i32) -> Result<bool, ServiceError>;

    fn hide_soft_input(&mut self, flags: i32) -> Result<bool, ServiceError>;

    /// Discard the input method's view of the text and start over. The
    /// platform may open the new input connection before this returns.
    fn restart_input(&mut self) -> Result<(), ServiceError>;

    /// Report selection and composing region. `-1` marks no composing region.
    fn update_selection(
        &mut self,
        sel_start: i32,
        sel_end: i32,
        composing_start: i32,
        composing_end: i32,
    ) -> Result<(), ServiceError>;
}

/// Session attributes filled in for the platform when a session starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditorInfo {
    pub input_type: i32,
    pub ime_options: i32,
    pub initial_sel_start: i32,
    pub initial_sel_end: i32,
}

impl Default for EditorInfo {
    fn default() -> Self {
        Self {
            input_type: 0,
            ime_options: 0,
            initial_sel_start: -1,
            initial_sel_end: -1,
        }
    }
}

pub struct InputSurface<H, S> {
    config: SurfaceConfig,
    service: S,
    host: Option<H>,
    insets: InsetTranslator,
    last_reported: Option<ImeSelection>,
}

impl<H, S> InputSurface<H, S>
where
    H: TextEditingHost + SelectionSource,
    S: InputMethodService,
{
    pub fn new(config: SurfaceConfig, service: S) -> Self {
        let insets = InsetTranslator::new(config.draws_behind_system_bars);
        Self {
            config,
            service,
            host: None,
            insets,
            last_reported: None,
        }
    }

    pub fn config(&self) -> &SurfaceConfig {
        &self.config
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn service_mut(&mut self) -> &mut S {
        &mut self.service
    }

    /// Take ownership of the engine handle.
    pub fn attach(&mut self, host: H) -> Result<(), SurfaceError> {
        if self.host.is_some() {
            return Err(SurfaceError::AlreadyAttached);
        }
        tracing::debug!("input surface attached");
        self.host = Some(host);
        Ok(())
    }

    /// Give up the engine handle. Bridges borrowing it are already gone.
    /// The window decoration is unaffected, so a re-attached engine gets
    /// insets straight away.
    pub fn detach(&mut self) -> Result<H, SurfaceError> {
        let host = self.host.take().ok_or(SurfaceError::NotAttached)?;
        self.last_reported = None;
        tracing::debug!("input surface detached");
        Ok(host)
    }

    pub fn is_attached(&self) -> bool {
        self.host.is_some()
    }

    pub fn host(&self) -> Option<&H> {
        self.host.as_ref()
    }

    pub fn host_mut(&mut self) -> Option<&mut H> {
        self.host.as_mut()
    }

    pub fn on_decor_attached(&mut self) {
        self.insets.on_decor_attached();
    }

    pub fn on_decor_detached(&mut self) {
        self.insets.on_decor_detached();
    }

    pub fn set_decor_attached(&mut self, attached: bool) {
        if attached {
            self.on_decor_attached();
        } else {
            self.on_decor_detached();
        }
    }

    pub fn is_decor_attached(&self) -> bool {
        self.insets.is_registered()
    }

    /// Forward a layout-affecting inset notification to the engine.
    pub fn apply_window_insets(
        &mut self,
        source: &dyn InsetSource,
    ) -> Result<InsetDispatch, SurfaceError> {
        let host = self.host.as_mut().ok_or(SurfaceError::NotAttached)?;
        Ok(self.insets.dispatch(source, host))
    }

    /// A bridge over the attached engine.
    pub fn bridge(&mut self) -> Result<InputBridge<'_>, SurfaceError> {
        let host = self.host.as_mut().ok_or(SurfaceError::NotAttached)?;
        Ok(InputBridge::new(host))
    }

    /// Start an input session: declare the input mode and current selection
    /// in `info` and return a bridge for the session.
    pub fn create_input_connection(
        &mut self,
        info: &mut EditorInfo,
    ) -> Result<InputBridge<'_>, SurfaceError> {
        let host = self.host.as_mut().ok_or(SurfaceError::NotAttached)?;
        let selection = host.ime_selection();
        let (sel_start, sel_end) = selection.selection_args();

        info.input_type = self.config.input_type.to_raw();
        info.ime_options = self.config.ime_options();
        info.initial_sel_start = sel_start;
        info.initial_sel_end = sel_end;

        tracing::debug!(
            input_type = info.input_type,
            ime_options = info.ime_options,
            sel_start,
            sel_end,
            "input session started"
        );

        // The new session starts from what we just declared.
        self.last_reported = Some(selection);
        Ok(InputBridge::new(host))
    }

    /// The engine wants text input: restart an active session or show the
    /// keyboard.
    pub fn start_text_input(&mut self) -> Result<(), SurfaceError> {
        request_text_input(&mut self.service, self.config.show_soft_input_on_focus)
    }

    /// The engine no longer wants text input: hide the keyboard.
    pub fn end_text_input(&mut self) -> Result<(), SurfaceError> {
        dismiss_text_input(&mut self.service)
    }

    /// Report the engine's selection to the input method if it changed
    /// since the last report. Returns whether a report was sent.
    pub fn notify_selection_changed(&mut self) -> Result<bool, SurfaceError> {
        let host = self.host.as_ref().ok_or(SurfaceError::NotAttached)?;
        let selection = host.ime_selection();

        if self.last_reported.as_ref() == Some(&selection) {
            return Ok(false);
        }

        let (sel_start, sel_end) = selection.selection_args();
        let (composing_start, composing_end) = selection.composing_args();
        self.service
            .update_selection(sel_start, sel_end, composing_start, composing_end)?;

        tracing::trace!(?selection, "update selection");
        self.last_reported = Some(selection);
        Ok(true)
    }
}

/// Restart the session if the input method is active for the view,
/// otherwise show the keyboard when `show_on_focus` allows it.
pub(crate) fn request_text_input<S: InputMethodService>(
    service: &mut S,
    show_on_focus: bool,
) -> Result<(), SurfaceError> {
    let result = match service.is_active() {
        Ok(true) => service.restart_input().map(|()| true),
        Ok(false) if show_on_focus => service.show_soft_input(0),
        Ok(false) => Ok(true),
        Err(err) => Err(err),
    };

    match result {
        Ok(true) => Ok(()),
        Ok(false) => {
            tracing::warn!("show soft input refused");
            Ok(())
        }
        Err(err) => {
            tracing::warn!(%err, "start text input failed");
            Err(err.into())
        }
    }
}

pub(crate) fn dismiss_text_input<S: InputMethodService>(
    service: &mut S,
) -> Result<(), SurfaceError> {
    match service.hide_soft_input(0) {
        Ok(true) => Ok(()),
        Ok(false) => {
            tracing::warn!("hide soft input refused");
            Ok(())
        }
        Err(err) => {
            tracing::warn!(%err, "end text input failed");
            Err(err.into())
        }
    }
}
