//! A shared home for one input surface.
//!
//! Platform callbacks reach the surface through a `SurfaceSlot` rather than
//! a `&mut`. A callback that arrives while the slot is borrowed further up
//! the stack gets `SurfaceError::Busy`, never a panic.
//!
//! Restarting input makes the platform ask for a new input connection
//! before `restart_input` returns, so the slot never holds its borrow across
//! a call that starts or ends text input.
//!
//! The slot also remembers whether the window decoration is attached. That
//! outlives any one surface: an engine swapped in after the decoration
//! attached forwards insets straight away.

use std::cell::{Cell, RefCell};

use crate::error::SurfaceError;
use crate::host::{SelectionSource, TextEditingHost};
use crate::surface::{
    EditorInfo, InputMethodService, InputSurface, dismiss_text_input, request_text_input,
};

pub struct SurfaceSlot<H, S> {
    surface: RefCell<Option<InputSurface<H, S>>>,
    decor_attached: Cell<bool>,
}

impl<H, S> Default for SurfaceSlot<H, S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H, S> SurfaceSlot<H, S> {
    pub const fn new() -> Self {
        Self {
            surface: RefCell::new(None),
            decor_attached: Cell::new(false),
        }
    }

    pub fn is_decor_attached(&self) -> bool {
        self.decor_attached.get()
    }
}

impl<H, S> SurfaceSlot<H, S>
where
    H: TextEditingHost + SelectionSource,
    S: InputMethodService,
{
    /// Put `surface` in the slot, returning whatever was there.
    pub fn install(
        &self,
        mut surface: InputSurface<H, S>,
    ) -> Result<Option<InputSurface<H, S>>, SurfaceError> {
        let mut slot = self.surface.try_borrow_mut().map_err(|_| SurfaceError::Busy)?;
        surface.set_decor_attached(self.decor_attached.get());
        Ok(slot.replace(surface))
    }

    pub fn take(&self) -> Result<Option<InputSurface<H, S>>, SurfaceError> {
        let mut slot = self.surface.try_borrow_mut().map_err(|_| SurfaceError::Busy)?;
        Ok(slot.take())
    }

    /// Borrow the installed surface for the length of `f`.
    pub fn with_surface<R, E>(
        &self,
        f: impl FnOnce(&mut InputSurface<H, S>) -> Result<R, E>,
    ) -> Result<R, E>
    where
        E: From<SurfaceError>,
    {
        let mut slot = self.surface.try_borrow_mut().map_err(|_| SurfaceError::Busy)?;
        let surface = slot.as_mut().ok_or(SurfaceError::NoSurface)?;
        surface.set_decor_attached(self.decor_attached.get());
        f(surface)
    }

    /// Record the decoration state. It reaches the installed surface, or
    /// the next one, on its next use.
    pub fn set_decor_attached(&self, attached: bool) {
        self.decor_attached.set(attached);
    }

    /// Fill `info` for a new input connection.
    pub fn create_input_connection(&self, info: &mut EditorInfo) -> Result<(), SurfaceError> {
        self.with_surface(|surface| surface.create_input_connection(info).map(drop))
    }

    pub fn notify_selection_changed(&self) -> Result<bool, SurfaceError> {
        self.with_surface(|surface| surface.notify_selection_changed())
    }
}

impl<H, S> SurfaceSlot<H, S>
where
    H: TextEditingHost + SelectionSource,
    S: InputMethodService + Clone,
{
    /// Like `InputSurface::start_text_input`, but the service is called
    /// through a clone of its handle with the slot released.
    pub fn start_text_input(&self) -> Result<(), SurfaceError> {
        let (mut service, show_on_focus) = self.with_surface(|surface| {
            let show_on_focus = surface.config().show_soft_input_on_focus;
            Ok::<_, SurfaceError>((surface.service().clone(), show_on_focus))
        })?;
        request_text_input(&mut service, show_on_focus)
    }

    pub fn end_text_input(&self) -> Result<(), SurfaceError> {
        let mut service =
            self.with_surface(|surface| Ok::<_, SurfaceError>(surface.service().clone()))?;
        dismiss_text_input(&mut service)
    }
}
