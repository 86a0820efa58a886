//! Window inset forwarding.
//!
//! Insets are only meaningful once the window decoration is attached, so the
//! translator stays unregistered until then and drops earlier notifications.
//! Whether insets count as consumed is configuration, not computed.

use weaver_editor_core::{Insets, WindowInsets};

use crate::host::TextEditingHost;

/// Something that can report the three inset regions.
pub trait InsetSource {
    fn system_bars(&self) -> Insets;
    fn ime(&self) -> Insets;
    fn display_cutout(&self) -> Insets;

    fn window_insets(&self) -> WindowInsets {
        WindowInsets {
            system_bars: self.system_bars(),
            ime: self.ime(),
            display_cutout: self.display_cutout(),
        }
    }
}

impl InsetSource for WindowInsets {
    fn system_bars(&self) -> Insets {
        self.system_bars
    }

    fn ime(&self) -> Insets {
        self.ime
    }

    fn display_cutout(&self) -> Insets {
        self.display_cutout
    }

    fn window_insets(&self) -> WindowInsets {
        *self
    }
}

/// What happened to an inset notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsetDispatch {
    /// The decoration is not attached yet; nothing was forwarded.
    Deferred,
    /// Forwarded to the engine. `consumed` tells the platform not to pad the
    /// view itself.
    Forwarded { consumed: bool },
}

impl InsetDispatch {
    pub fn is_forwarded(&self) -> bool {
        matches!(self, Self::Forwarded { .. })
    }
}

#[derive(Debug, Clone)]
pub struct InsetTranslator {
    registered: bool,
    consume: bool,
}

impl InsetTranslator {
    /// `consume`: the engine draws behind system bars and the IME panel.
    pub fn new(consume: bool) -> Self {
        Self {
            registered: false,
            consume,
        }
    }

    /// The window decoration is attached; start forwarding.
    pub fn on_decor_attached(&mut self) {
        if !self.registered {
            tracing::debug!("decor attached, forwarding window insets");
        }
        self.registered = true;
    }

    pub fn on_decor_detached(&mut self) {
        self.registered = false;
    }

    pub fn is_registered(&self) -> bool {
        self.registered
    }

    /// Gather the three regions and forward them in one call.
    pub fn dispatch(
        &self,
        source: &dyn InsetSource,
        host: &mut dyn TextEditingHost,
    ) -> InsetDispatch {
        if !self.registered {
            tracing::trace!("window insets before decor attach, deferred");
            return InsetDispatch::Deferred;
        }

        let insets = source.window_insets();
        tracing::trace!(args = ?insets.to_args(), "apply window insets");
        host.apply_window_insets(&insets);

        InsetDispatch::Forwarded {
            consumed: self.consume,
        }
    }
}
