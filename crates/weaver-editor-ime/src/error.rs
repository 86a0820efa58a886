//! Error types for the input surface.

use thiserror::Error;

/// Errors raised by the platform's input-method service.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ServiceError {
    /// The service rejected or failed the call.
    #[error("input method service call `{call}` failed: {reason}")]
    Call { call: &'static str, reason: String },

    /// The service is not reachable; names the missing platform object
    /// (no window token, no manager).
    #[error("input method service unavailable: `{0}` is missing")]
    Unavailable(&'static str),
}

impl ServiceError {
    pub fn call(call: &'static str, reason: impl Into<String>) -> Self {
        Self::Call {
            call,
            reason: reason.into(),
        }
    }
}

/// Errors from out-of-sequence surface lifecycle calls.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SurfaceError {
    /// No engine is attached.
    #[error("no engine attached to the input surface")]
    NotAttached,

    /// An engine is already attached.
    #[error("an engine is already attached to the input surface")]
    AlreadyAttached,

    /// No surface is installed in the slot.
    #[error("no input surface installed")]
    NoSurface,

    /// The slot was reached again while already borrowed further up the
    /// stack.
    #[error("input surface already in use")]
    Busy,

    /// The input-method service failed.
    #[error(transparent)]
    Service(#[from] ServiceError),
}
