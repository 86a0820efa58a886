use thiserror::Error;
use weaver_editor_ime::{ServiceError, SurfaceError};

/// Errors raised by the JNI glue.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum AndroidError {
    #[error(transparent)]
    Jni(#[from] jni::errors::Error),

    #[error(transparent)]
    Surface(#[from] SurfaceError),

    /// A Java reference the glue depends on was null.
    #[error("`{0}` is null")]
    Null(&'static str),
}

impl AndroidError {
    /// Report the error as a failed input-method service call. A null
    /// reference keeps its name.
    pub fn into_service(self, call: &'static str) -> ServiceError {
        match self {
            Self::Null(what) => ServiceError::Unavailable(what),
            other => ServiceError::call(call, other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_reference_is_named() {
        assert_eq!(
            AndroidError::Null("window token").into_service("hideSoftInputFromWindow"),
            ServiceError::Unavailable("window token")
        );
        assert_eq!(
            AndroidError::from(SurfaceError::Busy).into_service("restartInput"),
            ServiceError::call("restartInput", "input surface already in use")
        );
    }
}
