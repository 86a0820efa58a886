//! `tracing` output routed to logcat.

use std::ffi::CString;
use std::io;

use tracing::{Level, Metadata};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::{self, MakeWriter};
use tracing_subscriber::layer::SubscriberExt;

const TAG: &std::ffi::CStr = c"weaver";

/// A `MakeWriter` whose writers log each formatted event at the event's
/// level.
pub struct MakeAndroidWriter;

impl MakeWriter<'_> for MakeAndroidWriter {
    type Writer = AndroidWriter;

    fn make_writer(&self) -> Self::Writer {
        AndroidWriter {
            priority: ndk_sys::android_LogPriority::ANDROID_LOG_UNKNOWN,
        }
    }

    fn make_writer_for(&self, meta: &Metadata<'_>) -> Self::Writer {
        let priority = match *meta.level() {
            Level::TRACE => ndk_sys::android_LogPriority::ANDROID_LOG_VERBOSE,
            Level::DEBUG => ndk_sys::android_LogPriority::ANDROID_LOG_DEBUG,
            Level::INFO => ndk_sys::android_LogPriority::ANDROID_LOG_INFO,
            Level::WARN => ndk_sys::android_LogPriority::ANDROID_LOG_WARN,
            Level::ERROR => ndk_sys::android_LogPriority::ANDROID_LOG_ERROR,
        };
        AndroidWriter { priority }
    }
}

pub struct AndroidWriter {
    priority: ndk_sys::android_LogPriority,
}

impl io::Write for AndroidWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        // Interior NULs would truncate the message; logcat gets the rest.
        let text: Vec<u8> = buf.iter().copied().filter(|b| *b != 0).collect();
        let message = CString::new(text)?;

        unsafe {
            ndk_sys::__android_log_write(self.priority.0 as i32, TAG.as_ptr(), message.as_ptr());
        }

        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Install the global subscriber. `RUST_LOG` overrides the default filter;
/// debug builds log the bridge crates at `debug`.
pub fn install_log() {
    let mut filter = EnvFilter::builder()
        .with_default_directive(tracing::level_filters::LevelFilter::INFO.into())
        .from_env_lossy();

    if cfg!(debug_assertions) {
        for directive in ["weaver_editor_ime=debug", "weaver_editor_android=debug"] {
            if let Ok(directive) = directive.parse() {
                filter = filter.add_directive(directive);
            }
        }
    }

    let subscriber = tracing_subscriber::registry().with(filter).with(
        fmt::layer()
            .with_ansi(false)
            .without_time()
            .with_writer(MakeAndroidWriter),
    );

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        tracing::debug!("global subscriber already installed");
    }
}
