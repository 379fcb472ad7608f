//! Process-wide default logger
//!
//! The free functions here delegate to whichever `EventLogger` is the
//! current default at call time. The default is created on first use and
//! lives behind an `RwLock`, so replacing it is safe from any thread.
//! Callers that hold an `Arc<EventLogger>` from [`default_logger`] keep
//! logging under that logger's identity after a replacement.
//!
//! Prefer passing an `EventLogger` explicitly; these functions exist for
//! tools that want a single shared logger without threading it through.

use std::sync::Arc;

use anyhow::Result;
use once_cell::sync::OnceCell;
use parking_lot::RwLock;

use super::logger::EventLogger;
use super::record::MessageType;

static DEFAULT: OnceCell<RwLock<Arc<EventLogger>>> = OnceCell::new();

fn slot() -> Result<&'static RwLock<Arc<EventLogger>>> {
    DEFAULT.get_or_try_init(|| Ok(RwLock::new(Arc::new(EventLogger::builder().build()?))))
}

/// The current process-wide logger, creating it with defaults on first use.
pub fn default_logger() -> Result<Arc<EventLogger>> {
    Ok(slot()?.read().clone())
}

/// Replace the default with a logger for `component`.
///
/// `time_format` is recorded on the new logger but timestamps keep the
/// fixed ISO-8601 form.
/// Flush policy and sink are left at their defaults; use [`set_default`]
/// to control them.
pub fn set_options(component: &str, time_format: &str) -> Result<()> {
    let logger = EventLogger::builder()
        .component(component)
        .time_format(time_format)
        .build()?;
    set_default(logger);
    Ok(())
}

/// Install `logger` as the process-wide default.
pub fn set_default(logger: EventLogger) {
    let logger = Arc::new(logger);
    let slot = DEFAULT.get_or_init(|| RwLock::new(Arc::clone(&logger)));
    *slot.write() = logger;
}

/// Log a preamble through the default logger
pub fn log_preamble(data: &str) -> Result<()> {
    default_logger()?.log_preamble(data)
}

/// Log a read through the default logger
pub fn log_read(data: &str, handle: &str) -> Result<()> {
    default_logger()?.log_read(data, handle)
}

/// Log a write through the default logger
pub fn log_write(data: &str, handle: &str) -> Result<()> {
    default_logger()?.log_write(data, handle)
}

/// Log a generic message through the default logger
pub fn log_msg(data: &str, kind: MessageType) -> Result<()> {
    default_logger()?.log_msg(data, kind)
}

/// Log a debug message through the default logger
pub fn log_debug(data: &str) -> Result<()> {
    log_msg(data, MessageType::Debug)
}

/// Log an info message through the default logger
pub fn log_info(data: &str) -> Result<()> {
    log_msg(data, MessageType::Info)
}

/// Log a warning through the default logger
pub fn log_warning(data: &str) -> Result<()> {
    log_msg(data, MessageType::Warning)
}

/// Log an error through the default logger
pub fn log_error(data: &str) -> Result<()> {
    log_msg(data, MessageType::Error)
}

/// Log a summary through the default logger
pub fn log_summary(data: &str) -> Result<()> {
    log_msg(data, MessageType::Summary)
}
