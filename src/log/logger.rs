//! Event logger writing one JSON record per line
//!
//! An `EventLogger` owns its identity (component, host) and a sink. Every
//! emission builds a `Record`, injects the identity and a fresh wall-clock
//! timestamp, and writes the encoded line to the sink in one call.

use std::fmt;
use std::io::{self, Write};

use anyhow::{Context, Result};
use chrono::Local;
use parking_lot::Mutex;

use super::record::{encode_line, MessageType, Record};
use crate::host;

/// Component name used when none is given
pub const DEFAULT_COMPONENT: &str = "root";

/// Time format specifier recorded when none is given
pub const DEFAULT_TIME_FORMAT: &str = "%c";

/// Format of the `timestamp` field: ISO-8601 local date-time with
/// microseconds, sortable as text
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// Output stream records are written to
pub type Sink = Box<dyn Write + Send>;

/// Structured JSON-lines event logger
pub struct EventLogger {
    component: String,
    host: String,
    time_format: String,
    flush: bool,
    sink: Mutex<Sink>,
}

/// Builder for [`EventLogger`]
pub struct LoggerBuilder {
    component: String,
    time_format: String,
    flush: bool,
    sink: Option<Sink>,
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self {
            component: DEFAULT_COMPONENT.to_string(),
            time_format: DEFAULT_TIME_FORMAT.to_string(),
            flush: false,
            sink: None,
        }
    }
}

impl LoggerBuilder {
    /// Set the component name stamped on every record
    #[must_use]
    pub fn component(mut self, component: impl Into<String>) -> Self {
        self.component = component.into();
        self
    }

    /// Record a time format specifier.
    ///
    /// The specifier is kept for inspection only; `timestamp` is always
    /// written as [`TIMESTAMP_FORMAT`] so records stay sortable and parseable.
    #[must_use]
    pub fn time_format(mut self, time_format: impl Into<String>) -> Self {
        self.time_format = time_format.into();
        self
    }

    /// Flush the sink after every record
    #[must_use]
    pub fn flush(mut self, flush: bool) -> Self {
        self.flush = flush;
        self
    }

    /// Write records to `sink` instead of standard error
    #[must_use]
    pub fn sink(mut self, sink: impl Write + Send + 'static) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    /// Resolve the host name and build the logger.
    ///
    /// # Errors
    /// Returns an error if the host name cannot be resolved.
    pub fn build(self) -> Result<EventLogger> {
        let host = host::hostname()?;

        Ok(EventLogger {
            component: self.component,
            host,
            time_format: self.time_format,
            flush: self.flush,
            sink: Mutex::new(self.sink.unwrap_or_else(|| Box::new(io::stderr()) as Sink)),
        })
    }
}

impl EventLogger {
    /// Start building a logger with default settings
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::default()
    }

    /// Create a logger for `component` writing to standard error
    pub fn new(component: impl Into<String>) -> Result<Self> {
        Self::builder().component(component).build()
    }

    /// Component name stamped on every record
    #[must_use]
    pub fn component(&self) -> &str {
        &self.component
    }

    /// Host name resolved at construction
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Time format specifier given at construction (not applied)
    #[must_use]
    pub fn time_format(&self) -> &str {
        &self.time_format
    }

    /// Whether the sink is flushed after every record
    #[must_use]
    pub const fn flushes(&self) -> bool {
        self.flush
    }

    /// Encode and write a single record.
    ///
    /// The line and its newline go out in one `write_all` while the sink
    /// lock is held, so records from concurrent callers never interleave.
    pub fn emit(&self, record: &Record) -> Result<()> {
        let timestamp = Local::now().format(TIMESTAMP_FORMAT).to_string();
        let mut line = encode_line(record, &self.component, &self.host, &timestamp)?;
        line.push('\n');

        let mut sink = self.sink.lock();
        sink.write_all(line.as_bytes())
            .with_context(|| format!("Failed to write {} record", record.kind()))?;
        if self.flush {
            sink.flush().context("Failed to flush log sink")?;
        }
        Ok(())
    }

    /// Flush the sink regardless of the flush policy
    pub fn flush(&self) -> Result<()> {
        self.sink.lock().flush().context("Failed to flush log sink")
    }

    /// Log a preamble record
    pub fn log_preamble(&self, data: &str) -> Result<()> {
        self.emit(&Record::preamble(data))
    }

    /// Log data read from `handle`
    pub fn log_read(&self, data: &str, handle: &str) -> Result<()> {
        self.emit(&Record::read(data, handle))
    }

    /// Log data written to `handle`
    pub fn log_write(&self, data: &str, handle: &str) -> Result<()> {
        self.emit(&Record::write(data, handle))
    }

    /// Log a generic message of type `kind`
    ///
    /// # Errors
    /// Fails for read, write and preamble, which have their own operations.
    pub fn log_msg(&self, data: &str, kind: MessageType) -> Result<()> {
        self.emit(&Record::message(kind, data)?)
    }

    /// Log a debug message
    pub fn log_debug(&self, data: &str) -> Result<()> {
        self.log_msg(data, MessageType::Debug)
    }

    /// Log an info message
    pub fn log_info(&self, data: &str) -> Result<()> {
        self.log_msg(data, MessageType::Info)
    }

    /// Log a warning
    pub fn log_warning(&self, data: &str) -> Result<()> {
        self.log_msg(data, MessageType::Warning)
    }

    /// Log an error
    pub fn log_error(&self, data: &str) -> Result<()> {
        self.log_msg(data, MessageType::Error)
    }

    /// Log a summary
    pub fn log_summary(&self, data: &str) -> Result<()> {
        self.log_msg(data, MessageType::Summary)
    }
}

impl fmt::Debug for EventLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventLogger")
            .field("component", &self.component)
            .field("host", &self.host)
            .field("time_format", &self.time_format)
            .field("flush", &self.flush)
            .finish_non_exhaustive()
    }
}
