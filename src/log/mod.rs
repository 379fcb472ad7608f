//! Structured event logging
//!
//! This module provides the JSON-lines event logger, the record model it
//! writes, and the process-wide default logger behind the free functions.

pub mod global;
pub mod logger;
pub mod record;

pub use global::{
    default_logger, log_debug, log_error, log_info, log_msg, log_preamble, log_read,
    log_summary, log_warning, log_write, set_default, set_options,
};
pub use logger::{EventLogger, LoggerBuilder, Sink};
pub use record::{encode_line, MessageType, Record};
