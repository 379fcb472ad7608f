//! penlog - structured event logger
//!
//! Writes discrete log events as line-delimited JSON records, each tagged
//! with a component name, host identity, timestamp and message type, and
//! renders such streams back into human-readable text.

// Allow multiple crate versions from dependencies (can't easily control)
#![allow(clippy::multiple_crate_versions)]

pub mod config;
pub mod host;
pub mod hr;
pub mod log;

#[cfg(test)]
pub mod testutil;

// Re-export commonly used types
pub use config::{LoggerConfig, Output};
pub use hr::{Converter, Entry};
pub use log::{EventLogger, LoggerBuilder, MessageType, Record};
