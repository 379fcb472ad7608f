//! Shared test utilities
//!
//! Common helpers used across test modules. Only compiled in test builds.

use std::io::{self, Write};
use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::Value;

/// In-memory sink that can be cloned into a logger and inspected afterwards.
#[derive(Clone, Default)]
pub struct SharedBuffer {
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl SharedBuffer {
    /// Create an empty buffer
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, as UTF-8 text
    #[must_use]
    pub fn contents(&self) -> String {
        String::from_utf8(self.bytes.lock().clone()).unwrap()
    }

    /// Parse every written line as a JSON value
    #[must_use]
    pub fn json_lines(&self) -> Vec<Value> {
        self.contents()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.bytes.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
