//! Record model for penlog events
//!
//! Every event is a `Record` variant carrying exactly the fields its type
//! needs. `encode_line` is the single place where a record is turned into
//! its wire form together with the fields injected by the logger.

use std::fmt;
use std::str::FromStr;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

/// Semantic type of a log record
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageType {
    /// Something failed
    Error,
    /// Something looks wrong but processing continues
    Warning,
    /// General information (the default)
    #[default]
    Info,
    /// Verbose diagnostics
    Debug,
    /// Final or periodic summary
    Summary,
    /// Data was read from a handle
    Read,
    /// Data was written to a handle
    Write,
    /// Header emitted once before a run
    Preamble,
}

impl MessageType {
    /// All message types in wire order
    pub const ALL: [Self; 8] = [
        Self::Error,
        Self::Warning,
        Self::Info,
        Self::Debug,
        Self::Summary,
        Self::Read,
        Self::Write,
        Self::Preamble,
    ];

    /// Lowercase wire name of this type
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Summary => "summary",
            Self::Read => "read",
            Self::Write => "write",
            Self::Preamble => "preamble",
        }
    }

    /// True for the generic kinds accepted by `log_msg`.
    #[must_use]
    pub const fn is_message(self) -> bool {
        matches!(
            self,
            Self::Error | Self::Warning | Self::Info | Self::Debug | Self::Summary
        )
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MessageType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
            .with_context(|| format!("Unknown message type: '{s}'"))
    }
}

/// A single log event before identity fields are injected
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Record {
    /// Error message
    Error {
        /// Message payload
        data: String,
    },
    /// Warning message
    Warning {
        /// Message payload
        data: String,
    },
    /// Informational message
    Info {
        /// Message payload
        data: String,
    },
    /// Debug message
    Debug {
        /// Message payload
        data: String,
    },
    /// Summary message
    Summary {
        /// Message payload
        data: String,
    },
    /// Data read from a resource
    Read {
        /// Message payload
        data: String,
        /// Resource that was read (file path, socket, ...)
        handle: String,
    },
    /// Data written to a resource
    Write {
        /// Message payload
        data: String,
        /// Resource that was written
        handle: String,
    },
    /// Run header
    Preamble {
        /// Message payload
        data: String,
    },
}

impl Record {
    /// Build a generic record for one of error, warning, info, debug or summary.
    ///
    /// Read, write and preamble records carry extra meaning and must be built
    /// through their own variants.
    pub fn message(kind: MessageType, data: impl Into<String>) -> Result<Self> {
        let data = data.into();
        Ok(match kind {
            MessageType::Error => Self::Error { data },
            MessageType::Warning => Self::Warning { data },
            MessageType::Info => Self::Info { data },
            MessageType::Debug => Self::Debug { data },
            MessageType::Summary => Self::Summary { data },
            MessageType::Read | MessageType::Write | MessageType::Preamble => {
                bail!("'{kind}' is not a generic message type")
            }
        })
    }

    /// Build a read record
    pub fn read(data: impl Into<String>, handle: impl Into<String>) -> Self {
        Self::Read {
            data: data.into(),
            handle: handle.into(),
        }
    }

    /// Build a write record
    pub fn write(data: impl Into<String>, handle: impl Into<String>) -> Self {
        Self::Write {
            data: data.into(),
            handle: handle.into(),
        }
    }

    /// Build a preamble record
    pub fn preamble(data: impl Into<String>) -> Self {
        Self::Preamble { data: data.into() }
    }

    /// The semantic type of this record
    #[must_use]
    pub const fn kind(&self) -> MessageType {
        match self {
            Self::Error { .. } => MessageType::Error,
            Self::Warning { .. } => MessageType::Warning,
            Self::Info { .. } => MessageType::Info,
            Self::Debug { .. } => MessageType::Debug,
            Self::Summary { .. } => MessageType::Summary,
            Self::Read { .. } => MessageType::Read,
            Self::Write { .. } => MessageType::Write,
            Self::Preamble { .. } => MessageType::Preamble,
        }
    }

    /// The message payload
    #[must_use]
    pub fn data(&self) -> &str {
        match self {
            Self::Error { data }
            | Self::Warning { data }
            | Self::Info { data }
            | Self::Debug { data }
            | Self::Summary { data }
            | Self::Read { data, .. }
            | Self::Write { data, .. }
            | Self::Preamble { data } => data,
        }
    }

    /// The resource handle, present only on read and write records
    #[must_use]
    pub fn handle(&self) -> Option<&str> {
        match self {
            Self::Read { handle, .. } | Self::Write { handle, .. } => Some(handle),
            _ => None,
        }
    }
}

/// Wire form of a record: the variant's fields followed by the injected identity
#[derive(Serialize)]
struct Envelope<'a> {
    #[serde(flatten)]
    record: &'a Record,
    component: &'a str,
    host: &'a str,
    timestamp: &'a str,
}

/// Serialize a record plus its identity fields into one JSON line (without the newline).
pub fn encode_line(
    record: &Record,
    component: &str,
    host: &str,
    timestamp: &str,
) -> Result<String> {
    let envelope = Envelope {
        record,
        component,
        host,
        timestamp,
    };
    serde_json::to_string(&envelope)
        .with_context(|| format!("Failed to serialize {} record to JSON", record.kind()))
}
