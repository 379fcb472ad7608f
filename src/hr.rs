//! Human-readable rendering of penlog streams
//!
//! Reads JSON lines as written by [`EventLogger`](crate::log::EventLogger)
//! and renders each record as one aligned, optionally colorized text line
//! of the form `<ts> {<component>} [<type>]: <data>`. Input that is not a
//! valid record is shown as an error from component `JSON` so a broken line
//! never stops the conversion.

use std::fmt::Write as _;
use std::io::{BufRead, Write};

use anyhow::{bail, Context, Result};
use chrono::format::{Item, StrftimeItems};
use chrono::{Local, NaiveDateTime};
use colored::Colorize;
use serde::Deserialize;

use crate::log::logger::TIMESTAMP_FORMAT;

/// Default output timespec, e.g. `Jan  2 15:04:05.000`
pub const DEFAULT_TIMESPEC: &str = "%b %e %H:%M:%S%.3f";

/// Payload of a record: a string, or a list of strings joined by spaces
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Data {
    /// Plain text payload
    Text(String),
    /// Multi-part payload
    Parts(Vec<String>),
}

impl Data {
    /// Payload as a single string
    #[must_use]
    pub fn text(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Parts(parts) => parts.join(" "),
        }
    }
}

/// A parsed log record
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Entry {
    /// Local ISO-8601 timestamp
    pub timestamp: String,
    /// Emitting component
    pub component: String,
    /// Message type, kept as text so unknown types still render
    #[serde(rename = "type")]
    pub kind: String,
    /// Message payload
    pub data: Data,
    /// Resource handle of read/write records
    #[serde(default)]
    pub handle: Option<String>,
    /// Emitting host
    #[serde(default)]
    pub host: Option<String>,
}

impl Entry {
    /// Error entry standing in for an unparseable input line
    #[must_use]
    pub fn invalid(raw: &str) -> Self {
        Self {
            timestamp: Local::now().format(TIMESTAMP_FORMAT).to_string(),
            component: "JSON".to_string(),
            kind: "error".to_string(),
            data: Data::Text(raw.to_string()),
            handle: None,
            host: None,
        }
    }
}

/// Parse a single JSON line into an [`Entry`].
pub fn parse_line(line: &str) -> Result<Entry> {
    serde_json::from_str(line).context("Failed to parse log record")
}

/// Renders entries as text lines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Converter {
    /// strftime specifier for the rendered timestamp
    pub timespec: String,
    /// Width the component column is padded or truncated to
    pub comp_len: usize,
    /// Width the type column is padded or truncated to
    pub type_len: usize,
    /// Colorize payloads by message type
    pub colors: bool,
}

impl Default for Converter {
    fn default() -> Self {
        Self {
            timespec: DEFAULT_TIMESPEC.to_string(),
            comp_len: 8,
            type_len: 8,
            colors: true,
        }
    }
}

impl Converter {
    /// Check the timespec before any line is rendered
    pub fn validate(&self) -> Result<()> {
        if StrftimeItems::new(&self.timespec).any(|item| matches!(item, Item::Error)) {
            bail!("Invalid timespec: '{}'", self.timespec);
        }
        Ok(())
    }

    /// Render one entry as `"<ts> {<component>} [<type>]: <data>"`.
    pub fn render(&self, entry: &Entry) -> Result<String> {
        let parsed = NaiveDateTime::parse_from_str(&entry.timestamp, "%Y-%m-%dT%H:%M:%S%.f")
            .with_context(|| format!("Invalid timestamp: '{}'", entry.timestamp))?;

        let mut ts = String::new();
        write!(ts, "{}", parsed.format(&self.timespec))
            .with_context(|| format!("Failed to format timestamp with '{}'", self.timespec))?;

        let mut payload = self.colorize(&entry.kind, entry.data.text());
        if let Some(handle) = &entry.handle {
            payload = format!("{payload} [{handle}]");
        }

        Ok(format!(
            "{ts} {{{}}} [{}]: {payload}",
            pad_or_truncate(&entry.component, self.comp_len),
            pad_or_truncate(&entry.kind, self.type_len),
        ))
    }

    /// Convert every line of `reader`, writing rendered lines to `writer`.
    pub fn convert<R: BufRead, W: Write>(&self, reader: R, mut writer: W) -> Result<()> {
        for line in reader.lines() {
            let line = line.context("Failed to read input line")?;
            if line.trim().is_empty() {
                continue;
            }

            // A timespec can pass validation yet fail on a given date
            // (e.g. `%z` on a naive time); then the raw line is kept.
            let rendered = parse_line(&line)
                .and_then(|entry| self.render(&entry))
                .or_else(|_| self.render(&Entry::invalid(&line)))
                .unwrap_or(line);
            writeln!(writer, "{rendered}").context("Failed to write output")?;
        }
        writer.flush().context("Failed to flush output")
    }

    fn colorize(&self, kind: &str, text: String) -> String {
        if !self.colors {
            return text;
        }
        match kind {
            "error" => text.red().bold().to_string(),
            "warning" => text.yellow().bold().to_string(),
            "summary" | "preamble" => text.bold().to_string(),
            "debug" => text.dimmed().to_string(),
            _ => text,
        }
    }
}

fn pad_or_truncate(s: &str, width: usize) -> String {
    let mut out: String = s.chars().take(width).collect();
    let len = out.chars().count();
    out.push_str(&" ".repeat(width - len));
    out
}
