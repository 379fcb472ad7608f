//! Logger configuration parser
//!
//! Parses a `penlog.toml` file into the settings used to build an
//! [`EventLogger`]. Every key is optional:
//!
//! ```toml
//! component = "scanner"
//! time_format = "%c"          # recorded only; timestamps are ISO-8601
//! flush = true
//! output = "scan.log.jsonl"   # or "stderr" / "stdout"
//! ```

use std::fs::OpenOptions;
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::log::logger::{DEFAULT_COMPONENT, DEFAULT_TIME_FORMAT};
use crate::log::EventLogger;

/// Where records are written
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    /// Standard error (the default)
    Stderr,
    /// Standard output
    Stdout,
    /// Append to a file, creating it if missing
    File(PathBuf),
}

impl Output {
    fn parse(raw: &str) -> Self {
        match raw {
            "stderr" | "" => Self::Stderr,
            "stdout" | "-" => Self::Stdout,
            path => Self::File(PathBuf::from(path)),
        }
    }
}

/// Settings for building an [`EventLogger`]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct LoggerConfig {
    /// Component name stamped on every record
    #[serde(default = "default_component")]
    pub component: String,
    /// Time format specifier, recorded on the logger but not applied
    #[serde(default = "default_time_format")]
    pub time_format: String,
    /// Flush the sink after every record
    #[serde(default)]
    pub flush: bool,
    /// `"stderr"`, `"stdout"` or a file path
    #[serde(default = "default_output")]
    pub output: String,
}

fn default_component() -> String {
    DEFAULT_COMPONENT.to_string()
}

fn default_time_format() -> String {
    DEFAULT_TIME_FORMAT.to_string()
}

fn default_output() -> String {
    "stderr".to_string()
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            component: default_component(),
            time_format: default_time_format(),
            flush: false,
            output: default_output(),
        }
    }
}

impl LoggerConfig {
    /// Parse a config file from a path
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&content)
    }

    /// Parse config content from a string
    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).context("Failed to parse penlog.toml")?;
        config.validate()?;
        Ok(config)
    }

    /// Parsed form of the `output` setting
    #[must_use]
    pub fn output(&self) -> Output {
        Output::parse(&self.output)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.component.trim().is_empty() {
            bail!("Component name must not be empty");
        }
        Ok(())
    }

    /// Open the configured output and build the logger
    pub fn build(&self) -> Result<EventLogger> {
        self.validate()?;
        let builder = EventLogger::builder()
            .component(&self.component)
            .time_format(&self.time_format)
            .flush(self.flush);

        let builder = match self.output() {
            Output::Stderr => builder.sink(io::stderr()),
            Output::Stdout => builder.sink(io::stdout()),
            Output::File(path) => {
                let file = OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(&path)
                    .with_context(|| format!("Failed to open log file: {}", path.display()))?;
                builder.sink(BufWriter::new(file))
            }
        };
        builder.build()
    }
}
