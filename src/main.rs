//! penlog - structured event logger
//!
//! CLI entry point: emit a single record, or convert a JSON-lines stream
//! into human-readable text.

// Allow multiple crate versions from dependencies (can't easily control)
#![allow(clippy::multiple_crate_versions)]

use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};

use penlog::{Converter, EventLogger, LoggerConfig, MessageType, Record};

/// Structured JSON-lines event logger
#[derive(Parser, Debug)]
#[command(name = "penlog", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Emit one log record
    Log(LogArgs),
    /// Convert JSON-lines records into human-readable text
    Hr(HrArgs),
}

#[derive(Args, Debug)]
struct LogArgs {
    /// Path to a penlog.toml configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Component name (overrides the config file)
    #[arg(long)]
    component: Option<String>,

    /// Message type
    #[arg(long = "type", default_value = "info")]
    kind: MessageType,

    /// Resource handle, required for read and write records
    #[arg(long)]
    handle: Option<String>,

    /// Flush after writing (overrides the config file)
    #[arg(long)]
    flush: bool,

    /// Output: "stderr", "stdout" or a file path (overrides the config file)
    #[arg(long)]
    output: Option<String>,

    /// Message payload; multiple words are joined by spaces
    #[arg(required = true)]
    message: Vec<String>,
}

#[derive(Args, Debug)]
struct HrArgs {
    /// Disable colorized output
    #[arg(long)]
    no_colors: bool,

    /// strftime timespec for rendered timestamps
    #[arg(short = 's', long, default_value = penlog::hr::DEFAULT_TIMESPEC)]
    timespec: String,

    /// Width of the component column
    #[arg(long, default_value_t = 8)]
    complen: usize,

    /// Width of the type column
    #[arg(long, default_value_t = 8)]
    typelen: usize,

    /// Input files (stdin when none are given)
    files: Vec<PathBuf>,
}

/// Merge the config file with command-line overrides.
fn resolve_config(args: &LogArgs) -> Result<LoggerConfig> {
    let mut config = match &args.config {
        Some(path) => LoggerConfig::from_path(path)
            .with_context(|| format!("Failed to load config from '{}'", path.display()))?,
        None => LoggerConfig::default(),
    };
    if let Some(component) = &args.component {
        config.component.clone_from(component);
    }
    if let Some(output) = &args.output {
        config.output.clone_from(output);
    }
    config.flush |= args.flush;
    config.validate()?;
    Ok(config)
}

/// Build the record requested on the command line.
fn build_record(kind: MessageType, handle: Option<&str>, data: String) -> Result<Record> {
    match (kind, handle) {
        (MessageType::Read, Some(handle)) => Ok(Record::read(data, handle)),
        (MessageType::Write, Some(handle)) => Ok(Record::write(data, handle)),
        (MessageType::Read | MessageType::Write, None) => {
            bail!("--handle is required for '{kind}' records")
        }
        (_, Some(_)) => bail!("--handle is only valid for read and write records"),
        (MessageType::Preamble, None) => Ok(Record::preamble(data)),
        (kind, None) => Record::message(kind, data),
    }
}

fn run_log(args: &LogArgs) -> Result<()> {
    let record = build_record(args.kind, args.handle.as_deref(), args.message.join(" "))?;
    let logger: EventLogger = resolve_config(args)?.build()?;
    logger.emit(&record)?;
    logger.flush()
}

fn run_hr(args: &HrArgs) -> Result<()> {
    let converter = Converter {
        timespec: args.timespec.clone(),
        comp_len: args.complen,
        type_len: args.typelen,
        colors: !args.no_colors,
    };
    converter.validate()?;

    let stdout = io::stdout();
    if args.files.is_empty() {
        return converter.convert(io::stdin().lock(), stdout.lock());
    }
    for path in &args.files {
        let file =
            File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
        converter.convert(BufReader::new(file), stdout.lock())?;
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match &cli.command {
        Command::Log(args) => run_log(args),
        Command::Hr(args) => run_hr(args),
    }
}
