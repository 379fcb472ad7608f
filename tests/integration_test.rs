#![allow(missing_docs)]

use std::fs::{self, OpenOptions};
use std::io::BufWriter;

use serde_json::Value;
use tempfile::TempDir;

use penlog::log::{self as plog, EventLogger};
use penlog::{Converter, LoggerConfig};

fn read_records(path: &std::path::Path) -> Vec<Value> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

fn buffered_file_logger(path: &std::path::Path, component: &str, flush: bool) -> EventLogger {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .unwrap();
    EventLogger::builder()
        .component(component)
        .flush(flush)
        .sink(BufWriter::new(file))
        .build()
        .unwrap()
}

/// With flushing enabled every record is on disk as soon as the call returns.
#[test]
fn test_flush_policy_makes_each_line_visible() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("flushed.jsonl");
    let logger = buffered_file_logger(&path, "fsck", true);

    for i in 1..=3 {
        logger.log_info(&format!("step {i}")).unwrap();
        let records = read_records(&path);
        assert_eq!(records.len(), i);
        assert_eq!(records[i - 1]["data"], format!("step {i}"));
    }
}

/// Without flushing, a buffered sink holds records until an explicit flush.
#[test]
fn test_buffered_sink_without_flush_policy() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("buffered.jsonl");
    let logger = buffered_file_logger(&path, "fsck", false);

    logger.log_info("pending").unwrap();
    assert!(fs::read_to_string(&path).unwrap().is_empty());

    logger.flush().unwrap();
    assert_eq!(read_records(&path).len(), 1);
}

#[test]
fn test_every_record_carries_identity() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("all.jsonl");
    let logger = buffered_file_logger(&path, "scanner", true);

    logger.log_preamble("scanner v1").unwrap();
    logger.log_read("4096 bytes", "/dev/sda1").unwrap();
    logger.log_write("512 bytes", "/tmp/out").unwrap();
    logger.log_debug("d").unwrap();
    logger.log_info("i").unwrap();
    logger.log_warning("w").unwrap();
    logger.log_error("disk full").unwrap();
    logger.log_summary("done").unwrap();

    let records = read_records(&path);
    assert_eq!(records.len(), 8);
    for record in &records {
        assert_eq!(record["component"], "scanner");
        assert_eq!(record["host"], logger.host());
        assert!(!record["timestamp"].as_str().unwrap().is_empty());
        let has_handle = record.get("handle").is_some();
        let is_io = record["type"] == "read" || record["type"] == "write";
        assert_eq!(has_handle, is_io);
    }
    assert_eq!(records[1]["handle"], "/dev/sda1");
    assert_eq!(records[6]["data"], "disk full");
}

/// Replacing the default only affects records emitted afterwards.
#[test]
fn test_default_replacement_keeps_written_records() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("default.jsonl");

    plog::set_default(buffered_file_logger(&path, "before", true));
    plog::log_info("one").unwrap();
    plog::set_default(buffered_file_logger(&path, "after", true));
    plog::log_warning("two").unwrap();

    let records = read_records(&path);
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["component"], "before");
    assert_eq!(records[0]["type"], "info");
    assert_eq!(records[1]["component"], "after");
    assert_eq!(records[1]["type"], "warning");
}

/// Config-built logger output converts back into readable text.
#[test]
fn test_config_logger_output_renders_with_converter() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("cfg.jsonl");
    let config = LoggerConfig::parse(&format!(
        "component = \"dd\"\nflush = true\noutput = {:?}\n",
        path.display().to_string()
    ))
    .unwrap();

    let logger = config.build().unwrap();
    logger.log_read("4096 bytes", "/dev/sda1").unwrap();
    logger.log_error("disk full").unwrap();

    let converter = Converter {
        colors: false,
        ..Converter::default()
    };
    let mut out = Vec::new();
    converter
        .convert(fs::read_to_string(&path).unwrap().as_bytes(), &mut out)
        .unwrap();

    let text = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].ends_with("{dd      } [read    ]: 4096 bytes [/dev/sda1]"));
    assert!(lines[1].ends_with("{dd      } [error   ]: disk full"));
}

/// A locale time format on the logger still yields records the converter reads.
#[test]
fn test_locale_time_format_output_still_converts() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("locale.jsonl");
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .unwrap();
    let logger = EventLogger::builder()
        .component("fsck")
        .time_format("%c")
        .flush(true)
        .sink(BufWriter::new(file))
        .build()
        .unwrap();
    logger.log_info("first").unwrap();
    logger.log_info("second").unwrap();

    let records = read_records(&path);
    let first = records[0]["timestamp"].as_str().unwrap();
    let second = records[1]["timestamp"].as_str().unwrap();
    assert!(first <= second);

    let converter = Converter {
        colors: false,
        ..Converter::default()
    };
    let mut out = Vec::new();
    converter
        .convert(fs::read_to_string(&path).unwrap().as_bytes(), &mut out)
        .unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(!text.contains("{JSON"));
    assert!(text.lines().all(|line| line.contains("{fsck    } [info    ]")));
}
