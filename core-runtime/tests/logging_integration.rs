//! Integration tests for logging system

use bridge_traits::error::Result as SinkResult;
use bridge_traits::logging::{LogEntry, LogLevel, LoggerSink};
use core_runtime::logging::{init_logging, LogFormat, LoggingConfig};
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct RecordingSink {
    entries: Mutex<Vec<LogEntry>>,
}

impl LoggerSink for RecordingSink {
    fn log(&self, entry: LogEntry) -> SinkResult<()> {
        self.entries.lock().unwrap().push(entry);
        Ok(())
    }

    fn min_level(&self) -> LogLevel {
        LogLevel::Debug
    }
}

#[test]
fn test_logging_config_defaults() {
    let config = LoggingConfig::default();

    assert_eq!(config.level, LogLevel::Info);
    assert!(config.filter.is_none());
    assert!(config.logger_sink.is_none());
    assert!(config.sink_tag.is_none());
    assert!(config.display_target);
    assert!(!config.display_thread_info);
}

// Global subscriber can only be installed once per process, so everything
// that depends on it lives in this one test.
#[test]
fn test_init_logging_forwards_to_sink_once() {
    let sink = Arc::new(RecordingSink::default());
    let config = LoggingConfig::default()
        .with_format(LogFormat::Compact)
        .with_level(LogLevel::Debug)
        .with_filter("debug")
        .with_logger_sink(sink.clone())
        .with_sink_tag("file-scanner");

    init_logging(config.clone()).expect("first initialization succeeds");

    tracing::debug!(song_id = 12, "added song to import");
    tracing::trace!("filtered out");

    {
        let entries = sink.entries.lock().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].target, "file-scanner");
        assert_eq!(entries[0].message, "added song to import");
        assert_eq!(entries[0].fields.get("song_id"), Some(&"12".to_string()));
    }

    assert!(init_logging(config).is_err());
}
