//! Import songs from a media index snapshot
//!
//! Runs the scanner against a JSON export of a device's audio collection and
//! prints the plugin response.
//!
//! Run with:
//! ```bash
//! cargo run -p core-library --example scan_snapshot -- snapshot.json
//!
//! # With a custom filter
//! cargo run -p core-library --example scan_snapshot -- snapshot.json "core_library=trace"
//! ```

use anyhow::{Context, Result};
use bridge_desktop::InMemoryMediaStore;
use bridge_traits::logging::{ConsoleLogger, LogLevel};
use core_library::{AudioScanner, ScanResponse};
use core_runtime::config::ScannerConfig;
use core_runtime::logging::{init_logging, LogFormat, LoggingConfig};
use std::env;
use std::sync::Arc;

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    let snapshot = args
        .get(1)
        .context("usage: scan_snapshot <snapshot.json> [filter]")?;

    let mut logging = LoggingConfig::default()
        .with_format(LogFormat::Compact)
        .with_level(LogLevel::Debug)
        .with_logger_sink(Arc::new(ConsoleLogger {
            min_level: LogLevel::Warn,
        }))
        .with_sink_tag("file-scanner");

    if let Some(filter) = args.get(2) {
        logging = logging.with_filter(filter.clone());
    }

    init_logging(logging)?;

    let store = InMemoryMediaStore::from_json_file(snapshot)
        .with_context(|| format!("failed to load snapshot {}", snapshot))?;

    let outcome = AudioScanner::new(ScannerConfig::default()).scan_with_summary(&store);
    tracing::info!(summary = ?outcome.summary, "Scan finished");

    let response = ScanResponse {
        songs: outcome.songs,
    };
    println!("{}", serde_json::to_string_pretty(&response)?);

    Ok(())
}
