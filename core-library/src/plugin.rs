//! Plugin boundary
//!
//! Entry points the host plugin runtime calls. Responses are plain serde
//! values so the runtime can hand them to the webview as JSON.

use bridge_traits::media_store::MediaStoreContext;
use core_runtime::config::ScannerConfig;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::Song;
use crate::scanner::AudioScanner;

/// Response handed back to the plugin runtime after a directory read
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanResponse {
    pub songs: Vec<Song>,
}

impl ScanResponse {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Import every song from the host media index.
pub fn read_directory(context: &dyn MediaStoreContext, config: &ScannerConfig) -> ScanResponse {
    let scanner = AudioScanner::new(config.clone());
    ScanResponse {
        songs: scanner.scan(context),
    }
}

/// JSON-in, JSON-out variant of [`read_directory`].
///
/// `config_json` is optional; without it the defaults apply. Only an invalid
/// configuration produces an error, the scan itself never does.
pub fn read_directory_json(
    context: &dyn MediaStoreContext,
    config_json: Option<&str>,
) -> Result<String> {
    let config = match config_json {
        Some(json) => ScannerConfig::from_json(json)?,
        None => ScannerConfig::default(),
    };

    read_directory(context, &config).to_json()
}
