//! # Scanner Configuration Module
//!
//! Provides configuration for the media library import.
//!
//! ## Overview
//!
//! The configuration system uses a builder pattern to construct a
//! [`ScannerConfig`]. The builder validates settings up front so a bad host
//! configuration fails when the plugin loads rather than on the first scan.
//!
//! ## Usage
//!
//! ```
//! use core_runtime::config::ScannerConfig;
//!
//! let config = ScannerConfig::builder()
//!     .rescan_root("/storage/emulated/0")
//!     .rescan_root("/storage/1234-ABCD")
//!     .build()
//!     .expect("valid config");
//!
//! assert_eq!(config.rescan_roots.len(), 2);
//! ```
//!
//! Hosts that pass configuration as JSON can deserialize it directly; missing
//! fields fall back to the defaults:
//!
//! ```
//! use core_runtime::config::ScannerConfig;
//!
//! let config = ScannerConfig::from_json(r#"{ "rescan_before_query": false }"#).unwrap();
//! assert!(!config.rescan_before_query);
//! assert_eq!(config.source_type, "LOCAL");
//! ```

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Primary shared storage root on Android devices
pub const DEFAULT_RESCAN_ROOT: &str = "/storage/emulated/0";

/// Source tag stamped on songs imported from the device index
pub const DEFAULT_SOURCE_TYPE: &str = "LOCAL";

/// Settings for a media index import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScannerConfig {
    /// Roots the host is asked to rescan before the index is queried
    pub rescan_roots: Vec<String>,

    /// Whether to request a rescan before querying
    pub rescan_before_query: bool,

    /// Source tag stamped on every imported song
    pub source_type: String,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            rescan_roots: vec![DEFAULT_RESCAN_ROOT.to_string()],
            rescan_before_query: true,
            source_type: DEFAULT_SOURCE_TYPE.to_string(),
        }
    }
}

impl ScannerConfig {
    /// Creates a new builder for constructing a `ScannerConfig`.
    pub fn builder() -> ScannerConfigBuilder {
        ScannerConfigBuilder::default()
    }

    /// Parse and validate a JSON configuration supplied by the host
    pub fn from_json(json: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(json)
            .map_err(|e| Error::Config(format!("Invalid scanner configuration: {}", e)))?;

        // A sequence would otherwise fill every field from the defaults
        if !value.is_object() {
            return Err(Error::Config(
                "Scanner configuration must be a JSON object".to_string(),
            ));
        }

        let config: Self = serde_json::from_value(value)
            .map_err(|e| Error::Config(format!("Invalid scanner configuration: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration and returns an error if invalid.
    ///
    /// This checks:
    /// - Source type is not empty
    /// - At least one absolute rescan root is set when rescanning is enabled
    pub fn validate(&self) -> Result<()> {
        if self.source_type.trim().is_empty() {
            return Err(Error::Config("Source type cannot be empty".to_string()));
        }

        if self.rescan_before_query {
            if self.rescan_roots.is_empty() {
                return Err(Error::Config(
                    "Rescan enabled but no rescan roots configured. \
                     Add a root or disable rescan_before_query."
                        .to_string(),
                ));
            }

            if let Some(root) = self.rescan_roots.iter().find(|root| !root.starts_with('/')) {
                return Err(Error::Config(format!(
                    "Rescan root must be an absolute path: {:?}",
                    root
                )));
            }
        }

        Ok(())
    }
}

/// Builder for constructing a [`ScannerConfig`] with validation.
///
/// Roots added with [`rescan_root`](ScannerConfigBuilder::rescan_root)
/// replace the default root.
#[derive(Debug, Default)]
pub struct ScannerConfigBuilder {
    rescan_roots: Vec<String>,
    rescan_before_query: Option<bool>,
    source_type: Option<String>,
}

impl ScannerConfigBuilder {
    /// Add a root to rescan before querying
    pub fn rescan_root(mut self, root: impl Into<String>) -> Self {
        self.rescan_roots.push(root.into());
        self
    }

    /// Enable or disable the rescan request
    pub fn rescan_before_query(mut self, enabled: bool) -> Self {
        self.rescan_before_query = Some(enabled);
        self
    }

    /// Override the source tag
    pub fn source_type(mut self, source_type: impl Into<String>) -> Self {
        self.source_type = Some(source_type.into());
        self
    }

    /// Builds the configuration, validating every setting.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when [`ScannerConfig::validate`] fails.
    pub fn build(self) -> Result<ScannerConfig> {
        let defaults = ScannerConfig::default();

        let config = ScannerConfig {
            rescan_roots: if self.rescan_roots.is_empty() {
                defaults.rescan_roots
            } else {
                self.rescan_roots
            },
            rescan_before_query: self
                .rescan_before_query
                .unwrap_or(defaults.rescan_before_query),
            source_type: self.source_type.unwrap_or(defaults.source_type),
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ScannerConfig::builder().build().unwrap();
        assert_eq!(config, ScannerConfig::default());
        assert_eq!(config.rescan_roots, vec![DEFAULT_RESCAN_ROOT.to_string()]);
        assert!(config.rescan_before_query);
        assert_eq!(config.source_type, "LOCAL");
    }

    #[test]
    fn test_custom_roots_replace_default() {
        let config = ScannerConfig::builder()
            .rescan_root("/sdcard/Music")
            .build()
            .unwrap();
        assert_eq!(config.rescan_roots, vec!["/sdcard/Music".to_string()]);
    }

    #[test]
    fn test_relative_root_rejected() {
        let err = ScannerConfig::builder()
            .rescan_root("Music")
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("absolute"));
    }

    #[test]
    fn test_relative_root_allowed_when_rescan_disabled() {
        let config = ScannerConfig::builder()
            .rescan_root("Music")
            .rescan_before_query(false)
            .build();
        assert!(config.is_ok());
    }

    #[test]
    fn test_empty_source_type_rejected() {
        let result = ScannerConfig::builder().source_type("  ").build();
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_validate_empty_roots() {
        let config = ScannerConfig {
            rescan_roots: vec![],
            ..ScannerConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_json() {
        let config = ScannerConfig::from_json(
            r#"{ "rescan_roots": ["/storage/emulated/0/Music"], "source_type": "DEVICE" }"#,
        )
        .unwrap();
        assert_eq!(config.rescan_roots, vec!["/storage/emulated/0/Music".to_string()]);
        assert_eq!(config.source_type, "DEVICE");
        assert!(config.rescan_before_query);

        assert!(ScannerConfig::from_json("[]").is_err());
        assert!(ScannerConfig::from_json(r#"["/storage/emulated/0", true, "LOCAL"]"#).is_err());
        assert!(ScannerConfig::from_json("null").is_err());
        assert!(ScannerConfig::from_json("{}").is_ok());
        assert!(ScannerConfig::from_json(r#"{ "rescan_roots": [] }"#).is_err());
    }
}
