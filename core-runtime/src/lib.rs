//! # Core Runtime Module
//!
//! Provides foundational runtime infrastructure for the media import core:
//! - Logging and tracing infrastructure
//! - Scanner configuration
//!
//! ## Overview
//!
//! This crate contains the runtime utilities that other modules depend on.
//! It establishes the logging conventions and the configuration surface the
//! host plugin uses to tune an import.

pub mod config;
pub mod error;
pub mod logging;

pub use config::{ScannerConfig, ScannerConfigBuilder};
pub use error::{Error, Result};
