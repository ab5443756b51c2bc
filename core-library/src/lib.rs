//! # Library Import Module
//!
//! Imports the songs the host platform has already indexed.
//!
//! ## Overview
//!
//! This module provides:
//! - Song, artist, album and genre models in the host's wire format
//! - [`AudioScanner`], a single pass over the media index cursor
//! - Plugin entry points returning serializable responses

pub mod error;
pub mod models;
pub mod plugin;
pub mod scanner;

pub use error::{LibraryError, Result};
pub use models::{Album, Artist, Genre, Song};
pub use plugin::{read_directory, read_directory_json, ScanResponse};
pub use scanner::{AudioScanner, ScanOutcome, ScanSummary};
