//! # Host Bridge Traits
//!
//! Platform abstraction traits that must be implemented by each host platform.
//!
//! ## Overview
//!
//! This crate defines the contract between the core library and the
//! platform-specific code that owns the media index. Each trait represents a
//! capability that the core requires but that must be implemented differently
//! per platform.
//!
//! ## Traits
//!
//! ### Media Index
//! - [`MediaStoreContext`](media_store::MediaStoreContext) - Query, rescan and cover-art lookups against the shared media index
//! - [`MediaCursor`](media_store::MediaCursor) - Forward-only view over a query result
//!
//! ### Utilities
//! - [`LoggerSink`](logging::LoggerSink) - Forward structured logs to host logging
//!
//! ## Platform Requirements
//!
//! | Platform | Implementation | Status |
//! |----------|----------------|--------|
//! | Android  | Plugin host (`MediaStore` via content resolver) | ✅ |
//! | Desktop  | `bridge-desktop` (in-memory snapshot) | ✅ |
//!
//! ## Error Handling
//!
//! All bridge traits use the [`BridgeError`](error::BridgeError) type for consistent
//! error handling. Platform implementations should:
//!
//! - Convert platform-specific errors to `BridgeError`
//! - Name the offending column when a row cannot be read
//!
//! ## Thread Safety
//!
//! `MediaStoreContext` and `LoggerSink` require `Send + Sync` on native
//! targets; cursors only need `Send`.

pub mod error;
pub mod logging;
pub mod media_store;
pub mod platform;

pub use error::BridgeError;

// Re-export commonly used types
pub use logging::{ConsoleLogger, LogEntry, LogLevel, LoggerSink};
pub use media_store::{
    columns, MediaCursor, MediaQuery, MediaStoreCapabilities, MediaStoreContext, MediaValue,
    ScopedCursor,
};
