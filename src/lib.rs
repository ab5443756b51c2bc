//! Workspace facade crate.
//!
//! Host plugins depend on `media-import-workspace` and get the bridge
//! contracts, runtime setup and library import in one place. The
//! `desktop-shims` feature (on by default) adds the in-memory media store
//! used on desktop builds and in tests.
//!
//! ```ignore
//! use media_import_workspace::{library, ScannerConfig};
//!
//! let response = library::read_directory(&host_media_store, &ScannerConfig::default());
//! ```

pub use bridge_traits as bridge;
pub use core_library as library;
pub use core_runtime as runtime;

#[cfg(feature = "desktop-shims")]
pub use bridge_desktop as desktop;

pub use core_library::{AudioScanner, ScanResponse, Song};
pub use core_runtime::ScannerConfig;
