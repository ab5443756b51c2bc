//! # Desktop Bridge Implementations
//!
//! Default implementations of bridge traits for desktop platforms
//! (macOS, Windows, Linux) and for tests.
//!
//! ## Overview
//!
//! Desktop hosts have no shared media index, so this crate provides:
//! - `MediaStoreContext` using an in-memory table that can be seeded in code
//!   or loaded from a JSON snapshot exported from a device
//!
//! ## Usage
//!
//! ```ignore
//! use bridge_desktop::{InMemoryMediaStore, MediaRecord};
//! use bridge_traits::media_store::columns;
//!
//! let store = InMemoryMediaStore::new(33)
//!     .with_record(MediaRecord::music(1, "Intro", 61_000).with(columns::ARTIST_ID, 3i64));
//!
//! // Hand `&store` to the scanner
//! ```

mod media_store;

pub use media_store::{InMemoryMediaStore, MediaRecord, MemoryCursor, QueryBehavior};
