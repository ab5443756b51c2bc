//! Media Store Abstraction Layer
//!
//! Provides a platform-agnostic view of the host's shared media index:
//! - Android: `MediaStore.Audio.Media` through the content resolver
//! - Desktop/tests: an in-memory table (`bridge-desktop`)
//!
//! ## Design Philosophy
//!
//! The host owns the index. The core only ever reads it through a
//! forward-only [`MediaCursor`] returned by [`MediaStoreContext::query_audio`],
//! so every platform exposes the same row semantics: columns are addressed by
//! position, positions are looked up by name, and a column that was requested
//! but is unknown to the platform is simply absent from the result set.
//!
//! ## Usage
//!
//! ```ignore
//! use bridge_traits::media_store::{columns, MediaQuery, MediaStoreContext, ScopedCursor};
//!
//! fn count_music(ctx: &dyn MediaStoreContext) -> bridge_traits::error::Result<usize> {
//!     let query = MediaQuery::audio(vec![columns::ID.into(), columns::IS_MUSIC.into()]);
//!     let Some(cursor) = ctx.query_audio(&query)? else {
//!         return Ok(0);
//!     };
//!     let mut cursor = ScopedCursor::new(cursor);
//!     let is_music = cursor.column_index_or_err(columns::IS_MUSIC)?;
//!     let mut count = 0;
//!     while cursor.move_to_next()? {
//!         if cursor.get_long(is_music)? != 0 {
//!             count += 1;
//!         }
//!     }
//!     Ok(count)
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Deref, DerefMut};

use crate::{
    error::{BridgeError, Result},
    platform::{PlatformSend, PlatformSendSync},
};

// =============================================================================
// Column Names
// =============================================================================

/// Column names of the audio media table.
pub mod columns {
    pub const ID: &str = "_id";
    pub const TITLE: &str = "title";
    pub const DISPLAY_NAME: &str = "_display_name";
    pub const ALBUM: &str = "album";
    pub const ARTIST: &str = "artist";
    pub const ALBUM_ID: &str = "album_id";
    pub const ARTIST_ID: &str = "artist_id";
    pub const DURATION: &str = "duration";
    pub const IS_MUSIC: &str = "is_music";
    pub const DATE_MODIFIED: &str = "date_modified";
    pub const GENRE: &str = "genre";
    pub const GENRE_ID: &str = "genre_id";

    /// Default ordering of `MediaStore.Audio.Media`
    pub const DEFAULT_SORT_ORDER: &str = "title_key";
}

/// Content URI of the external audio collection
pub const EXTERNAL_AUDIO_URI: &str = "content://media/external/audio/media";

/// First platform API level exposing `genre` and `genre_id` on audio rows
pub const GENRE_COLUMNS_MIN_SDK: u32 = 30;

/// Build the album-art content reference for an audio row id.
pub fn album_art_uri(id: i64) -> String {
    format!("{}/{}/albumart", EXTERNAL_AUDIO_URI, id)
}

// =============================================================================
// Values
// =============================================================================

/// A single cell of a media row: null, integer, real, text, or blob
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MediaValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
}

impl MediaValue {
    /// Read the value as a 64-bit integer using cursor coercion rules.
    ///
    /// Null reads as `0`, reals truncate toward zero and numeric text is
    /// parsed. `column` is only used for the error message.
    pub fn to_long(&self, column: &str) -> Result<i64> {
        match self {
            MediaValue::Null => Ok(0),
            MediaValue::Integer(i) => Ok(*i),
            MediaValue::Real(r) => Ok(*r as i64),
            MediaValue::Text(s) => s
                .trim()
                .parse::<i64>()
                .map_err(|_| type_mismatch(column, "i64")),
            MediaValue::Blob(_) => Err(type_mismatch(column, "i64")),
        }
    }

    /// Read the value as text. Null reads as `None`, numbers are formatted.
    pub fn to_text(&self, column: &str) -> Result<Option<String>> {
        match self {
            MediaValue::Null => Ok(None),
            MediaValue::Integer(i) => Ok(Some(i.to_string())),
            MediaValue::Real(r) => Ok(Some(r.to_string())),
            MediaValue::Text(s) => Ok(Some(s.clone())),
            MediaValue::Blob(_) => Err(type_mismatch(column, "String")),
        }
    }

    /// Check if value is null
    pub fn is_null(&self) -> bool {
        matches!(self, MediaValue::Null)
    }
}

impl From<i64> for MediaValue {
    fn from(value: i64) -> Self {
        MediaValue::Integer(value)
    }
}

impl From<&str> for MediaValue {
    fn from(value: &str) -> Self {
        MediaValue::Text(value.to_string())
    }
}

impl From<String> for MediaValue {
    fn from(value: String) -> Self {
        MediaValue::Text(value)
    }
}

impl<T: Into<MediaValue>> From<Option<T>> for MediaValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(MediaValue::Null)
    }
}

fn type_mismatch(column: &str, expected: &str) -> BridgeError {
    BridgeError::TypeMismatch {
        column: column.to_string(),
        expected: expected.to_string(),
    }
}

// =============================================================================
// Query
// =============================================================================

/// Description of a read against the audio collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaQuery {
    /// Collection URI
    pub uri: String,
    /// Requested columns, in result-set order
    pub projection: Vec<String>,
    /// Sort clause; `None` lets the store pick its own order
    pub sort_order: Option<String>,
}

impl MediaQuery {
    /// Query the external audio collection in the store's default order
    pub fn audio(projection: Vec<String>) -> Self {
        Self {
            uri: EXTERNAL_AUDIO_URI.to_string(),
            projection,
            sort_order: Some(columns::DEFAULT_SORT_ORDER.to_string()),
        }
    }
}

/// Optional features of the host media index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MediaStoreCapabilities {
    /// Audio rows carry `genre` and `genre_id`
    pub genre_columns: bool,
}

impl MediaStoreCapabilities {
    /// Derive capabilities from the platform API level
    pub fn for_sdk(sdk_int: u32) -> Self {
        Self {
            genre_columns: sdk_int >= GENRE_COLUMNS_MIN_SDK,
        }
    }
}

// =============================================================================
// Cursor
// =============================================================================

/// Forward-only, read-only view over a query result.
///
/// A fresh cursor is positioned before the first row; call
/// [`move_to_next`](MediaCursor::move_to_next) to advance. Columns are
/// addressed by their position in [`columns`](MediaCursor::columns).
pub trait MediaCursor: PlatformSend {
    /// Column names present in this result set
    fn columns(&self) -> Vec<String>;

    /// Advance to the next row. Returns `false` once the rows are exhausted.
    fn move_to_next(&mut self) -> Result<bool>;

    /// Value at `column` on the current row
    fn value(&self, column: usize) -> Result<MediaValue>;

    /// Release the underlying result set. Further reads fail.
    fn close(&mut self);

    /// Whether [`close`](MediaCursor::close) has been called
    fn is_closed(&self) -> bool;

    /// Position of a column by name, or `None` when it is not in the result set
    fn column_index(&self, name: &str) -> Option<usize> {
        self.columns().iter().position(|column| column == name)
    }

    /// Position of a column by name, failing when it is absent
    fn column_index_or_err(&self, name: &str) -> Result<usize> {
        self.column_index(name)
            .ok_or_else(|| BridgeError::ColumnNotFound {
                column: name.to_string(),
            })
    }

    fn get_long(&self, column: usize) -> Result<i64> {
        let name = self.column_name(column);
        self.value(column)?.to_long(&name)
    }

    fn get_string(&self, column: usize) -> Result<Option<String>> {
        let name = self.column_name(column);
        self.value(column)?.to_text(&name)
    }

    /// Name of the column at `column`, used for diagnostics
    fn column_name(&self, column: usize) -> String {
        self.columns()
            .get(column)
            .cloned()
            .unwrap_or_else(|| format!("#{}", column))
    }
}

/// Cursor handle that is closed exactly once, when it goes out of scope.
pub struct ScopedCursor {
    inner: Box<dyn MediaCursor>,
}

impl ScopedCursor {
    pub fn new(inner: Box<dyn MediaCursor>) -> Self {
        Self { inner }
    }
}

impl Deref for ScopedCursor {
    type Target = dyn MediaCursor;

    fn deref(&self) -> &Self::Target {
        self.inner.as_ref()
    }
}

impl DerefMut for ScopedCursor {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.inner.as_mut()
    }
}

impl Drop for ScopedCursor {
    fn drop(&mut self) {
        if !self.inner.is_closed() {
            self.inner.close();
        }
    }
}

// =============================================================================
// Media Store Context
// =============================================================================

/// Read access to the host's shared media index.
///
/// The context is borrowed by the core for the duration of a call and is
/// never closed by it.
///
/// ## Thread Safety
///
/// Implementations must be `Send + Sync` on native targets. Cursors returned
/// by [`query_audio`](MediaStoreContext::query_audio) only need to be `Send`.
pub trait MediaStoreContext: PlatformSendSync {
    /// Optional features of this index
    fn capabilities(&self) -> MediaStoreCapabilities;

    /// Ask the host to rescan `roots` for new media.
    ///
    /// Fire-and-forget: the host may complete the rescan after this returns.
    fn request_rescan(&self, roots: &[String]) -> Result<()>;

    /// Run a query against the audio collection.
    ///
    /// `Ok(None)` mirrors a null cursor from the host.
    fn query_audio(&self, query: &MediaQuery) -> Result<Option<Box<dyn MediaCursor>>>;

    /// Cover-art content reference for an audio row id
    fn content_uri(&self, id: i64) -> String {
        album_art_uri(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct VecCursor {
        columns: Vec<String>,
        rows: Vec<Vec<MediaValue>>,
        position: Option<usize>,
        closed: bool,
        closes: Arc<AtomicUsize>,
    }

    impl MediaCursor for VecCursor {
        fn columns(&self) -> Vec<String> {
            self.columns.clone()
        }

        fn move_to_next(&mut self) -> Result<bool> {
            let next = self.position.map_or(0, |p| p + 1);
            self.position = Some(next);
            Ok(next < self.rows.len())
        }

        fn value(&self, column: usize) -> Result<MediaValue> {
            let row = self
                .position
                .and_then(|p| self.rows.get(p))
                .ok_or(BridgeError::NoCurrentRow)?;
            row.get(column)
                .cloned()
                .ok_or(BridgeError::ColumnOutOfRange(column))
        }

        fn close(&mut self) {
            self.closed = true;
            self.closes.fetch_add(1, Ordering::SeqCst);
        }

        fn is_closed(&self) -> bool {
            self.closed
        }
    }

    fn cursor(closes: Arc<AtomicUsize>) -> VecCursor {
        VecCursor {
            columns: vec!["_id".to_string(), "title".to_string()],
            rows: vec![vec![MediaValue::Integer(1), MediaValue::Null]],
            position: None,
            closed: false,
            closes,
        }
    }

    #[test]
    fn test_media_value_conversions() {
        assert_eq!(MediaValue::Integer(42).to_long("c").unwrap(), 42);
        assert_eq!(MediaValue::Null.to_long("c").unwrap(), 0);
        assert_eq!(MediaValue::Real(3.9).to_long("c").unwrap(), 3);
        assert_eq!(MediaValue::Text(" 17 ".into()).to_long("c").unwrap(), 17);
        assert!(MediaValue::Text("abc".into()).to_long("c").is_err());

        assert_eq!(MediaValue::Null.to_text("c").unwrap(), None);
        assert_eq!(
            MediaValue::Integer(5).to_text("c").unwrap(),
            Some("5".to_string())
        );
        assert!(MediaValue::Blob(vec![1]).to_text("c").is_err());
    }

    #[test]
    fn test_media_value_from_option() {
        assert_eq!(MediaValue::from(None::<i64>), MediaValue::Null);
        assert_eq!(MediaValue::from(Some("x")), MediaValue::Text("x".into()));
    }

    #[test]
    fn test_capabilities_for_sdk() {
        assert!(!MediaStoreCapabilities::for_sdk(29).genre_columns);
        assert!(MediaStoreCapabilities::for_sdk(30).genre_columns);
        assert!(MediaStoreCapabilities::for_sdk(34).genre_columns);
    }

    #[test]
    fn test_audio_query_defaults() {
        let query = MediaQuery::audio(vec![columns::ID.to_string()]);
        assert_eq!(query.uri, EXTERNAL_AUDIO_URI);
        assert_eq!(query.sort_order.as_deref(), Some(columns::DEFAULT_SORT_ORDER));
    }

    #[test]
    fn test_album_art_uri() {
        assert_eq!(
            album_art_uri(7),
            "content://media/external/audio/media/7/albumart"
        );
    }

    #[test]
    fn test_column_lookup() {
        let cursor = cursor(Arc::new(AtomicUsize::new(0)));
        assert_eq!(cursor.column_index("title"), Some(1));
        assert_eq!(cursor.column_index("genre_id"), None);
        assert!(matches!(
            cursor.column_index_or_err("genre_id"),
            Err(BridgeError::ColumnNotFound { .. })
        ));
    }

    #[test]
    fn test_typed_reads() {
        let mut cursor = cursor(Arc::new(AtomicUsize::new(0)));
        assert!(matches!(cursor.get_long(0), Err(BridgeError::NoCurrentRow)));
        assert!(cursor.move_to_next().unwrap());
        assert_eq!(cursor.get_long(0).unwrap(), 1);
        assert_eq!(cursor.get_string(1).unwrap(), None);
        assert!(!cursor.move_to_next().unwrap());
    }

    #[test]
    fn test_scoped_cursor_closes_once() {
        let closes = Arc::new(AtomicUsize::new(0));
        {
            let mut scoped = ScopedCursor::new(Box::new(cursor(closes.clone())));
            assert!(scoped.move_to_next().unwrap());
        }
        assert_eq!(closes.load(Ordering::SeqCst), 1);

        {
            let mut scoped = ScopedCursor::new(Box::new(cursor(closes.clone())));
            scoped.close();
        }
        assert_eq!(closes.load(Ordering::SeqCst), 2);
    }
}
