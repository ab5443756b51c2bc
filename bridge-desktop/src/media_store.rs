//! In-memory Media Store Implementation

use bridge_traits::{
    error::{BridgeError, Result},
    media_store::{
        columns, MediaCursor, MediaQuery, MediaStoreCapabilities, MediaStoreContext, MediaValue,
        GENRE_COLUMNS_MIN_SDK,
    },
};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tracing::{debug, warn};

/// Columns every audio row carries, whatever the platform version.
const BASE_SCHEMA: &[&str] = &[
    columns::ID,
    columns::TITLE,
    columns::DISPLAY_NAME,
    columns::ALBUM,
    columns::ARTIST,
    columns::ALBUM_ID,
    columns::ARTIST_ID,
    columns::DURATION,
    columns::IS_MUSIC,
    columns::DATE_MODIFIED,
];

/// Columns added once the platform supports genre metadata.
const GENRE_SCHEMA: &[&str] = &[columns::GENRE, columns::GENRE_ID];

/// A single audio row keyed by column name.
///
/// Columns that are not set read as null.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct MediaRecord {
    values: BTreeMap<String, MediaValue>,
}

impl MediaRecord {
    pub fn new(id: i64) -> Self {
        let mut values = BTreeMap::new();
        values.insert(columns::ID.to_string(), MediaValue::Integer(id));
        Self { values }
    }

    /// Set a column value
    pub fn with(mut self, column: impl Into<String>, value: impl Into<MediaValue>) -> Self {
        self.values.insert(column.into(), value.into());
        self
    }

    /// Convenience builder for a music row with title and duration set
    pub fn music(id: i64, title: &str, duration_ms: i64) -> Self {
        Self::new(id)
            .with(columns::TITLE, title)
            .with(columns::DURATION, duration_ms)
            .with(columns::IS_MUSIC, 1i64)
    }

    pub fn id(&self) -> i64 {
        self.values
            .get(columns::ID)
            .and_then(|v| v.to_long(columns::ID).ok())
            .unwrap_or(0)
    }

    pub fn get(&self, column: &str) -> MediaValue {
        self.values.get(column).cloned().unwrap_or(MediaValue::Null)
    }
}

/// How `query_audio` answers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryBehavior {
    /// Return a cursor over the stored rows
    Rows,
    /// Return no cursor at all
    NullCursor,
    /// Fail with the given message
    Fail(String),
}

#[derive(Debug, Deserialize)]
struct Snapshot {
    #[serde(default)]
    sdk: Option<u32>,
    #[serde(default)]
    rows: Vec<MediaRecord>,
}

/// Desktop media store backed by an in-memory table
///
/// Mirrors the behaviour of the Android audio collection closely enough for
/// development and tests:
/// - Result sets only contain requested columns the schema knows about
/// - Rows come back in ascending `_id` order
/// - Rescan requests are recorded rather than executed
pub struct InMemoryMediaStore {
    schema: Vec<String>,
    capabilities: MediaStoreCapabilities,
    records: Vec<MediaRecord>,
    behavior: QueryBehavior,
    rescans: Mutex<Vec<Vec<String>>>,
    queries: Mutex<Vec<MediaQuery>>,
    closed_cursors: Arc<AtomicUsize>,
}

impl InMemoryMediaStore {
    /// Create a store emulating the given platform API level
    pub fn new(sdk_int: u32) -> Self {
        let capabilities = MediaStoreCapabilities::for_sdk(sdk_int);
        let mut schema: Vec<String> = BASE_SCHEMA.iter().map(|c| c.to_string()).collect();
        if capabilities.genre_columns {
            schema.extend(GENRE_SCHEMA.iter().map(|c| c.to_string()));
        }

        Self {
            schema,
            capabilities,
            records: Vec::new(),
            behavior: QueryBehavior::Rows,
            rescans: Mutex::new(Vec::new()),
            queries: Mutex::new(Vec::new()),
            closed_cursors: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Load a store from a JSON snapshot
    ///
    /// ```json
    /// { "sdk": 33, "rows": [ { "_id": 1, "title": "Intro", "is_music": 1 } ] }
    /// ```
    ///
    /// A snapshot without `sdk` is treated as coming from a platform with
    /// genre support.
    pub fn from_json(json: &str) -> Result<Self> {
        let snapshot: Snapshot = serde_json::from_str(json)?;
        let sdk = snapshot.sdk.unwrap_or(GENRE_COLUMNS_MIN_SDK);
        debug!(sdk, rows = snapshot.rows.len(), "Loaded media snapshot");
        Ok(Self::new(sdk).with_records(snapshot.rows))
    }

    /// Load a store from a JSON snapshot on disk
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&json)
    }

    pub fn with_records(mut self, records: impl IntoIterator<Item = MediaRecord>) -> Self {
        self.records.extend(records);
        self
    }

    pub fn with_record(mut self, record: MediaRecord) -> Self {
        self.records.push(record);
        self
    }

    pub fn with_behavior(mut self, behavior: QueryBehavior) -> Self {
        self.behavior = behavior;
        self
    }

    /// Rescan requests received so far
    pub fn rescan_requests(&self) -> Vec<Vec<String>> {
        self.rescans.lock().map(|r| r.clone()).unwrap_or_default()
    }

    /// Queries received so far
    pub fn queries(&self) -> Vec<MediaQuery> {
        self.queries.lock().map(|q| q.clone()).unwrap_or_default()
    }

    /// Number of cursors handed out by this store that have been closed
    pub fn closed_cursors(&self) -> usize {
        self.closed_cursors.load(Ordering::SeqCst)
    }

    fn build_cursor(&self, query: &MediaQuery) -> MemoryCursor {
        let result_columns: Vec<String> = query
            .projection
            .iter()
            .filter(|column| self.schema.contains(*column))
            .cloned()
            .collect();

        let mut records: Vec<&MediaRecord> = self.records.iter().collect();
        records.sort_by_key(|record| record.id());

        let rows = records
            .into_iter()
            .map(|record| result_columns.iter().map(|c| record.get(c)).collect())
            .collect();

        MemoryCursor::new(result_columns, rows).with_close_counter(self.closed_cursors.clone())
    }
}

impl MediaStoreContext for InMemoryMediaStore {
    fn capabilities(&self) -> MediaStoreCapabilities {
        self.capabilities
    }

    fn request_rescan(&self, roots: &[String]) -> Result<()> {
        debug!(?roots, "Recording rescan request");
        self.rescans
            .lock()
            .map_err(|_| BridgeError::OperationFailed("rescan log poisoned".to_string()))?
            .push(roots.to_vec());
        Ok(())
    }

    fn query_audio(&self, query: &MediaQuery) -> Result<Option<Box<dyn MediaCursor>>> {
        if let Ok(mut queries) = self.queries.lock() {
            queries.push(query.clone());
        }

        match &self.behavior {
            QueryBehavior::Rows => Ok(Some(Box::new(self.build_cursor(query)))),
            QueryBehavior::NullCursor => Ok(None),
            QueryBehavior::Fail(message) => {
                warn!(%message, "Simulated query failure");
                Err(BridgeError::OperationFailed(message.clone()))
            }
        }
    }
}

/// Cursor over rows held in memory
pub struct MemoryCursor {
    columns: Vec<String>,
    rows: Vec<Vec<MediaValue>>,
    position: Option<usize>,
    closed: bool,
    close_counter: Option<Arc<AtomicUsize>>,
}

impl MemoryCursor {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<MediaValue>>) -> Self {
        Self {
            columns,
            rows,
            position: None,
            closed: false,
            close_counter: None,
        }
    }

    /// Count closes of this cursor in `counter`
    pub fn with_close_counter(mut self, counter: Arc<AtomicUsize>) -> Self {
        self.close_counter = Some(counter);
        self
    }
}

impl MediaCursor for MemoryCursor {
    fn columns(&self) -> Vec<String> {
        self.columns.clone()
    }

    fn move_to_next(&mut self) -> Result<bool> {
        if self.closed {
            return Err(BridgeError::CursorClosed);
        }

        let next = self.position.map_or(0, |p| p + 1).min(self.rows.len());
        self.position = Some(next);
        Ok(next < self.rows.len())
    }

    fn value(&self, column: usize) -> Result<MediaValue> {
        if self.closed {
            return Err(BridgeError::CursorClosed);
        }

        let row = self
            .position
            .and_then(|p| self.rows.get(p))
            .ok_or(BridgeError::NoCurrentRow)?;

        row.get(column)
            .cloned()
            .ok_or(BridgeError::ColumnOutOfRange(column))
    }

    fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        if let Some(counter) = &self.close_counter {
            counter.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn is_closed(&self) -> bool {
        self.closed
    }
}
