//! Media index import
//!
//! [`AudioScanner`] walks the host's audio collection once and turns every
//! music row into a [`Song`]. The scan is best-effort: a null cursor yields no
//! songs, and a row that cannot be read is logged and skipped without
//! affecting the rows around it.

use bridge_traits::media_store::{
    columns, MediaCursor, MediaQuery, MediaStoreCapabilities, MediaStoreContext, ScopedCursor,
};
use core_runtime::config::ScannerConfig;
use serde::Serialize;
use tracing::{debug, error, info, instrument, warn};

use crate::error::{LibraryError, Result};
use crate::models::{Album, Artist, Genre, Song};

/// Columns requested from every platform version
const BASE_PROJECTION: &[&str] = &[
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

/// Counters describing one pass over the media index
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScanSummary {
    /// Rows read from the cursor
    pub rows_seen: usize,
    /// Rows skipped because they are not flagged as music
    pub non_music: usize,
    /// Music rows that could not be converted
    pub failed: usize,
    /// Songs produced
    pub imported: usize,
}

/// Songs produced by a scan together with its counters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanOutcome {
    pub songs: Vec<Song>,
    pub summary: ScanSummary,
}

/// Imports songs from the platform media index.
pub struct AudioScanner {
    config: ScannerConfig,
}

impl Default for AudioScanner {
    fn default() -> Self {
        Self::new(ScannerConfig::default())
    }
}

impl AudioScanner {
    pub fn new(config: ScannerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScannerConfig {
        &self.config
    }

    /// Columns to request, given what the index supports
    pub fn projection(capabilities: MediaStoreCapabilities) -> Vec<String> {
        let mut projection: Vec<String> = BASE_PROJECTION.iter().map(|c| c.to_string()).collect();
        if capabilities.genre_columns {
            projection.push(columns::GENRE.to_string());
            projection.push(columns::GENRE_ID.to_string());
        }
        projection
    }

    /// Read every music row of the index, in cursor order.
    ///
    /// Never fails: rows that cannot be read are logged and left out.
    pub fn scan(&self, context: &dyn MediaStoreContext) -> Vec<Song> {
        self.scan_with_summary(context).songs
    }

    /// Same as [`scan`](AudioScanner::scan), also returning the scan counters.
    #[instrument(name = "read_directory", skip_all)]
    pub fn scan_with_summary(&self, context: &dyn MediaStoreContext) -> ScanOutcome {
        let mut outcome = ScanOutcome::default();

        self.request_rescan(context);

        let query = MediaQuery::audio(Self::projection(context.capabilities()));
        let Some(mut cursor) = Self::open_cursor(context, &query) else {
            info!("No cursor returned by media index, nothing to import");
            return outcome;
        };

        debug!("Got cursor, moving over rows");

        loop {
            match cursor.move_to_next() {
                Ok(true) => {}
                Ok(false) => break,
                Err(e) => {
                    error!(error = %e, "Cursor failed to advance, stopping scan");
                    break;
                }
            }

            outcome.summary.rows_seen += 1;

            match self.read_row(context, &*cursor) {
                Ok(Some(song)) => {
                    debug!(song_id = %song.path, "Added song to list");
                    outcome.songs.push(song);
                    outcome.summary.imported += 1;
                }
                Ok(None) => outcome.summary.non_music += 1,
                Err(e) => {
                    error!(error = %e, "Failed to read media row, skipping");
                    outcome.summary.failed += 1;
                }
            }
        }

        debug!("Closing cursor");
        cursor.close();

        info!(
            rows_seen = outcome.summary.rows_seen,
            non_music = outcome.summary.non_music,
            failed = outcome.summary.failed,
            imported = outcome.summary.imported,
            "Returning song list"
        );

        outcome
    }

    fn request_rescan(&self, context: &dyn MediaStoreContext) {
        if !self.config.rescan_before_query {
            return;
        }

        if let Err(e) = context.request_rescan(&self.config.rescan_roots) {
            debug!(error = %e, "Rescan request failed, querying current index");
        }
    }

    fn open_cursor(context: &dyn MediaStoreContext, query: &MediaQuery) -> Option<ScopedCursor> {
        match context.query_audio(query) {
            Ok(cursor) => cursor.map(ScopedCursor::new),
            Err(e) => {
                warn!(error = %e, "Media index query failed");
                None
            }
        }
    }

    /// Convert the current row. `Ok(None)` means the row is not music.
    fn read_row(
        &self,
        context: &dyn MediaStoreContext,
        cursor: &dyn MediaCursor,
    ) -> Result<Option<Song>> {
        let is_music = cursor.get_long(cursor.column_index_or_err(columns::IS_MUSIC)?)?;
        debug!(is_music, "File is music: {}", is_music);

        if is_music == 0 {
            return Ok(None);
        }

        self.build_song(context, cursor).map(Some)
    }

    fn build_song(&self, context: &dyn MediaStoreContext, cursor: &dyn MediaCursor) -> Result<Song> {
        let id = cursor.get_long(cursor.column_index_or_err(columns::ID)?)?;
        debug!(song_id = id, "Got id");

        // Falls back on the column being absent, not on its value being null
        let title_index = match cursor.column_index(columns::TITLE) {
            Some(index) => index,
            None => cursor.column_index_or_err(columns::DISPLAY_NAME)?,
        };
        let title = cursor
            .get_string(title_index)?
            .ok_or_else(|| LibraryError::MissingValue {
                column: cursor.column_name(title_index),
                row_id: id,
            })?;

        let duration_ms = cursor.get_long(cursor.column_index_or_err(columns::DURATION)?)?;

        Ok(Song {
            title,
            duration: duration_ms / 1000,
            path: id.to_string(),
            artists: resolve_artist(cursor)?,
            album: resolve_album(context, id, cursor)?,
            genres: resolve_genre(cursor)?,
            playback_url: id.to_string(),
            cover_path_high: context.content_uri(id),
            cover_path_low: context.content_uri(id),
            source_type: self.config.source_type.clone(),
        })
    }
}

/// Artist of the current row, `None` when the artist id is zero.
pub fn resolve_artist(cursor: &dyn MediaCursor) -> Result<Option<Vec<Artist>>> {
    let artist_id = cursor.get_long(cursor.column_index_or_err(columns::ARTIST_ID)?)?;
    let artist_name = cursor.get_string(cursor.column_index_or_err(columns::ARTIST)?)?;

    if artist_id != 0 {
        return Ok(Some(vec![Artist::new(artist_name)]));
    }
    Ok(None)
}

/// Album of the current row, `None` when the album id is zero.
///
/// Artwork references are derived from the song id `id`, not the album id.
pub fn resolve_album(
    context: &dyn MediaStoreContext,
    id: i64,
    cursor: &dyn MediaCursor,
) -> Result<Option<Album>> {
    let album_id = cursor.get_long(cursor.column_index_or_err(columns::ALBUM_ID)?)?;
    let album_name = cursor.get_string(cursor.column_index_or_err(columns::ALBUM)?)?;

    if album_id != 0 {
        return Ok(Some(Album {
            name: album_name,
            cover_path_high: Some(context.content_uri(id)),
            cover_path_low: Some(context.content_uri(id)),
        }));
    }
    Ok(None)
}

/// Genre of the current row.
///
/// `None` when the result set has no genre id column or the genre id is zero.
pub fn resolve_genre(cursor: &dyn MediaCursor) -> Result<Option<Vec<Genre>>> {
    let Some(genre_id_index) = cursor.column_index(columns::GENRE_ID) else {
        return Ok(None);
    };

    let genre_id = cursor.get_long(genre_id_index)?;
    let genre_name = cursor.get_string(cursor.column_index_or_err(columns::GENRE)?)?;

    if genre_id != 0 {
        return Ok(Some(vec![Genre::new(genre_name)]));
    }
    Ok(None)
}
