//! Domain models for imported songs
//!
//! These are the records handed back across the plugin boundary. Field names
//! on the wire follow the host application's song schema, hence the serde
//! renames.

use serde::{Deserialize, Serialize};

/// Artist credited on a song
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artist {
    /// Artist name as indexed by the platform
    #[serde(rename = "artist_name")]
    pub name: Option<String>,
    /// Artist artwork reference; the media index provides none
    #[serde(rename = "artist_coverPath")]
    pub cover_path: Option<String>,
}

impl Artist {
    pub fn new(name: Option<String>) -> Self {
        Self {
            name,
            cover_path: None,
        }
    }
}

/// Album a song belongs to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Album {
    /// Album name as indexed by the platform
    #[serde(rename = "album_name")]
    pub name: Option<String>,
    /// High resolution artwork reference
    #[serde(rename = "album_coverPath_high")]
    pub cover_path_high: Option<String>,
    /// Low resolution artwork reference
    #[serde(rename = "album_coverPath_low")]
    pub cover_path_low: Option<String>,
}

/// Genre tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    #[serde(rename = "genre_name")]
    pub name: Option<String>,
}

impl Genre {
    pub fn new(name: Option<String>) -> Self {
        Self { name }
    }
}

/// Song imported from the platform media index
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
    /// Track title
    pub title: String,
    /// Duration in whole seconds
    pub duration: i64,
    /// Opaque media index id; the index exposes no filesystem path
    pub path: String,
    /// Credited artists, `None` when the index has no artist for the row
    #[serde(rename = "artist")]
    pub artists: Option<Vec<Artist>>,
    pub album: Option<Album>,
    #[serde(rename = "genre")]
    pub genres: Option<Vec<Genre>>,
    /// Reference the player resolves to start playback
    #[serde(rename = "playbackUrl")]
    pub playback_url: String,
    #[serde(rename = "song_coverPath_high")]
    pub cover_path_high: String,
    #[serde(rename = "song_coverPath_low")]
    pub cover_path_low: String,
    /// Source tag, e.g. `LOCAL`
    #[serde(rename = "type")]
    pub source_type: String,
}

impl Song {
    /// Validate song data
    ///
    /// Duration is taken as reported by the index and is not range checked.
    pub fn validate(&self) -> Result<(), String> {
        if self.path.is_empty() {
            return Err("Song path cannot be empty".to_string());
        }

        if self.cover_path_high != self.cover_path_low {
            return Err("Song cover references must match".to_string());
        }

        Ok(())
    }

    /// Primary artist name, if any
    pub fn primary_artist(&self) -> Option<&str> {
        self.artists
            .as_ref()
            .and_then(|artists| artists.first())
            .and_then(|artist| artist.name.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_song() -> Song {
        Song {
            title: "Song A".to_string(),
            duration: 185,
            path: "7".to_string(),
            artists: Some(vec![Artist::new(Some("Bob".to_string()))]),
            album: None,
            genres: None,
            playback_url: "7".to_string(),
            cover_path_high: "content://media/external/audio/media/7/albumart".to_string(),
            cover_path_low: "content://media/external/audio/media/7/albumart".to_string(),
            source_type: "LOCAL".to_string(),
        }
    }

    #[test]
    fn test_song_serializes_with_host_field_names() {
        let value = serde_json::to_value(sample_song()).unwrap();

        assert_eq!(
            value,
            json!({
                "title": "Song A",
                "duration": 185,
                "path": "7",
                "artist": [{ "artist_name": "Bob", "artist_coverPath": null }],
                "album": null,
                "genre": null,
                "playbackUrl": "7",
                "song_coverPath_high": "content://media/external/audio/media/7/albumart",
                "song_coverPath_low": "content://media/external/audio/media/7/albumart",
                "type": "LOCAL"
            })
        );
    }

    #[test]
    fn test_album_and_genre_field_names() {
        let album = Album {
            name: Some("Blue".to_string()),
            cover_path_high: Some("hi".to_string()),
            cover_path_low: Some("lo".to_string()),
        };
        let value = serde_json::to_value(&album).unwrap();
        assert_eq!(value["album_name"], "Blue");
        assert_eq!(value["album_coverPath_high"], "hi");
        assert_eq!(value["album_coverPath_low"], "lo");

        let genre = serde_json::to_value(Genre::new(Some("Jazz".to_string()))).unwrap();
        assert_eq!(genre, json!({ "genre_name": "Jazz" }));
    }

    #[test]
    fn test_validate() {
        let song = sample_song();
        assert!(song.validate().is_ok());

        let mut negative = song.clone();
        negative.duration = -1;
        assert!(negative.validate().is_ok());

        let mut unpathed = song.clone();
        unpathed.path = String::new();
        assert!(unpathed.validate().is_err());

        let mut mismatched = song;
        mismatched.cover_path_low = "other".to_string();
        assert!(mismatched.validate().is_err());
    }

    #[test]
    fn test_primary_artist() {
        assert_eq!(sample_song().primary_artist(), Some("Bob"));

        let mut song = sample_song();
        song.artists = None;
        assert_eq!(song.primary_artist(), None);
    }
}
