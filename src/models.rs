//! Domain models passed between the lookup layer, the pipeline controller and
//! the TUI. They mirror the JSON objects the completion service returns, so
//! the serde attributes keep the camelCase wire names in one place.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Identifies a candidate song without any chord content. Produced by song
/// resolution and used both for the suggestion list and as the key for chord
/// retrieval.
pub struct SongSuggestion {
    #[serde(rename = "songTitle")]
    pub song_title: String,
    pub artist: String,
}

impl SongSuggestion {
    pub fn new(song_title: impl Into<String>, artist: impl Into<String>) -> Self {
        Self {
            song_title: song_title.into(),
            artist: artist.into(),
        }
    }

    /// Compose a `Title - Artist` string that omits the hyphen if the artist
    /// is blank.
    pub fn display_title(&self) -> String {
        if self.artist.trim().is_empty() {
            self.song_title.clone()
        } else {
            format!("{} - {}", self.song_title, self.artist)
        }
    }
}

impl fmt::Display for SongSuggestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_title())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// One displayed row pair. `chords` is meant to sit directly above `lyrics`
/// in a fixed-width font and uses embedded spaces for alignment; it may be
/// empty.
pub struct LyricLine {
    pub chords: String,
    pub lyrics: String,
}

impl LyricLine {
    pub fn new(chords: impl Into<String>, lyrics: impl Into<String>) -> Self {
        Self {
            chords: chords.into(),
            lyrics: lyrics.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Full chord/lyric transcript for display.
pub struct SongData {
    #[serde(rename = "songTitle")]
    pub song_title: String,
    pub artist: String,
    pub lines: Vec<LyricLine>,
}
