use serde::Deserialize;
use serde_json::Value;
use tracing::{error, info, warn};

use crate::error::LookupError;
use crate::gemini::{CompletionRequest, CompletionService};
use crate::models::{LyricLine, SongData, SongSuggestion};

use super::prompts::{chords_prompt, chords_schema};

/// Reserved response meaning "this song could not be analyzed".
pub const NOT_FOUND_SENTINEL: &str = "{}";

#[derive(Debug, Deserialize)]
struct ChordsResponse {
    #[serde(rename = "songTitle", default)]
    song_title: Option<String>,
    #[serde(default)]
    artist: Option<String>,
    #[serde(default)]
    lines: Option<Vec<RawLine>>,
}

#[derive(Debug, Deserialize)]
struct RawLine {
    #[serde(default)]
    chords: Option<String>,
    #[serde(default)]
    lyrics: Option<String>,
}

impl From<RawLine> for LyricLine {
    fn from(raw: RawLine) -> Self {
        LyricLine::new(raw.chords.unwrap_or_default(), raw.lyrics.unwrap_or_default())
    }
}

/// Interpret the retrieval response text.
///
/// The sentinel `{}` is checked on the trimmed text before any JSON parsing
/// and yields `Ok(None)`. Text that is not JSON is
/// [`LookupError::InvalidResponseFormat`]; JSON lacking a non-empty
/// `songTitle`, a non-empty `artist` or a `lines` array is
/// [`LookupError::IncompleteData`].
pub fn parse_chords_response(text: &str) -> Result<Option<SongData>, LookupError> {
    let trimmed = text.trim();
    if trimmed == NOT_FOUND_SENTINEL {
        return Ok(None);
    }

    let value: Value = serde_json::from_str(trimmed).map_err(|e| {
        error!(error = %e, "Chord response was not valid JSON");
        LookupError::InvalidResponseFormat
    })?;

    let parsed: ChordsResponse = serde_json::from_value(value).map_err(|e| {
        warn!(error = %e, "Chord response had an unexpected shape");
        LookupError::IncompleteData
    })?;

    match (parsed.song_title, parsed.artist, parsed.lines) {
        (Some(song_title), Some(artist), Some(lines))
            if !song_title.is_empty() && !artist.is_empty() =>
        {
            Ok(Some(SongData {
                song_title,
                artist,
                lines: lines.into_iter().map(LyricLine::from).collect(),
            }))
        }
        _ => {
            warn!("Chord response is missing songTitle, artist or lines");
            Err(LookupError::IncompleteData)
        }
    }
}

/// Request the chord/lyric transcript for `song`. `Ok(None)` is the clean
/// not-found answer.
pub async fn fetch_chords(
    service: &dyn CompletionService,
    song: &SongSuggestion,
) -> Result<Option<SongData>, LookupError> {
    let request = CompletionRequest::new(chords_prompt(song), chords_schema());

    let text = service.generate_json(&request).await.map_err(|e| {
        error!(error = %e, song = %song, "Chord request failed");
        LookupError::ChordsUnavailable
    })?;

    let data = parse_chords_response(&text)?;
    match &data {
        Some(data) => info!(song = %song, lines = data.lines.len(), "Chords retrieved"),
        None => info!(song = %song, "Song could not be analyzed"),
    }
    Ok(data)
}
