use serde::Deserialize;
use tracing::{debug, error, info};

use crate::error::LookupError;
use crate::gemini::{CompletionRequest, CompletionService};
use crate::models::SongSuggestion;

use super::prompts::{find_song_prompt, find_song_schema, MAX_SUGGESTIONS};

/// Outcome of song resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// One confident match; retrieval can start immediately.
    Resolved(SongSuggestion),
    /// Ranked candidates, between 1 and [`MAX_SUGGESTIONS`] entries.
    Suggestions(Vec<SongSuggestion>),
    NotFound,
}

#[derive(Debug, Deserialize)]
struct FindSongResponse {
    #[serde(rename = "resolvedSong", default)]
    resolved_song: Option<SongReference>,
    #[serde(default)]
    suggestions: Option<Vec<SongReference>>,
    #[serde(rename = "notFound", default)]
    not_found: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct SongReference {
    #[serde(rename = "songTitle", default)]
    song_title: Option<String>,
    #[serde(default)]
    artist: Option<String>,
}

impl SongReference {
    fn into_suggestion(self) -> Option<SongSuggestion> {
        let title = self.song_title.filter(|t| !t.trim().is_empty())?;
        let artist = self.artist.filter(|a| !a.trim().is_empty())?;
        Some(SongSuggestion::new(title, artist))
    }
}

/// Interpret the resolution response text. Precedence is `resolvedSong`,
/// then a non-empty `suggestions` list, then not-found; the `notFound` flag
/// itself is never needed to reach the last case.
pub fn parse_find_song_response(text: &str) -> Result<Resolution, LookupError> {
    let parsed: FindSongResponse = serde_json::from_str(text.trim()).map_err(|e| {
        error!(error = %e, "Resolution response was not the expected JSON");
        LookupError::SearchFailed
    })?;

    if let Some(song) = parsed.resolved_song.and_then(SongReference::into_suggestion) {
        return Ok(Resolution::Resolved(song));
    }

    let suggestions: Vec<SongSuggestion> = parsed
        .suggestions
        .unwrap_or_default()
        .into_iter()
        .filter_map(SongReference::into_suggestion)
        .take(MAX_SUGGESTIONS)
        .collect();
    if !suggestions.is_empty() {
        return Ok(Resolution::Suggestions(suggestions));
    }

    if parsed.not_found != Some(true) {
        debug!("Resolution response populated no usable field");
    }
    Ok(Resolution::NotFound)
}

/// Ask the completion service which song `query` refers to. The query is
/// forwarded unchanged, including when it is empty.
pub async fn resolve_song(
    service: &dyn CompletionService,
    query: &str,
) -> Result<Resolution, LookupError> {
    let request = CompletionRequest::new(find_song_prompt(query), find_song_schema());

    let text = service.generate_json(&request).await.map_err(|e| {
        error!(error = %e, query, "Song search request failed");
        LookupError::SearchFailed
    })?;

    let resolution = parse_find_song_response(&text)?;
    match &resolution {
        Resolution::Resolved(song) => info!(song = %song, "Resolved song"),
        Resolution::Suggestions(list) => info!(count = list.len(), "Query is ambiguous"),
        Resolution::NotFound => info!(query, "No song matched query"),
    }
    Ok(resolution)
}
