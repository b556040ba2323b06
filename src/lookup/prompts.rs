//! Prompt text and response schemas for the two completion calls. Schemas use
//! the OpenAPI subset Gemini accepts (upper-case type names).

use serde_json::{json, Value};

use crate::models::SongSuggestion;

/// Lower bound of candidates requested for an ambiguous query.
pub const MIN_SUGGESTIONS: usize = 3;
/// Upper bound of candidates requested (and kept) for an ambiguous query.
pub const MAX_SUGGESTIONS: usize = 5;

/// Instruction for the resolution call.
pub fn find_song_prompt(query: &str) -> String {
    format!(
        r#"You are a music expert. A user is looking for a song using the query: "{query}".
Identify the real, existing song or songs they most likely mean. Never invent a song.

Rules:
- If you are very confident about one song (for example "Stairway to Heaven by Led Zeppelin"), fill in 'resolvedSong'.
- If the query is ambiguous (for example "Yesterday", a title shared or covered many times), list the {MIN_SUGGESTIONS}-{MAX_SUGGESTIONS} most likely candidates in 'suggestions', best match first.
- If no plausible song matches the query, set 'notFound' to true.
- Prefer original artists, but include covers that are very well known.
- Populate exactly one of 'resolvedSong', 'suggestions' or 'notFound'."#
    )
}

fn song_reference_schema(description: Option<&str>) -> Value {
    let mut schema = json!({
        "type": "OBJECT",
        "properties": {
            "songTitle": { "type": "STRING" },
            "artist": { "type": "STRING" }
        }
    });
    if let Some(description) = description {
        schema["description"] = Value::String(description.to_string());
    }
    schema
}

/// Schema for the resolution call: three optional, mutually exclusive fields.
pub fn find_song_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "resolvedSong": song_reference_schema(Some(
                "The single most likely song. Use this ONLY when highly confident."
            )),
            "suggestions": {
                "type": "ARRAY",
                "description": "Possible matches when the query is ambiguous or could refer to several songs.",
                "items": song_reference_schema(None)
            },
            "notFound": {
                "type": "BOOLEAN",
                "description": "True when no relevant song could be found for the query."
            }
        }
    })
}

/// Instruction for the retrieval call.
pub fn chords_prompt(song: &SongSuggestion) -> String {
    let title = &song.song_title;
    let artist = &song.artist;
    format!(
        r#"Analyze the song "{title}" by "{artist}" and provide its guitar chords and original lyrics.

Follow these instructions exactly:
1. Confirm the song title and original artist are "{title}" by "{artist}".
2. Split the song into lines of lyrics.
3. Work out the correct guitar chords for each lyric line.
4. Write each chord name directly above the syllable where the chord change happens.
5. Pad the 'chords' string with spaces so it lines up with the 'lyrics' string in a monospaced font.
6. For instrumental lines (intro, solo, outro), put a bracketed label such as "[Guitar Solo]" in 'lyrics' and still give the chords above it.
7. When a line has no chords, 'chords' must be an empty string. Never omit the field.
8. Output a single JSON object matching the schema, with no text or markdown before or after it.
9. Do NOT invent lyrics or chords. If you cannot analyze this specific song, respond with an empty JSON object: {{}}"#
    )
}

/// Schema for the retrieval call: title, artist and the ordered line pairs.
pub fn chords_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "songTitle": { "type": "STRING", "description": "The title of the song." },
            "artist": { "type": "STRING", "description": "The artist or band who performs the song." },
            "lines": {
                "type": "ARRAY",
                "description": "Each line of the song with its chords and lyrics, in order.",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "chords": {
                            "type": "STRING",
                            "description": "Chords aligned above the lyrics. Empty when the line has no chords."
                        },
                        "lyrics": { "type": "STRING", "description": "The corresponding line of lyrics." }
                    },
                    "required": ["chords", "lyrics"]
                }
            }
        },
        "required": ["songTitle", "artist", "lines"]
    })
}
