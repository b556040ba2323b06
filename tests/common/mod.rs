//! Shared helpers for integration tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use chord_finder::error::CompletionResult;
use chord_finder::{CompletionError, CompletionRequest, CompletionService};

/// Completion service that replays canned responses and records prompts.
pub struct StubCompletionService {
    responses: Mutex<VecDeque<CompletionResult<String>>>,
    requests: Mutex<Vec<CompletionRequest>>,
}

#[allow(dead_code)]
impl StubCompletionService {
    pub fn new<I, S>(responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            responses: Mutex::new(responses.into_iter().map(|r| Ok(r.into())).collect()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn with_failure() -> Self {
        Self {
            responses: Mutex::new(VecDeque::from([Err(CompletionError::Timeout(30))])),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl CompletionService for StubCompletionService {
    async fn generate_json(&self, request: &CompletionRequest) -> CompletionResult<String> {
        self.requests.lock().unwrap().push(request.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(CompletionError::EmptyResponse))
    }
}

pub const WONDERWALL_RESOLVED: &str =
    r#"{"resolvedSong": {"songTitle": "Wonderwall", "artist": "Oasis"}}"#;

pub const WONDERWALL_CHORDS: &str = r#"{
    "songTitle": "Wonderwall",
    "artist": "Oasis",
    "lines": [
        {"chords": "Em7              G", "lyrics": "Today is gonna be the day"},
        {"chords": "", "lyrics": "That they're gonna throw it back to you"},
        {"chords": "Cadd9  Dsus4  A7sus4", "lyrics": "[Guitar Solo]"}
    ]
}"#;

pub const YESTERDAY_SUGGESTIONS: &str = r#"{"suggestions": [
    {"songTitle": "Yesterday", "artist": "The Beatles"},
    {"songTitle": "Yesterday", "artist": "Leona Lewis"},
    {"songTitle": "Yesterday Once More", "artist": "Carpenters"}
]}"#;
