//! Song resolution and chord retrieval on top of a [`CompletionService`].
//!
//! [`CompletionService`]: crate::gemini::CompletionService

mod chords;
mod prompts;
mod resolve;

pub use chords::{fetch_chords, parse_chords_response, NOT_FOUND_SENTINEL};
pub use prompts::{
    chords_prompt, chords_schema, find_song_prompt, find_song_schema, MAX_SUGGESTIONS,
    MIN_SUGGESTIONS,
};
pub use resolve::{parse_find_song_response, resolve_song, Resolution};

#[cfg(test)]
pub(crate) mod testing {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use crate::error::{CompletionError, CompletionResult};
    use crate::gemini::{CompletionRequest, CompletionService};

    /// Replays canned responses in order and records every request.
    pub(crate) struct ScriptedService {
        responses: Mutex<VecDeque<CompletionResult<String>>>,
        requests: Mutex<Vec<CompletionRequest>>,
    }

    impl ScriptedService {
        pub(crate) fn new(responses: Vec<CompletionResult<String>>) -> Self {
            Self {
                responses: Mutex::new(responses.into()),
                requests: Mutex::new(Vec::new()),
            }
        }

        pub(crate) fn failing() -> Self {
            Self::new(vec![Err(CompletionError::ConnectionRefused(
                "http://stub".to_string(),
            ))])
        }

        pub(crate) fn requests(&self) -> Vec<CompletionRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl CompletionService for ScriptedService {
        async fn generate_json(&self, request: &CompletionRequest) -> CompletionResult<String> {
            self.requests.lock().unwrap().push(request.clone());
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Err(CompletionError::EmptyResponse))
        }
    }
}
