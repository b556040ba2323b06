//! Pipeline controller: the single state variable behind the UI.
//!
//! The controller performs no I/O. Callers start a lookup, run the returned
//! request on whatever executor they like, and feed the outcome back together
//! with the [`Ticket`] they were given. Only the outcome carrying the latest
//! ticket is applied; anything older is dropped, so a slow response can never
//! overwrite the result of a newer search.

use std::mem;

use tracing::{debug, warn};

use crate::error::LookupError;
use crate::lookup::Resolution;
use crate::models::{SongData, SongSuggestion};

/// Generation number attached to every outstanding request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

impl Ticket {
    pub fn value(&self) -> u64 {
        self.0
    }
}

/// Which view is active. Exactly one at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineState {
    /// Nothing searched yet.
    Idle,
    /// Resolution in flight for `query`.
    Searching { query: String },
    /// The query was ambiguous; the user picks one of these.
    AwaitingSelection {
        query: String,
        suggestions: Vec<SongSuggestion>,
    },
    /// Retrieval in flight. `suggestions` is kept when the song was picked
    /// from a list so the list stays on screen while loading.
    FetchingChords {
        song: SongSuggestion,
        suggestions: Option<Vec<SongSuggestion>>,
    },
    Displaying(SongData),
    /// Clean not-found answer for the query or song named here.
    NoResults { subject: String },
    Error(LookupError),
}

/// Follow-up work the caller must perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    FetchChords { ticket: Ticket, song: SongSuggestion },
}

#[derive(Debug)]
pub struct Pipeline {
    state: PipelineState,
    generation: u64,
    loading: bool,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl Pipeline {
    pub fn new() -> Self {
        Self {
            state: PipelineState::Idle,
            generation: 0,
            loading: false,
        }
    }

    pub fn state(&self) -> &PipelineState {
        &self.state
    }

    /// True while a resolution or retrieval call is outstanding.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// The ticket an incoming outcome must carry to be applied.
    pub fn current_ticket(&self) -> Ticket {
        Ticket(self.generation)
    }

    fn next_ticket(&mut self) -> Ticket {
        self.generation += 1;
        Ticket(self.generation)
    }

    fn is_current(&self, ticket: Ticket) -> bool {
        ticket.0 == self.generation
    }

    /// Start a new search from any state, discarding whatever was shown. The
    /// query is kept verbatim; empty queries are allowed.
    pub fn submit_query(&mut self, query: impl Into<String>) -> Ticket {
        let query = query.into();
        let ticket = self.next_ticket();
        debug!(ticket = ticket.0, query = %query, "Search submitted");
        self.state = PipelineState::Searching { query };
        self.loading = true;
        ticket
    }

    /// Apply the outcome of song resolution. A confident match moves straight
    /// to retrieval and returns the command to run it.
    pub fn apply_resolution(
        &mut self,
        ticket: Ticket,
        outcome: Result<Resolution, LookupError>,
    ) -> Option<Command> {
        let query = match &self.state {
            PipelineState::Searching { query } if self.is_current(ticket) => query.clone(),
            _ => {
                warn!(ticket = ticket.0, latest = self.generation, "Dropping stale resolution");
                return None;
            }
        };

        match outcome {
            Ok(Resolution::Resolved(song)) => {
                let ticket = self.next_ticket();
                self.state = PipelineState::FetchingChords {
                    song: song.clone(),
                    suggestions: None,
                };
                Some(Command::FetchChords { ticket, song })
            }
            Ok(Resolution::Suggestions(suggestions)) if !suggestions.is_empty() => {
                self.state = PipelineState::AwaitingSelection { query, suggestions };
                self.loading = false;
                None
            }
            Ok(_) => {
                self.state = PipelineState::NoResults { subject: query };
                self.loading = false;
                None
            }
            Err(err) => {
                self.state = PipelineState::Error(err);
                self.loading = false;
                None
            }
        }
    }

    /// Pick the suggestion at `index`. Ignored unless suggestions are on
    /// screen and nothing is loading.
    pub fn select_suggestion(&mut self, index: usize) -> Option<Command> {
        if self.loading {
            return None;
        }
        let song = match &self.state {
            PipelineState::AwaitingSelection { suggestions, .. } => suggestions.get(index)?.clone(),
            _ => return None,
        };

        let previous = mem::replace(&mut self.state, PipelineState::Idle);
        let suggestions = match previous {
            PipelineState::AwaitingSelection { suggestions, .. } => Some(suggestions),
            _ => None,
        };

        let ticket = self.next_ticket();
        debug!(ticket = ticket.0, song = %song, "Suggestion selected");
        self.state = PipelineState::FetchingChords {
            song: song.clone(),
            suggestions,
        };
        self.loading = true;
        Some(Command::FetchChords { ticket, song })
    }

    /// Apply the outcome of chord retrieval. Returns `false` when the
    /// outcome was stale and ignored.
    pub fn apply_chords(
        &mut self,
        ticket: Ticket,
        outcome: Result<Option<SongData>, LookupError>,
    ) -> bool {
        let song = match &self.state {
            PipelineState::FetchingChords { song, .. } if self.is_current(ticket) => song.clone(),
            _ => {
                warn!(ticket = ticket.0, latest = self.generation, "Dropping stale chord result");
                return false;
            }
        };

        self.state = match outcome {
            Ok(Some(data)) => PipelineState::Displaying(data),
            Ok(None) => PipelineState::NoResults {
                subject: song.display_title(),
            },
            Err(err) => PipelineState::Error(err),
        };
        self.loading = false;
        true
    }

    /// Drop back to the empty search view. Outstanding requests become stale.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.state = PipelineState::Idle;
        self.loading = false;
    }
}
