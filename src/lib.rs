//! Core library surface for the Chord Finder TUI.
//!
//! A free-text query is resolved to a song by a generative completion
//! service, disambiguated when needed, and the chords/lyrics the service
//! produces are shown verbatim in a monospace sheet. The binary wires these
//! pieces together; tests drive them with stub services.
pub mod config;
pub mod error;
pub mod gemini;
pub mod logging;
pub mod lookup;
pub mod models;
pub mod pipeline;
pub mod ui;

pub use config::{AppConfig, GeminiConfig};
pub use error::{CompletionError, ConfigError, LookupError, LookupPhase};
pub use gemini::{CompletionRequest, CompletionService, GeminiClient};
pub use lookup::{fetch_chords, resolve_song, Resolution};
pub use models::{LyricLine, SongData, SongSuggestion};
pub use pipeline::{Command, Pipeline, PipelineState, Ticket};

/// The interactive application entry point and state container.
pub use ui::{run_app, App};
