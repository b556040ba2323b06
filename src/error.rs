//! Error types shared by the configuration, completion and lookup layers.

use thiserror::Error;

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Missing required environment variable
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    /// Invalid value for environment variable
    #[error("invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

/// Result type for configuration loading
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors raised by a completion service call. These never reach the user
/// directly; the lookup layer folds them into a [`LookupError`].
#[derive(Error, Debug)]
pub enum CompletionError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Failed to serialize/deserialize the service envelope
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The service answered with a non-success status
    #[error("completion API error (status {status}): {body}")]
    Api { status: u16, body: String },

    /// Connection refused or unreachable host
    #[error("connection refused. Is the completion service reachable at {0}?")]
    ConnectionRefused(String),

    /// Request timeout
    #[error("request timed out after {0} seconds")]
    Timeout(u64),

    /// The prompt was rejected before generation
    #[error("prompt blocked by the completion service: {0}")]
    Blocked(String),

    /// The response carried no candidate text
    #[error("completion response contained no text")]
    EmptyResponse,
}

/// Result type for completion calls
pub type CompletionResult<T> = Result<T, CompletionError>;

/// Which half of the pipeline a failure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupPhase {
    Resolution,
    Retrieval,
}

/// Failures surfaced to the user. A clean "not found" answer is not an error
/// and never appears here.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// Song resolution failed for any reason.
    #[error("song search failed")]
    SearchFailed,

    /// Chord retrieval returned text that is not JSON.
    #[error("chord response was not valid JSON")]
    InvalidResponseFormat,

    /// Chord retrieval JSON lacked songTitle, artist or lines.
    #[error("chord response was missing required fields")]
    IncompleteData,

    /// Chord retrieval call itself failed.
    #[error("chord retrieval failed")]
    ChordsUnavailable,
}

impl LookupError {
    /// Human-readable message shown in the UI. Incomplete chord data is
    /// reported to the user the same way as a failed retrieval call.
    pub fn user_message(&self) -> &'static str {
        match self {
            LookupError::SearchFailed => "Failed to search for the song.",
            LookupError::InvalidResponseFormat => {
                "Failed to parse the response from the AI. The data format was invalid."
            }
            LookupError::IncompleteData | LookupError::ChordsUnavailable => {
                "Could not retrieve chord data. The API might be unavailable or the request failed."
            }
        }
    }

    /// Which lookup step produced the failure.
    pub fn phase(&self) -> LookupPhase {
        match self {
            LookupError::SearchFailed => LookupPhase::Resolution,
            _ => LookupPhase::Retrieval,
        }
    }
}
