//! End-to-end pipeline scenarios driven by a stub completion service.

mod common;

use chord_finder::{
    fetch_chords, resolve_song, Command, LookupError, Pipeline, PipelineState, Resolution,
    SongSuggestion,
};
use common::{StubCompletionService, WONDERWALL_CHORDS, WONDERWALL_RESOLVED, YESTERDAY_SUGGESTIONS};

/// Run a search through the pipeline the way the UI does: resolution first,
/// then retrieval when a command comes back.
async fn run_search(
    pipeline: &mut Pipeline,
    service: &StubCompletionService,
    query: &str,
) -> Option<Command> {
    let ticket = pipeline.submit_query(query);
    let outcome = resolve_song(service, query).await;
    pipeline.apply_resolution(ticket, outcome)
}

async fn run_command(pipeline: &mut Pipeline, service: &StubCompletionService, command: Command) {
    let Command::FetchChords { ticket, song } = command;
    let outcome = fetch_chords(service, &song).await;
    assert!(pipeline.apply_chords(ticket, outcome));
}

#[tokio::test]
async fn scenario_a_confident_match_goes_straight_to_chords() {
    let service = StubCompletionService::new([WONDERWALL_RESOLVED, WONDERWALL_CHORDS]);
    let mut pipeline = Pipeline::new();

    let command = run_search(&mut pipeline, &service, "Wonderwall")
        .await
        .expect("resolved song should trigger retrieval");
    let Command::FetchChords { song, .. } = &command;
    assert_eq!(song, &SongSuggestion::new("Wonderwall", "Oasis"));

    run_command(&mut pipeline, &service, command).await;

    let PipelineState::Displaying(data) = pipeline.state() else {
        panic!("expected chord sheet, got {:?}", pipeline.state());
    };
    assert_eq!(data.song_title, "Wonderwall");
    assert_eq!(data.artist, "Oasis");
    assert!(!data.lines.is_empty());
    assert!(!pipeline.is_loading());
    assert_eq!(service.call_count(), 2);
    assert!(service.requests()[1]
        .prompt
        .contains("\"Wonderwall\" by \"Oasis\""));
}

#[tokio::test]
async fn scenario_b_ambiguous_query_offers_suggestions() {
    let service = StubCompletionService::new([YESTERDAY_SUGGESTIONS, "{}"]);
    let mut pipeline = Pipeline::new();

    assert!(run_search(&mut pipeline, &service, "Yesterday").await.is_none());
    let PipelineState::AwaitingSelection { suggestions, .. } = pipeline.state() else {
        panic!("expected suggestions");
    };
    assert_eq!(suggestions.len(), 3);
    assert!((1..=5).contains(&suggestions.len()));

    let command = pipeline.select_suggestion(1).expect("selection triggers retrieval");
    let Command::FetchChords { song, .. } = &command;
    assert_eq!(song, &SongSuggestion::new("Yesterday", "Leona Lewis"));

    run_command(&mut pipeline, &service, command).await;
    assert_eq!(service.call_count(), 2);
    assert!(service.requests()[1]
        .prompt
        .contains("\"Yesterday\" by \"Leona Lewis\""));
}

#[tokio::test]
async fn scenario_c_unknown_query_is_no_results() {
    let service = StubCompletionService::new([r#"{"notFound": true}"#]);
    let mut pipeline = Pipeline::new();

    assert!(run_search(&mut pipeline, &service, "asdkjasdkj123").await.is_none());
    assert_eq!(
        pipeline.state(),
        &PipelineState::NoResults {
            subject: "asdkjasdkj123".to_string()
        }
    );
    assert!(!pipeline.is_loading());
}

#[tokio::test]
async fn scenario_d_sentinel_is_not_found() {
    let service = StubCompletionService::new([WONDERWALL_RESOLVED, "  {}  "]);
    let mut pipeline = Pipeline::new();

    let command = run_search(&mut pipeline, &service, "Wonderwall").await.unwrap();
    run_command(&mut pipeline, &service, command).await;

    assert!(matches!(pipeline.state(), PipelineState::NoResults { .. }));
}

#[tokio::test]
async fn scenario_e_missing_fields_is_incomplete_data() {
    let service = StubCompletionService::new([WONDERWALL_RESOLVED, r#"{"songTitle":"X"}"#]);
    let mut pipeline = Pipeline::new();

    let command = run_search(&mut pipeline, &service, "Wonderwall").await.unwrap();
    run_command(&mut pipeline, &service, command).await;

    assert_eq!(
        pipeline.state(),
        &PipelineState::Error(LookupError::IncompleteData)
    );
    assert_eq!(
        LookupError::IncompleteData.user_message(),
        "Could not retrieve chord data. The API might be unavailable or the request failed."
    );
}

#[tokio::test]
async fn empty_query_is_sent_and_handled() {
    let service = StubCompletionService::new([r#"{"notFound": true}"#]);
    let mut pipeline = Pipeline::new();

    run_search(&mut pipeline, &service, "").await;

    assert_eq!(service.call_count(), 1);
    assert!(matches!(pipeline.state(), PipelineState::NoResults { .. }));
}

#[tokio::test]
async fn transport_failure_during_search_is_an_error() {
    let service = StubCompletionService::with_failure();
    let mut pipeline = Pipeline::new();

    run_search(&mut pipeline, &service, "Wonderwall").await;

    assert_eq!(pipeline.state(), &PipelineState::Error(LookupError::SearchFailed));
    assert!(!pipeline.is_loading());
}

#[tokio::test]
async fn invalid_chord_json_is_format_error() {
    let service = StubCompletionService::new([WONDERWALL_RESOLVED, "Here are the chords: Em7 G"]);
    let mut pipeline = Pipeline::new();

    let command = run_search(&mut pipeline, &service, "Wonderwall").await.unwrap();
    run_command(&mut pipeline, &service, command).await;

    assert_eq!(
        pipeline.state(),
        &PipelineState::Error(LookupError::InvalidResponseFormat)
    );
}

#[tokio::test]
async fn identical_responses_give_identical_transitions() {
    let mut states = Vec::new();
    for _ in 0..2 {
        let service = StubCompletionService::new([YESTERDAY_SUGGESTIONS]);
        let mut pipeline = Pipeline::new();
        run_search(&mut pipeline, &service, "Yesterday").await;
        states.push(pipeline.state().clone());
    }
    assert_eq!(states[0], states[1]);
}

#[tokio::test]
async fn slow_response_from_earlier_search_is_ignored() {
    let service = StubCompletionService::new([YESTERDAY_SUGGESTIONS, WONDERWALL_RESOLVED]);
    let mut pipeline = Pipeline::new();

    let first = pipeline.submit_query("Yesterday");
    let first_outcome = resolve_song(&service, "Yesterday").await;
    let second = pipeline.submit_query("Wonderwall");
    let second_outcome = resolve_song(&service, "Wonderwall").await;

    assert!(pipeline.apply_resolution(first, first_outcome).is_none());
    assert!(matches!(pipeline.state(), PipelineState::Searching { .. }));

    let command = pipeline.apply_resolution(second, second_outcome);
    assert!(matches!(
        command,
        Some(Command::FetchChords { ref song, .. }) if song.song_title == "Wonderwall"
    ));
}

#[tokio::test]
async fn query_with_artist_resolves_directly() {
    let service = StubCompletionService::new([WONDERWALL_RESOLVED]);
    assert_eq!(
        resolve_song(&service, "wonderwall oasis").await.unwrap(),
        Resolution::Resolved(SongSuggestion::new("Wonderwall", "Oasis"))
    );
}
