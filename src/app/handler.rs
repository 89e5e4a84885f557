//! Event handling and state transition logic.
//!
//! This module implements the core event handler that processes user input,
//! timer ticks and HTTP responses, translating them into state changes and
//! action sequences. It serves as the primary control flow coordinator for the
//! application.
//!
//! # Architecture
//!
//! The handler follows a unidirectional data flow pattern:
//! 1. Events arrive from the plugin runtime
//! 2. [`handle_event`] pattern-matches the event type
//! 3. State mutations occur via `AppState` methods
//! 4. Actions are collected and returned for execution
//!
//! # Flows
//!
//! Two independent flows share the handler but no mutable state:
//!
//! - **Search**: keystroke, debounce timer, commit, movie request, response.
//!   Failures land in `error_message`.
//! - **Trending**: one top-N read at startup, and after every successful
//!   non-empty search with results a lookup followed by a create or an
//!   increment. Every failure on this side is logged and dropped; none of them
//!   can touch the search flow's state.
//!
//! # Example
//!
//! ```rust
//! use marquee::api::MovieClient;
//! use marquee::app::{handle_event, AppState, Event};
//! use marquee::storage::{AppwriteConfig, AppwriteStore};
//! use std::time::Instant;
//!
//! let client = MovieClient::new("https://api.test/3", "https://img.test", Some("key".into()));
//! let store = AppwriteStore::new(AppwriteConfig::default());
//! let mut state = AppState::new(client, Box::new(store), Default::default());
//!
//! let (should_render, actions) = handle_event(&mut state, &Event::Char('d'), Instant::now())?;
//! assert!(should_render);
//! assert_eq!(actions.len(), 1); // arms the debounce timer
//! # Ok::<(), marquee::MarqueeError>(())
//! ```

use crate::api::tmdb;
use crate::api::{HttpResponse, RequestKind};
use crate::app::debounce::Tick;
use crate::app::modes::Focus;
use crate::app::{Action, AppState};
use crate::domain::error::Result;
use crate::domain::Movie;
use crate::storage::rank_trending;
use std::time::Instant;
use tracing_opentelemetry::OpenTelemetrySpanExt;

/// Events triggered by user input, host timers, or HTTP responses.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Host permissions granted: issue the initial popular fetch and the
    /// trending read. Only the first occurrence has an effect.
    Start,

    /// Appends a character to the search input.
    Char(char),
    /// Removes the last character from the search input.
    Backspace,
    /// Clears the search input.
    ClearInput,

    /// A host timer fired.
    Timer,

    /// Moves selection cursor down by one position (wraps to top).
    KeyDown,
    /// Moves selection cursor up by one position (wraps to bottom).
    KeyUp,
    /// Switches focus between the search input and the result grid.
    ToggleFocus,

    /// Closes the plugin pane, dropping any pending edit.
    CloseFocus,
    /// The pane was hidden; drop any pending edit.
    Hidden,
    /// The pane became visible again; an input left uncommitted by
    /// [`Event::Hidden`] is scheduled again.
    Shown,

    /// An HTTP request settled.
    Response(HttpResponse),
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// `now` is the host clock at the time the event is delivered; it drives the
/// debounce window.
///
/// # Returns
///
/// Whether the UI should re-render, and the actions to execute in order.
///
/// # Errors
///
/// Reserved for failures of the plugin itself. Network and store failures are
/// part of the normal flow and never surface here.
pub fn handle_event(state: &mut AppState, event: &Event, now: Instant) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?EventName(event)).entered();

    match event {
        Event::Start => {
            if state.started {
                return Ok((false, vec![]));
            }
            state.started = true;
            tracing::debug!("starting initial fetches");

            let mut actions = vec![];
            let initial = state.debouncer.committed().to_string();
            if let Some(request) = state.begin_fetch(&initial) {
                actions.push(Action::SendRequest(request));
            }

            match state.trending_store().top_request(state.trending_limit()) {
                Ok(request) => actions.push(Action::SendRequest(request)),
                Err(e) => tracing::warn!(error = %e, "cannot build trending request"),
            }

            Ok((true, actions))
        }
        Event::Char(c) => {
            state.focus = Focus::SearchInput;
            state.search_input.push(*c);
            tracing::trace!(query = %state.search_input, char = %c, "search input updated");
            Ok((true, schedule_commit(state, now)))
        }
        Event::Backspace => {
            if state.search_input.pop().is_none() {
                return Ok((false, vec![]));
            }
            Ok((true, schedule_commit(state, now)))
        }
        Event::ClearInput => {
            if state.search_input.is_empty() {
                return Ok((false, vec![]));
            }
            state.search_input.clear();
            Ok((true, schedule_commit(state, now)))
        }
        Event::Timer => match state.debouncer.on_timer(now) {
            Tick::Idle => Ok((false, vec![])),
            Tick::Wait(remaining) => Ok((false, vec![Action::ArmTimer(remaining)])),
            Tick::Commit(term) => {
                if !state.started {
                    tracing::debug!(term = %term, "search term committed before start, fetch deferred");
                    return Ok((true, vec![]));
                }
                tracing::debug!(term = %term, "search term committed");
                let actions = state
                    .begin_fetch(&term)
                    .map(Action::SendRequest)
                    .into_iter()
                    .collect();
                Ok((true, actions))
            }
        },
        Event::KeyDown => {
            state.move_selection_down();
            Ok((true, vec![]))
        }
        Event::KeyUp => {
            state.move_selection_up();
            Ok((true, vec![]))
        }
        Event::ToggleFocus => {
            state.focus = state.focus.toggled();
            Ok((true, vec![]))
        }
        Event::CloseFocus => {
            state.debouncer.cancel();
            Ok((false, vec![Action::CloseFocus]))
        }
        Event::Hidden => {
            state.debouncer.cancel();
            Ok((false, vec![]))
        }
        Event::Shown => {
            if state.search_input == state.debouncer.committed() {
                return Ok((false, vec![]));
            }
            Ok((true, schedule_commit(state, now)))
        }
        Event::Response(response) => Ok(handle_response(state, response)),
    }
}

/// Feeds the current input to the debouncer, arming a timer if none is in flight.
fn schedule_commit(state: &mut AppState, now: Instant) -> Vec<Action> {
    state
        .debouncer
        .input(&state.search_input, now)
        .map(Action::ArmTimer)
        .into_iter()
        .collect()
}

fn handle_response(state: &mut AppState, response: &HttpResponse) -> (bool, Vec<Action>) {
    let span = tracing::debug_span!(
        "handle_response",
        status = response.status,
        kind = response.context.kind.name()
    );
    if let Some(parent) = response.context.parent_context() {
        span.set_parent(parent);
    }
    let _guard = span.entered();

    match &response.context.kind {
        RequestKind::Movies { request_id, query } => {
            handle_movies(state, response, *request_id, query)
        }
        RequestKind::TrendingList => {
            match state.trending_store().parse_entries(response) {
                Ok(mut entries) => {
                    rank_trending(&mut entries, state.trending_limit());
                    tracing::debug!(count = entries.len(), "trending loaded");
                    state.trending = entries;
                }
                Err(e) => {
                    tracing::warn!(error = %e, "trending read failed");
                    state.trending.clear();
                }
            }
            (true, vec![])
        }
        RequestKind::TrendingLookup { query, movie } => {
            (false, continue_recording(state, response, query, movie))
        }
        RequestKind::TrendingCreate { query } => {
            match state.trending_store().parse_entry(response) {
                Ok(entry) => tracing::debug!(term = %query, id = %entry.id, "trending entry created"),
                Err(e) => tracing::warn!(term = %query, error = %e, "trending create failed"),
            }
            (false, vec![])
        }
        RequestKind::TrendingIncrement { query, count } => {
            match state.trending_store().parse_entry(response) {
                Ok(_) => tracing::debug!(term = %query, count, "trending count incremented"),
                Err(e) => tracing::warn!(term = %query, error = %e, "trending increment failed"),
            }
            (false, vec![])
        }
    }
}

fn handle_movies(
    state: &mut AppState,
    response: &HttpResponse,
    request_id: u64,
    query: &str,
) -> (bool, Vec<Action>) {
    if !state.is_current_request(request_id) {
        tracing::debug!(
            request_id,
            latest = state.latest_request_id(),
            "discarding superseded movie response"
        );
        return (false, vec![]);
    }

    match tmdb::parse_movies(response) {
        Ok(movies) => {
            tracing::debug!(query = %query, count = movies.len(), "movies loaded");

            let record = if query.is_empty() {
                None
            } else {
                movies.first().cloned()
            };

            state.complete_fetch(movies);

            let actions = record
                .and_then(|top| record_search(state, query, &top))
                .map(Action::SendRequest)
                .into_iter()
                .collect();
            (true, actions)
        }
        Err(e) => {
            tracing::debug!(query = %query, error = %e, "movie fetch failed");
            state.fail_fetch(&e);
            (true, vec![])
        }
    }
}

/// Starts recording a search: looks up the entry for `query` exactly.
fn record_search(state: &AppState, query: &str, top: &Movie) -> Option<crate::api::HttpRequest> {
    match state.trending_store().lookup_request(query, top) {
        Ok(request) => Some(request),
        Err(e) => {
            tracing::warn!(term = %query, error = %e, "cannot record search");
            None
        }
    }
}

/// Second step of recording: increment the matching entry or create one.
fn continue_recording(
    state: &AppState,
    response: &HttpResponse,
    query: &str,
    movie: &Movie,
) -> Vec<Action> {
    let store = state.trending_store();

    let existing = match store.parse_entries(response) {
        Ok(entries) => entries.into_iter().find(|e| e.matches_term(query)),
        Err(e) => {
            tracing::warn!(term = %query, error = %e, "trending lookup failed");
            return vec![];
        }
    };

    let request = match existing {
        Some(entry) => store.increment_request(query, &entry),
        None => {
            let poster_url = state.movie_client().poster_url(movie);
            store.create_request(query, movie.id, &poster_url)
        }
    };

    match request {
        Ok(request) => vec![Action::SendRequest(request)],
        Err(e) => {
            tracing::warn!(term = %query, error = %e, "cannot write trending entry");
            vec![]
        }
    }
}

/// Span label that names the event without dumping response bodies.
struct EventName<'a>(&'a Event);

impl std::fmt::Debug for EventName<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            Event::Response(response) => write!(f, "Response({})", response.context.kind.name()),
            other => write!(f, "{other:?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{HttpRequest, MovieClient, RequestContext, Verb};
    use crate::domain::error::MarqueeError;
    use crate::domain::TrendingEntry;
    use crate::storage::{AppwriteConfig, AppwriteStore, TrendingStore};
    use crate::ui::Theme;
    use std::time::Duration;

    const D: Duration = Duration::from_millis(800);

    fn client() -> MovieClient {
        MovieClient::new(
            tmdb::DEFAULT_BASE_URL,
            tmdb::DEFAULT_IMAGE_BASE_URL,
            Some("key".to_string()),
        )
    }

    fn appwrite() -> AppwriteStore {
        AppwriteStore::new(AppwriteConfig {
            endpoint: "https://cloud.appwrite.io/v1".to_string(),
            project_id: Some("proj".to_string()),
            database_id: Some("db".to_string()),
            collection_id: Some("metrics".to_string()),
            api_key: None,
        })
    }

    fn state_with(store: Box<dyn TrendingStore>) -> AppState {
        AppState::new(client(), store, Theme::default())
    }

    /// State whose initial fetches have been issued, so committed terms are sent.
    fn state() -> AppState {
        let mut state = state_with(Box::new(appwrite()));
        state.started = true;
        state
    }

    /// Store double whose every operation fails.
    #[derive(Debug)]
    struct FailingStore;

    impl TrendingStore for FailingStore {
        fn top_request(&self, _limit: usize) -> Result<HttpRequest> {
            Err(MarqueeError::Store("offline".to_string()))
        }
        fn lookup_request(&self, _query: &str, _movie: &Movie) -> Result<HttpRequest> {
            Err(MarqueeError::Store("offline".to_string()))
        }
        fn create_request(&self, _query: &str, _movie_id: u64, _poster_url: &str) -> Result<HttpRequest> {
            Err(MarqueeError::Store("offline".to_string()))
        }
        fn increment_request(&self, _query: &str, _existing: &TrendingEntry) -> Result<HttpRequest> {
            Err(MarqueeError::Store("offline".to_string()))
        }
        fn parse_entries(&self, _response: &HttpResponse) -> Result<Vec<TrendingEntry>> {
            Err(MarqueeError::Store("offline".to_string()))
        }
        fn parse_entry(&self, _response: &HttpResponse) -> Result<TrendingEntry> {
            Err(MarqueeError::Store("offline".to_string()))
        }
    }

    fn send(state: &mut AppState, event: Event, now: Instant) -> (bool, Vec<Action>) {
        handle_event(state, &event, now).unwrap()
    }

    fn type_str(state: &mut AppState, text: &str, start: Instant, step: Duration) -> Vec<Action> {
        let mut actions = vec![];
        for (i, c) in text.chars().enumerate() {
            let at = start + step * u32::try_from(i).unwrap();
            actions.extend(send(state, Event::Char(c), at).1);
        }
        actions
    }

    fn requests(actions: &[Action]) -> Vec<&HttpRequest> {
        actions
            .iter()
            .filter_map(|a| match a {
                Action::SendRequest(r) => Some(r),
                _ => None,
            })
            .collect()
    }

    fn reply(request: &HttpRequest, status: u16, body: &str) -> Event {
        Event::Response(HttpResponse {
            status,
            body: body.as_bytes().to_vec(),
            context: request.context.clone(),
        })
    }

    /// Types `term`, lets the debounce settle and returns the movie request.
    fn commit(state: &mut AppState, term: &str, t0: Instant) -> HttpRequest {
        type_str(state, term, t0, Duration::from_millis(10));

        let mut now = t0 + D;
        loop {
            let (_, actions) = send(state, Event::Timer, now);
            match actions.as_slice() {
                [Action::ArmTimer(d)] => now += *d,
                [Action::SendRequest(r)] => return r.clone(),
                other => panic!("unexpected actions {other:?}"),
            }
        }
    }

    const DUNE_RESULTS: &str = r#"{"results":[
        {"id":438631,"title":"Dune","poster_path":"/d5.jpg","vote_average":7.8},
        {"id":693134,"title":"Dune: Part Two","poster_path":null}
    ]}"#;

    #[test]
    fn start_fetches_popular_and_trending_once() {
        let mut state = state_with(Box::new(appwrite()));
        let (render, actions) = send(&mut state, Event::Start, Instant::now());

        assert!(render);
        let reqs = requests(&actions);
        assert_eq!(reqs.len(), 2);
        assert!(reqs[0].url.ends_with("/discover/movie?sort_by=popularity.desc"));
        assert_eq!(reqs[1].context.kind, RequestKind::TrendingList);
        assert!(state.is_loading);

        let (render, actions) = send(&mut state, Event::Start, Instant::now());
        assert!(!render);
        assert!(actions.is_empty());
    }

    #[test]
    fn rapid_typing_fires_one_fetch_with_the_final_term() {
        let mut state = state();
        let t0 = Instant::now();

        let armed = type_str(&mut state, "dune", t0, Duration::from_millis(150));
        assert_eq!(armed, vec![Action::ArmTimer(D)]);
        assert!(!state.is_loading);

        // First fire is early: 800ms after the first key, 350ms after the last.
        let (_, actions) = send(&mut state, Event::Timer, t0 + D);
        assert_eq!(actions, vec![Action::ArmTimer(Duration::from_millis(350))]);

        let (render, actions) = send(&mut state, Event::Timer, t0 + Duration::from_millis(1250));
        assert!(render);
        let reqs = requests(&actions);
        assert_eq!(reqs.len(), 1);
        assert_eq!(reqs[0].url, "https://api.themoviedb.org/3/search/movie?query=dune");
        assert!(state.is_loading);
    }

    #[test]
    fn search_term_is_escaped() {
        let mut state = state();
        let request = commit(&mut state, "the thing", Instant::now());
        assert_eq!(request.url, "https://api.themoviedb.org/3/search/movie?query=the%20thing");
    }

    #[test]
    fn non_success_status_sets_generic_error_and_clears_movies() {
        let mut state = state();
        let request = commit(&mut state, "dune", Instant::now());
        state.movies = vec![Movie::new(1, "stale")];

        let (_, actions) = send(&mut state, reply(&request, 503, "{}"), Instant::now());

        assert!(actions.is_empty());
        assert!(!state.is_loading);
        assert_eq!(state.error_message, "Error Fetching Movies.");
        assert!(state.movies.is_empty());
    }

    #[test]
    fn logical_failure_uses_provider_message() {
        let mut state = state();
        let request = commit(&mut state, "zzzz", Instant::now());

        send(
            &mut state,
            reply(&request, 200, r#"{"response":"False","Error":"Movie not found!"}"#),
            Instant::now(),
        );

        assert!(!state.is_loading);
        assert_eq!(state.error_message, "Movie not found!");
        assert!(state.movies.is_empty());
    }

    #[test]
    fn successful_search_records_exactly_one_lookup() {
        let mut state = state();
        let request = commit(&mut state, "dune", Instant::now());

        let (render, actions) = send(&mut state, reply(&request, 200, DUNE_RESULTS), Instant::now());

        assert!(render);
        assert!(!state.is_loading);
        assert!(state.error_message.is_empty());
        assert_eq!(state.movies.len(), 2);

        let reqs = requests(&actions);
        assert_eq!(reqs.len(), 1);
        assert_eq!(reqs[0].verb, Verb::Get);
        match &reqs[0].context.kind {
            RequestKind::TrendingLookup { query, movie } => {
                assert_eq!(query, "dune");
                assert_eq!(movie.id, 438_631);
            }
            other => panic!("unexpected kind {other:?}"),
        }
    }

    #[test]
    fn search_with_no_results_records_nothing() {
        let mut state = state();
        let request = commit(&mut state, "qwxz", Instant::now());

        let (_, actions) = send(&mut state, reply(&request, 200, r#"{"results":[]}"#), Instant::now());

        assert!(actions.is_empty());
        assert!(state.movies.is_empty());
        assert!(state.error_message.is_empty());
    }

    #[test]
    fn popular_listing_records_nothing() {
        let mut state = state_with(Box::new(appwrite()));
        let (_, actions) = send(&mut state, Event::Start, Instant::now());
        let popular = requests(&actions)[0].clone();

        let (_, actions) = send(&mut state, reply(&popular, 200, DUNE_RESULTS), Instant::now());
        assert!(actions.is_empty());
        assert_eq!(state.movies.len(), 2);
    }

    #[test]
    fn lookup_miss_creates_entry_with_poster_url() {
        let mut state = state();
        let lookup = appwrite().lookup_request("dune", &{
            let mut m = Movie::new(438_631, "Dune");
            m.poster_path = Some("/d5.jpg".to_string());
            m
        });

        let (render, actions) = send(
            &mut state,
            reply(&lookup.unwrap(), 200, r#"{"total":0,"documents":[]}"#),
            Instant::now(),
        );

        assert!(!render);
        let reqs = requests(&actions);
        assert_eq!(reqs[0].verb, Verb::Post);
        let body: serde_json::Value = serde_json::from_slice(&reqs[0].body).unwrap();
        assert_eq!(body["data"]["searchTerm"], "dune");
        assert_eq!(body["data"]["count"], 1);
        assert_eq!(body["data"]["movie_id"], 438_631);
        assert_eq!(body["data"]["poster_url"], "https://image.tmdb.org/t/p/w500/d5.jpg");
    }

    #[test]
    fn lookup_hit_increments_exact_match_only() {
        let mut state = state();
        let lookup = appwrite().lookup_request("dune", &Movie::new(1, "Dune")).unwrap();

        let (_, actions) = send(
            &mut state,
            reply(
                &lookup,
                200,
                r#"{"total":2,"documents":[
                    {"$id":"upper","searchTerm":"Dune","count":9,"movie_id":1,"poster_url":""},
                    {"$id":"exact","searchTerm":"dune","count":3,"movie_id":1,"poster_url":""}
                ]}"#,
            ),
            Instant::now(),
        );

        let reqs = requests(&actions);
        assert_eq!(reqs[0].verb, Verb::Put);
        assert!(reqs[0].url.ends_with("/documents/exact"));
        assert_eq!(
            reqs[0].context.kind,
            RequestKind::TrendingIncrement { query: "dune".to_string(), count: 4 }
        );
    }

    #[test]
    fn failing_store_never_touches_search_state() {
        let mut state = state_with(Box::new(FailingStore));

        let (_, actions) = send(&mut state, Event::Start, Instant::now());
        assert_eq!(requests(&actions).len(), 1, "only the movie request goes out");

        let request = commit(&mut state, "dune", Instant::now());
        let (render, actions) = send(&mut state, reply(&request, 200, DUNE_RESULTS), Instant::now());

        assert!(render);
        assert!(actions.is_empty());
        assert!(state.error_message.is_empty());
        assert_eq!(state.movies.len(), 2);
        assert!(!state.is_loading);

        // Responses to store requests also fail to parse; still isolated.
        let context = RequestContext::trending_lookup("dune".to_string(), Movie::new(1, "Dune"));
        let stray = Event::Response(HttpResponse { status: 500, body: vec![], context });
        let (_, actions) = send(&mut state, stray, Instant::now());
        assert!(actions.is_empty());
        assert!(state.error_message.is_empty());
        assert_eq!(state.movies.len(), 2);
    }

    #[test]
    fn trending_read_is_ranked_and_capped() {
        let mut state = state();
        let request = appwrite().top_request(5).unwrap();
        let docs: Vec<String> = (1..=7)
            .map(|n| format!(r#"{{"$id":"d{n}","searchTerm":"t{n}","count":{n},"movie_id":{n},"poster_url":""}}"#))
            .collect();
        let body = format!(r#"{{"total":7,"documents":[{}]}}"#, docs.join(","));

        let (render, _) = send(&mut state, reply(&request, 200, &body), Instant::now());

        assert!(render);
        let counts: Vec<u64> = state.trending.iter().map(|e| e.count).collect();
        assert_eq!(counts, vec![7, 6, 5, 4, 3]);
    }

    #[test]
    fn trending_failure_leaves_an_empty_strip() {
        let mut state = state();
        let request = appwrite().top_request(5).unwrap();

        send(&mut state, reply(&request, 401, r#"{"message":"unauthorized"}"#), Instant::now());

        assert!(state.trending.is_empty());
        assert!(state.error_message.is_empty());
        assert!(state.compute_viewmodel(24, 80).trending.is_none());
    }

    #[test]
    fn superseded_response_is_discarded() {
        let mut state = state();
        let t0 = Instant::now();
        let old = commit(&mut state, "alien", t0);

        send(&mut state, Event::ClearInput, t0 + Duration::from_secs(5));
        let new = commit(&mut state, "dune", t0 + Duration::from_secs(6));

        let (render, _) = send(&mut state, reply(&old, 200, DUNE_RESULTS), Instant::now());
        assert!(!render);
        assert!(state.is_loading, "the latest request is still in flight");
        assert!(state.movies.is_empty());

        send(&mut state, reply(&new, 200, r#"{"results":[{"id":1,"title":"Dune"}]}"#), Instant::now());
        assert!(!state.is_loading);
        assert_eq!(state.movies.len(), 1);
    }

    #[test]
    fn loading_is_false_once_settled_on_every_path() {
        for (status, body) in [
            (200, DUNE_RESULTS),
            (200, r#"{"success":false}"#),
            (500, ""),
            (200, "garbage"),
        ] {
            let mut state = state();
            let request = commit(&mut state, "dune", Instant::now());
            assert!(state.is_loading);

            send(&mut state, reply(&request, status, body), Instant::now());
            assert!(!state.is_loading, "status {status} body {body}");
        }
    }

    #[test]
    fn missing_api_key_shows_error_without_loading() {
        let mut state = AppState::new(
            MovieClient::new(tmdb::DEFAULT_BASE_URL, tmdb::DEFAULT_IMAGE_BASE_URL, None),
            Box::new(appwrite()),
            Theme::default(),
        );

        let (render, actions) = send(&mut state, Event::Start, Instant::now());

        assert!(render);
        assert_eq!(requests(&actions).len(), 1, "trending still loads");
        assert!(!state.is_loading);
        assert_eq!(state.error_message, "Error Fetching Movies.");
    }

    #[test]
    fn close_and_hide_cancel_the_pending_commit() {
        let mut state = state();
        let t0 = Instant::now();

        type_str(&mut state, "dune", t0, Duration::from_millis(10));
        let (_, actions) = send(&mut state, Event::CloseFocus, t0 + Duration::from_millis(50));
        assert_eq!(actions, vec![Action::CloseFocus]);

        let (render, actions) = send(&mut state, Event::Timer, t0 + D);
        assert!(!render);
        assert!(actions.is_empty());

        type_str(&mut state, "x", t0 + Duration::from_secs(2), Duration::ZERO);
        send(&mut state, Event::Hidden, t0 + Duration::from_secs(2));
        let (_, actions) = send(&mut state, Event::Timer, t0 + Duration::from_secs(3));
        assert!(actions.is_empty());
    }

    #[test]
    fn showing_the_pane_again_commits_the_typed_term() {
        let mut state = state();
        let t0 = Instant::now();

        type_str(&mut state, "dune", t0, Duration::from_millis(10));
        send(&mut state, Event::Hidden, t0 + Duration::from_millis(50));
        let (_, actions) = send(&mut state, Event::Timer, t0 + D);
        assert!(actions.is_empty());
        assert_eq!(state.debouncer.committed(), "");

        let shown_at = t0 + Duration::from_secs(10);
        let (render, actions) = send(&mut state, Event::Shown, shown_at);
        assert!(render);
        assert_eq!(actions, vec![Action::ArmTimer(D)]);

        let (_, actions) = send(&mut state, Event::Timer, shown_at + D);
        let reqs = requests(&actions);
        assert_eq!(reqs.len(), 1);
        assert!(reqs[0].url.ends_with("/search/movie?query=dune"));
        assert_eq!(state.debouncer.committed(), state.search_input);
    }

    #[test]
    fn showing_a_settled_pane_does_nothing() {
        let mut state = state();
        let (render, actions) = send(&mut state, Event::Shown, Instant::now());
        assert!(!render);
        assert!(actions.is_empty());
    }

    #[test]
    fn terms_committed_before_start_wait_for_it() {
        let mut state = state_with(Box::new(appwrite()));
        let t0 = Instant::now();

        type_str(&mut state, "dune", t0, Duration::ZERO);
        let (render, actions) = send(&mut state, Event::Timer, t0 + D);
        assert!(render);
        assert!(actions.is_empty(), "no request without web access");
        assert!(!state.is_loading);
        assert_eq!(state.debouncer.committed(), "dune");

        let (_, actions) = send(&mut state, Event::Start, t0 + D);
        let reqs = requests(&actions);
        assert_eq!(reqs[0].url, "https://api.themoviedb.org/3/search/movie?query=dune");
    }

    #[test]
    fn empty_trending_list_hides_the_strip() {
        let mut state = state();
        let request = appwrite().top_request(5).unwrap();

        let (render, actions) = send(
            &mut state,
            reply(&request, 200, r#"{"total":0,"documents":[]}"#),
            Instant::now(),
        );

        assert!(render);
        assert!(actions.is_empty());
        assert!(state.trending.is_empty());
        assert!(state.error_message.is_empty());
        assert!(state.compute_viewmodel(24, 80).trending.is_none());
    }

    #[test]
    fn backspace_and_clear_are_edits() {
        let mut state = state();
        let t0 = Instant::now();

        let (render, _) = send(&mut state, Event::Backspace, t0);
        assert!(!render, "nothing to delete");

        type_str(&mut state, "dunex", t0, Duration::from_millis(10));
        send(&mut state, Event::Backspace, t0 + Duration::from_millis(60));
        assert_eq!(state.search_input, "dune");

        send(&mut state, Event::ClearInput, t0 + Duration::from_millis(70));
        assert!(state.search_input.is_empty());

        // Input settled back on the committed (empty) term: nothing to fetch.
        let (_, actions) = send(&mut state, Event::Timer, t0 + D);
        let (_, actions) = match actions.as_slice() {
            [Action::ArmTimer(d)] => send(&mut state, Event::Timer, t0 + D + *d),
            _ => (false, actions),
        };
        assert!(requests(&actions).is_empty());
    }

    #[test]
    fn navigation_and_focus() {
        let mut state = state();
        state.movies = vec![Movie::new(1, "A"), Movie::new(2, "B")];

        send(&mut state, Event::ToggleFocus, Instant::now());
        assert_eq!(state.focus, Focus::Results);

        send(&mut state, Event::KeyDown, Instant::now());
        assert_eq!(state.selected_index, 1);
        send(&mut state, Event::KeyDown, Instant::now());
        assert_eq!(state.selected_index, 0);

        send(&mut state, Event::Char('a'), Instant::now());
        assert_eq!(state.focus, Focus::SearchInput);
    }

    #[test]
    fn new_results_reset_selection() {
        let mut state = state();
        let request = commit(&mut state, "dune", Instant::now());
        state.movies = vec![Movie::new(1, "A"), Movie::new(2, "B"), Movie::new(3, "C")];
        state.selected_index = 2;

        send(&mut state, reply(&request, 200, DUNE_RESULTS), Instant::now());
        assert_eq!(state.selected_index, 0);
    }
}
