//! Application state management and view model computation.
//!
//! This module defines [`AppState`], the central state container for the plugin,
//! along with methods for fetch bookkeeping, selection management, and UI view
//! model generation. It serves as the single source of truth for all transient
//! UI state.
//!
//! # State Components
//!
//! - **Search input**: Raw text as typed, plus the debouncer owning the
//!   committed term
//! - **Fetch state**: `is_loading`, `error_message`, `movies`, and the id of the
//!   latest movie request so superseded responses can be discarded
//! - **Trending**: Entries read once at startup, already ranked
//! - **Selection and focus**: Cursor within `movies`, and where keys go
//! - **Collaborators**: The movie client and the injected trending store
//!
//! # View Model Computation
//!
//! The `compute_viewmodel` method transforms state into a renderable UI
//! representation, applying the render priority (loading, then error, then
//! grid), windowing, and fuzzy match highlighting of the committed term.
//!
//! # Example
//!
//! ```rust
//! use marquee::api::MovieClient;
//! use marquee::app::AppState;
//! use marquee::storage::{AppwriteConfig, AppwriteStore};
//! use marquee::ui::Theme;
//!
//! let client = MovieClient::new("https://api.themoviedb.org/3", "https://image.tmdb.org/t/p/w500", None);
//! let store = AppwriteStore::new(AppwriteConfig::default());
//! let state = AppState::new(client, Box::new(store), Theme::default());
//! let viewmodel = state.compute_viewmodel(24, 80);
//! assert!(viewmodel.trending.is_none());
//! ```

use super::debounce::{Debouncer, DEFAULT_DEBOUNCE};
use super::modes::Focus;
use crate::api::tmdb::{self, MovieClient};
use crate::api::HttpRequest;
use crate::domain::error::MarqueeError;
use crate::domain::{Movie, TrendingEntry};
use crate::storage::TrendingStore;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    EmptyState, FooterInfo, HeaderInfo, MovieItem, MoviesPane, SearchBarInfo, TrendingItem,
    TrendingSection, UIViewModel,
};
use fuzzy_matcher::skim::SkimMatcherV2;
use std::time::Duration;

/// Default number of trending entries shown.
pub const DEFAULT_TRENDING_LIMIT: usize = 5;

/// Fixed widths of the grid's right-hand columns.
pub(crate) const RATING_COLUMN_WIDTH: usize = 7;
pub(crate) const LANGUAGE_COLUMN_WIDTH: usize = 6;
pub(crate) const YEAR_COLUMN_WIDTH: usize = 6;
const MIN_TITLE_WIDTH: usize = 12;

/// Central application state container.
#[derive(Debug)]
pub struct AppState {
    /// Raw search input, updated on every keystroke.
    pub search_input: String,

    /// Owns the committed term and the debounce window.
    pub debouncer: Debouncer,

    /// `true` strictly while the latest movie request is in flight.
    pub is_loading: bool,

    /// User-visible failure of the last fetch, empty when none.
    pub error_message: String,

    /// Results of the last successful fetch, in provider order.
    pub movies: Vec<Movie>,

    /// Ranked trending entries, empty when the store has none or failed.
    pub trending: Vec<TrendingEntry>,

    /// Zero-based index of the selected movie.
    ///
    /// Reset to 0 whenever a new result list arrives. Wraps around during
    /// navigation via `move_selection_up/down()`.
    pub selected_index: usize,

    /// Where keystrokes are routed.
    pub focus: Focus,

    /// Color scheme for UI rendering.
    pub theme: Theme,

    /// Set once the host granted permissions and the initial requests went out.
    pub started: bool,

    movie_client: MovieClient,
    trending_store: Box<dyn TrendingStore>,
    trending_limit: usize,
    latest_request_id: u64,
}

impl AppState {
    /// Creates a new application state.
    ///
    /// The trending store is injected so tests can substitute a double; nothing
    /// in the crate reaches for a global client.
    #[must_use]
    pub fn new(
        movie_client: MovieClient,
        trending_store: Box<dyn TrendingStore>,
        theme: Theme,
    ) -> Self {
        Self {
            search_input: String::new(),
            debouncer: Debouncer::new(DEFAULT_DEBOUNCE),
            is_loading: false,
            error_message: String::new(),
            movies: Vec::new(),
            trending: Vec::new(),
            selected_index: 0,
            focus: Focus::default(),
            theme,
            started: false,
            movie_client,
            trending_store,
            trending_limit: DEFAULT_TRENDING_LIMIT,
            latest_request_id: 0,
        }
    }

    #[must_use]
    pub fn with_debounce(mut self, delay: Duration) -> Self {
        self.debouncer = Debouncer::new(delay);
        self
    }

    #[must_use]
    pub const fn with_trending_limit(mut self, limit: usize) -> Self {
        self.trending_limit = limit;
        self
    }

    #[must_use]
    pub const fn movie_client(&self) -> &MovieClient {
        &self.movie_client
    }

    #[must_use]
    pub fn trending_store(&self) -> &dyn TrendingStore {
        self.trending_store.as_ref()
    }

    #[must_use]
    pub const fn trending_limit(&self) -> usize {
        self.trending_limit
    }

    /// Id of the most recently issued movie request, 0 before the first.
    #[must_use]
    pub const fn latest_request_id(&self) -> u64 {
        self.latest_request_id
    }

    /// Starts a fetch cycle for `query`.
    ///
    /// Every call supersedes earlier requests, even when building fails. On
    /// success the cycle is marked loading with the previous error cleared; if
    /// the request cannot be built the cycle settles immediately with the
    /// generic error, so loading is never observed as `true`.
    pub fn begin_fetch(&mut self, query: &str) -> Option<HttpRequest> {
        self.latest_request_id += 1;

        match self.movie_client.movies_request(self.latest_request_id, query) {
            Ok(request) => {
                self.is_loading = true;
                self.error_message.clear();
                Some(request)
            }
            Err(e) => {
                tracing::warn!(error = %e, "cannot build movie request");
                self.fail_fetch(&e);
                None
            }
        }
    }

    /// Returns `true` if `request_id` belongs to the latest issued fetch.
    #[must_use]
    pub const fn is_current_request(&self, request_id: u64) -> bool {
        request_id == self.latest_request_id
    }

    /// Settles the current fetch with its results.
    pub fn complete_fetch(&mut self, movies: Vec<Movie>) {
        self.is_loading = false;
        self.error_message.clear();
        self.movies = movies;
        self.selected_index = 0;
    }

    /// Settles the current fetch with a failure; previous results are cleared.
    pub fn fail_fetch(&mut self, error: &MarqueeError) {
        self.is_loading = false;
        self.error_message = tmdb::user_message(error);
        self.movies.clear();
        self.selected_index = 0;
    }

    /// Moves selection cursor down by one position, wrapping to top if at end.
    pub fn move_selection_down(&mut self) {
        if self.movies.is_empty() {
            return;
        }
        self.selected_index = (self.selected_index + 1) % self.movies.len();
    }

    /// Moves selection cursor up by one position, wrapping to bottom if at start.
    pub fn move_selection_up(&mut self) {
        if self.movies.is_empty() {
            return;
        }
        if self.selected_index == 0 {
            self.selected_index = self.movies.len() - 1;
        } else {
            self.selected_index -= 1;
        }
    }

    /// Returns a reference to the currently selected movie, if any.
    #[must_use]
    pub fn selected_movie(&self) -> Option<&Movie> {
        self.movies.get(self.selected_index)
    }

    /// Computes a renderable UI view model from current state and terminal dimensions.
    ///
    /// # Windowing Algorithm
    ///
    /// 1. Calculate available rows after subtracting UI chrome (header, search
    ///    box, trending strip, grid header, footer)
    /// 2. Center window around selected index (selected index at midpoint)
    /// 3. Adjust window if near start/end to maximize visible items
    /// 4. Compute relative selection index within visible window
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        let trending = self.compute_trending();
        let movies = self.compute_movies_pane(rows, cols, trending.as_ref());

        UIViewModel {
            header: self.compute_header(),
            search_bar: self.compute_search_bar(),
            trending,
            movies,
            footer: self.compute_footer(),
        }
    }

    fn compute_movies_pane(
        &self,
        rows: usize,
        cols: usize,
        trending: Option<&TrendingSection>,
    ) -> MoviesPane {
        if self.is_loading {
            return MoviesPane::Loading {
                message: "Loading movies...".to_string(),
            };
        }

        if !self.error_message.is_empty() {
            return MoviesPane::Error {
                message: self.error_message.clone(),
            };
        }

        if self.movies.is_empty() {
            let subtitle = if self.debouncer.committed().is_empty() {
                "The provider returned no popular titles".to_string()
            } else {
                format!("Nothing matches \"{}\"", self.debouncer.committed())
            };
            return MoviesPane::Empty(EmptyState {
                message: "No movies found".to_string(),
                subtitle,
            });
        }

        let trending_rows = trending.map_or(0, |t| t.items.len());
        let available_rows = Self::calculate_available_rows(rows, trending_rows).max(1);

        let mut visible_start = self.selected_index.saturating_sub(available_rows / 2);
        let visible_end = (visible_start + available_rows).min(self.movies.len());

        let actual_count = visible_end - visible_start;
        if actual_count < available_rows && self.movies.len() >= available_rows {
            visible_start = visible_end.saturating_sub(available_rows);
        }

        let matcher = if self.debouncer.committed().is_empty() {
            None
        } else {
            Some(SkimMatcherV2::default())
        };

        let title_width = Self::title_width(cols);
        let items = self.movies[visible_start..visible_end]
            .iter()
            .enumerate()
            .map(|(relative_idx, movie)| {
                let absolute_idx = visible_start + relative_idx;
                self.compute_movie_item(movie, absolute_idx, title_width, matcher.as_ref())
            })
            .collect();

        MoviesPane::Grid {
            items,
            selected_index: self.selected_index.saturating_sub(visible_start),
        }
    }

    fn compute_movie_item(
        &self,
        movie: &Movie,
        absolute_idx: usize,
        title_width: usize,
        matcher: Option<&SkimMatcherV2>,
    ) -> MovieItem {
        let title = truncate_chars(&movie.title, title_width);
        let visible_chars = title.chars().count();

        let highlight_ranges = matcher.map_or_else(Vec::new, |m| {
            self.compute_highlight_ranges(&movie.title, m)
                .into_iter()
                .filter(|&(start, _)| start < visible_chars)
                .map(|(start, end)| (start, end.min(visible_chars)))
                .collect()
        });

        MovieItem {
            title,
            rating: movie.rating_label(),
            language: movie.language_label(),
            year: movie.year_label(),
            is_selected: absolute_idx == self.selected_index,
            highlight_ranges,
        }
    }

    /// Computes character index ranges of `text` matching the committed term,
    /// coalescing consecutive indices into `(start, end)` ranges.
    fn compute_highlight_ranges(&self, text: &str, matcher: &SkimMatcherV2) -> Vec<(usize, usize)> {
        use fuzzy_matcher::FuzzyMatcher;

        let Some((_score, indices)) = matcher.fuzzy_indices(text, self.debouncer.committed()) else {
            return vec![];
        };

        let mut ranges: Vec<(usize, usize)> = Vec::new();
        for idx in indices {
            match ranges.last_mut() {
                Some((_, end)) if *end == idx => *end = idx + 1,
                _ => ranges.push((idx, idx + 1)),
            }
        }
        ranges
    }

    fn compute_trending(&self) -> Option<TrendingSection> {
        if self.trending.is_empty() {
            return None;
        }

        let items = self
            .trending
            .iter()
            .enumerate()
            .map(|(idx, entry)| TrendingItem {
                rank: idx + 1,
                term: entry.search_term.clone(),
                count: entry.count,
                poster_url: entry.poster_url.clone(),
            })
            .collect();

        Some(TrendingSection { items })
    }

    fn compute_header(&self) -> HeaderInfo {
        let committed = self.debouncer.committed();
        let label = if committed.is_empty() {
            "Popular".to_string()
        } else {
            format!("Results for \"{committed}\"")
        };

        let title = if self.is_loading || !self.error_message.is_empty() {
            format!(" Marquee: {label} ")
        } else {
            format!(" Marquee: {label} ({}) ", self.movies.len())
        };

        HeaderInfo { title }
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = match self.focus {
            Focus::SearchInput => {
                "Type to search  Tab: results  Ctrl+n/p: navigate  Ctrl+u: clear  Esc: close"
            }
            Focus::Results => "j/k or Ctrl+n/p: navigate  Tab or /: search  Esc: close",
        };

        FooterInfo {
            keybindings: keybindings.to_string(),
        }
    }

    fn compute_search_bar(&self) -> SearchBarInfo {
        SearchBarInfo {
            query: self.search_input.clone(),
            is_focused: self.focus == Focus::SearchInput,
            is_pending: self.debouncer.is_pending(),
        }
    }

    /// Rows left for grid rows after the chrome.
    ///
    /// Fixed chrome is 9 rows: blank, header, border, search box (3), grid
    /// header, border and footer. The trending strip adds a title row, one row
    /// per entry and a border.
    const fn calculate_available_rows(total_rows: usize, trending_rows: usize) -> usize {
        let trending_chrome = if trending_rows == 0 { 0 } else { trending_rows + 2 };
        total_rows.saturating_sub(9 + trending_chrome)
    }

    /// Width of the title column for a pane `cols` wide.
    pub(crate) const fn title_width(cols: usize) -> usize {
        let fixed = RATING_COLUMN_WIDTH + LANGUAGE_COLUMN_WIDTH + YEAR_COLUMN_WIDTH + 2;
        let width = cols.saturating_sub(fixed);
        if width < MIN_TITLE_WIDTH {
            MIN_TITLE_WIDTH
        } else {
            width
        }
    }
}

/// Truncates `text` to `max` characters, marking the cut with `...`.
fn truncate_chars(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let keep = max.saturating_sub(3);
    let mut truncated: String = text.chars().take(keep).collect();
    truncated.push_str("...");
    truncated
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{AppwriteConfig, AppwriteStore};

    fn state() -> AppState {
        let client = MovieClient::new(
            tmdb::DEFAULT_BASE_URL,
            tmdb::DEFAULT_IMAGE_BASE_URL,
            Some("key".to_string()),
        );
        AppState::new(
            client,
            Box::new(AppwriteStore::new(AppwriteConfig::default())),
            Theme::default(),
        )
    }

    fn movies(n: u64) -> Vec<Movie> {
        (1..=n).map(|id| Movie::new(id, format!("Movie {id}"))).collect()
    }

    fn entry(term: &str, count: u64) -> TrendingEntry {
        TrendingEntry {
            id: term.to_string(),
            search_term: term.to_string(),
            count,
            movie_id: 1,
            poster_url: String::new(),
        }
    }

    #[test]
    fn loading_takes_priority_over_error_and_results() {
        let mut state = state();
        state.movies = movies(3);
        state.error_message = "Error Fetching Movies.".to_string();
        state.is_loading = true;

        assert!(matches!(
            state.compute_viewmodel(24, 80).movies,
            MoviesPane::Loading { .. }
        ));

        state.is_loading = false;
        assert_eq!(
            state.compute_viewmodel(24, 80).movies,
            MoviesPane::Error { message: "Error Fetching Movies.".to_string() }
        );

        state.error_message.clear();
        assert!(matches!(
            state.compute_viewmodel(24, 80).movies,
            MoviesPane::Grid { ref items, .. } if items.len() == 3
        ));
    }

    #[test]
    fn empty_results_are_still_the_grid_branch() {
        let pane = state().compute_viewmodel(24, 80).movies;
        assert!(pane.is_grid());
        assert!(matches!(pane, MoviesPane::Empty(ref e) if e.message == "No movies found"));
    }

    #[test]
    fn begin_fetch_without_key_settles_immediately() {
        let mut state = AppState::new(
            MovieClient::new(tmdb::DEFAULT_BASE_URL, tmdb::DEFAULT_IMAGE_BASE_URL, None),
            Box::new(AppwriteStore::new(AppwriteConfig::default())),
            Theme::default(),
        );
        state.movies = movies(2);

        assert!(state.begin_fetch("dune").is_none());
        assert!(!state.is_loading);
        assert_eq!(state.error_message, tmdb::GENERIC_FETCH_ERROR);
        assert!(state.movies.is_empty());
        assert_eq!(state.latest_request_id(), 1);
    }

    #[test]
    fn begin_fetch_supersedes_earlier_requests() {
        let mut state = state();
        state.error_message = "old".to_string();

        let first = state.begin_fetch("").unwrap();
        let second = state.begin_fetch("dune").unwrap();

        assert!(state.is_loading);
        assert!(state.error_message.is_empty());
        assert_ne!(first.context, second.context);
        assert!(!state.is_current_request(1));
        assert!(state.is_current_request(2));
    }

    #[test]
    fn trending_strip_is_numbered_from_one() {
        let mut state = state();
        assert!(state.compute_viewmodel(24, 80).trending.is_none());

        state.trending = vec![entry("dune", 9), entry("alien", 4)];
        let trending = state.compute_viewmodel(24, 80).trending.unwrap();

        let ranks: Vec<(usize, &str)> =
            trending.items.iter().map(|i| (i.rank, i.term.as_str())).collect();
        assert_eq!(ranks, vec![(1, "dune"), (2, "alien")]);
    }

    #[test]
    fn selection_wraps_in_both_directions() {
        let mut state = state();
        state.movies = movies(3);

        state.move_selection_up();
        assert_eq!(state.selected_index, 2);
        state.move_selection_down();
        assert_eq!(state.selected_index, 0);
        assert_eq!(state.selected_movie().map(|m| m.id), Some(1));
    }

    #[test]
    fn window_follows_selection() {
        let mut state = state();
        state.movies = movies(50);
        state.selected_index = 49;

        // 20 rows leave 11 for the grid.
        let MoviesPane::Grid { items, selected_index } = state.compute_viewmodel(20, 80).movies else {
            panic!("expected grid");
        };
        assert_eq!(items.len(), 11);
        assert_eq!(selected_index, 10);
        assert!(items[10].is_selected);
        assert_eq!(items[10].title, "Movie 50");
    }

    #[test]
    fn trending_strip_shrinks_the_grid_window() {
        let mut state = state();
        state.movies = movies(50);
        state.trending = vec![entry("a", 3), entry("b", 2), entry("c", 1)];

        let MoviesPane::Grid { items, .. } = state.compute_viewmodel(20, 80).movies else {
            panic!("expected grid");
        };
        assert_eq!(items.len(), 6);
    }

    #[test]
    fn committed_term_is_highlighted_in_titles() {
        let mut state = state();
        state.movies = vec![Movie::new(1, "Dune: Part Two")];
        let t0 = std::time::Instant::now();
        state.debouncer.input("dune", t0);
        let _ = state.debouncer.on_timer(t0 + DEFAULT_DEBOUNCE);

        let MoviesPane::Grid { items, .. } = state.compute_viewmodel(24, 80).movies else {
            panic!("expected grid");
        };
        assert_eq!(items[0].highlight_ranges, vec![(0, 4)]);
    }

    #[test]
    fn long_titles_are_truncated_on_char_boundaries() {
        assert_eq!(truncate_chars("Amélie", 10), "Amélie");
        assert_eq!(truncate_chars("Le Fabuleux Destin d'Amélie Poulain", 12), "Le Fabule...");
    }

    #[test]
    fn header_counts_results_once_settled() {
        let mut state = state();
        state.movies = movies(4);
        assert_eq!(state.compute_viewmodel(24, 80).header.title, " Marquee: Popular (4) ");

        state.is_loading = true;
        assert_eq!(state.compute_viewmodel(24, 80).header.title, " Marquee: Popular ");
    }
}
