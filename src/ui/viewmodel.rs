//! View model types representing renderable UI state.
//!
//! This module defines immutable view models computed from application state,
//! following the MVVM pattern. View models are optimized for rendering and
//! contain pre-computed display information like highlight ranges, formatted
//! labels and selection state.
//!
//! # Architecture
//!
//! View models are created via `AppState::compute_viewmodel()` and consumed by
//! the renderer. They contain no business logic, only display-ready data, which
//! keeps the render priority (loading, then error, then grid) testable without
//! a terminal.
//!
//! # Example
//!
//! ```rust
//! use marquee::ui::viewmodel::MoviesPane;
//!
//! let pane = MoviesPane::Error { message: "Error Fetching Movies.".to_string() };
//! assert!(!pane.is_grid());
//! ```

/// Complete UI view model for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct UIViewModel {
    /// Header information (title, result count).
    pub header: HeaderInfo,

    /// Search input box. Always present.
    pub search_bar: SearchBarInfo,

    /// Trending strip, `None` when the store returned no entries.
    pub trending: Option<TrendingSection>,

    /// Main content area, chosen by render priority.
    pub movies: MoviesPane,

    /// Footer information (keybindings, help text).
    pub footer: FooterInfo,
}

/// Content of the main area.
///
/// Exactly one variant is shown. Loading wins over error, error wins over the
/// grid; an empty grid is still the grid branch and carries its own message.
#[derive(Debug, Clone, PartialEq)]
pub enum MoviesPane {
    /// A fetch is in flight.
    Loading { message: String },

    /// The last fetch failed.
    Error { message: String },

    /// The last fetch succeeded with at least one movie.
    Grid {
        /// Rows in the visible window.
        items: Vec<MovieItem>,
        /// Index of the selected row within `items`.
        selected_index: usize,
    },

    /// The last fetch succeeded with no movies.
    Empty(EmptyState),
}

impl MoviesPane {
    /// Returns `true` for the grid branch, empty or not.
    #[must_use]
    pub const fn is_grid(&self) -> bool {
        matches!(self, Self::Grid { .. } | Self::Empty(_))
    }
}

/// Display information for one movie row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieItem {
    /// Title, truncated to the title column.
    pub title: String,

    /// Rating label, one decimal or `N/A`.
    pub rating: String,

    /// Upper-cased original language or `N/A`.
    pub language: String,

    /// Release year or `N/A`.
    pub year: String,

    /// Whether this row is currently selected.
    pub is_selected: bool,

    /// Character ranges of `title` matching the committed search term.
    ///
    /// Each tuple is `(start_index, end_index)` in character indices.
    pub highlight_ranges: Vec<(usize, usize)>,
}

/// The trending strip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrendingSection {
    pub items: Vec<TrendingItem>,
}

/// One ranked trending entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrendingItem {
    /// 1-based rank.
    pub rank: usize,
    pub term: String,
    pub count: u64,
    /// Poster URL, empty when the entry has none.
    pub poster_url: String,
}

/// Header display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    /// Title text to display in the header.
    pub title: String,
}

/// Footer display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    /// Keybinding help text for the current focus.
    pub keybindings: String,
}

/// Empty state message display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    /// Primary message (e.g., "No movies found").
    pub message: String,

    /// Secondary explanatory text.
    pub subtitle: String,
}

/// Search bar display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBarInfo {
    /// Current raw input text.
    pub query: String,

    /// Whether keystrokes currently go to the input.
    pub is_focused: bool,

    /// Whether an edit is waiting for the debounce window to pass.
    pub is_pending: bool,
}
