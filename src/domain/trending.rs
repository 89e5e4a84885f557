//! Trending entry domain model.
//!
//! A trending entry pairs a historical search term with how often it has been
//! searched and a snapshot of the poster of the top result at the time it was
//! first recorded. Entries are owned and persisted by the hosted document store;
//! the plugin only reads the top of the ranking and records new occurrences.

use serde::{Deserialize, Serialize};

/// A ranked, previously searched term.
///
/// # Fields
///
/// - `id`: Store-assigned document identifier
/// - `search_term`: The exact term as typed (case and whitespace preserved)
/// - `count`: Accumulated number of searches for this term
/// - `movie_id`: Provider id of the top result when the term was first recorded
/// - `poster_url`: Absolute poster URL of that result, empty if it had none
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendingEntry {
    pub id: String,
    pub search_term: String,
    pub count: u64,
    pub movie_id: u64,
    pub poster_url: String,
}

impl TrendingEntry {
    /// Returns `true` if this entry records exactly `term`.
    ///
    /// Matching is byte-for-byte: `"Dune"`, `"dune"` and `"dune "` are three
    /// different entries, the same way the store's equality filter treats them.
    #[must_use]
    pub fn matches_term(&self, term: &str) -> bool {
        self.search_term == term
    }
}
