//! Trending ranking.
//!
//! The store already orders the top-N query by count, but documents from a
//! lookup or a backend that ignores ordering arrive unsorted. Ranking is
//! re-applied locally so the strip is always highest count first.

use crate::domain::TrendingEntry;

/// Sorts entries by count in descending order and keeps the first `limit`.
///
/// The sort is stable: entries with equal counts keep the order the store
/// returned them in.
///
/// # Examples
///
/// ```
/// use marquee::storage::rank_trending;
/// use marquee::TrendingEntry;
///
/// let entry = |term: &str, count| TrendingEntry {
///     id: term.to_string(),
///     search_term: term.to_string(),
///     count,
///     movie_id: 0,
///     poster_url: String::new(),
/// };
///
/// let mut entries = vec![entry("alien", 2), entry("batman", 7), entry("cars", 4)];
/// rank_trending(&mut entries, 2);
///
/// let terms: Vec<&str> = entries.iter().map(|e| e.search_term.as_str()).collect();
/// assert_eq!(terms, ["batman", "cars"]);
/// ```
pub fn rank_trending(entries: &mut Vec<TrendingEntry>, limit: usize) {
    entries.sort_by(|a, b| b.count.cmp(&a.count));
    entries.truncate(limit);
}
