//! Trending strip renderer.
//!
//! Lists the most searched terms with their counts, one per row, numbered from
//! 1. The stored poster URL is appended, dimmed, when the pane has room for it.

use crate::ui::helpers::{fit, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{TrendingItem, TrendingSection};

/// Width of the term column.
const TERM_WIDTH: usize = 28;
/// Width of the count column.
const COUNT_WIDTH: usize = 12;
/// Minimum room left for a poster URL before it is shown at all.
const MIN_POSTER_WIDTH: usize = 24;

/// Renders the strip title and one row per entry.
///
/// # Returns
///
/// The next available row position.
pub fn render_trending(row: usize, section: &TrendingSection, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    print!("{}", fit(" Trending searches", cols));
    print!("{}", Theme::reset());

    let mut current_row = row + 1;
    for item in &section.items {
        current_row = render_trending_row(current_row, item, theme, cols);
    }
    current_row
}

fn render_trending_row(row: usize, item: &TrendingItem, theme: &Theme, cols: usize) -> usize {
    let rank = format!(" {:>2}. ", item.rank);
    let count = format!("{} searches", item.count);
    let used = rank.chars().count() + TERM_WIDTH + COUNT_WIDTH;
    let poster_room = cols.saturating_sub(used);

    position_cursor(row, 1);
    print!("{}", Theme::fg(&theme.colors.trending_rank_fg));
    print!("{rank}");
    print!("{}", Theme::fg(&theme.colors.text_normal));
    print!("{}", fit(&item.term, TERM_WIDTH));
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("{}", fit(&count, COUNT_WIDTH));

    if !item.poster_url.is_empty() && poster_room >= MIN_POSTER_WIDTH {
        print!("{}", Theme::dim());
        print!("{}", fit(&item.poster_url, poster_room));
    } else {
        print!("{}", " ".repeat(poster_room));
    }

    print!("{}", Theme::reset());
    row + 1
}
