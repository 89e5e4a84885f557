//! Composable UI component renderers.
//!
//! Each component draws one part of the interface at a given row and returns
//! the next free row, so [`render_layout`] can stack them top to bottom.
//!
//! # Components
//!
//! - [`header`]: Title bar with the current listing and result count
//! - [`search`]: Search input box, always shown
//! - [`trending`]: Ranked most-searched terms, shown when the store has any
//! - [`grid`]: Movie table with TITLE, RATING, LANG and YEAR columns
//! - [`status`]: Loading and error messages shown instead of the grid
//! - [`empty`]: Message for a successful fetch with no movies
//! - [`footer`]: Keybinding hints for the current focus

mod empty;
mod footer;
mod grid;
mod header;
mod search;
mod status;
mod trending;

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{MoviesPane, UIViewModel};

use empty::render_empty_state;
use footer::render_footer;
use grid::{render_grid_headers, render_grid_rows};
use header::render_header;
use search::render_search_bar;
use status::{render_error, render_loading};
use trending::render_trending;

/// Renders a horizontal border line at the specified row.
///
/// # Returns
///
/// The next available row position (row + 1)
fn render_border(row: usize, color: &str, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{}", "─".repeat(cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders the full plugin layout.
///
/// Layout structure:
/// ```text
/// [blank line]
/// [Header]
/// [Border]
/// [Search Bar - 3 lines]
/// [Trending title + entries + Border]   (only with entries)
/// [Grid Headers]
/// [Grid Rows | Loading | Error | Empty state]
/// [Blank padding to fill screen]
/// [Border]
/// [Footer]
/// ```
///
/// The grid header row is drawn for every pane variant so the layout does not
/// jump when a fetch settles.
pub fn render_layout(vm: &UIViewModel, theme: &Theme, cols: usize, rows: usize) {
    let mut current_row = 2;

    current_row = render_header(current_row, &vm.header, theme, cols);
    current_row = render_border(current_row, &theme.colors.border, cols);
    current_row = render_search_bar(current_row, &vm.search_bar, theme, cols);

    if let Some(trending) = &vm.trending {
        current_row = render_trending(current_row, trending, theme, cols);
        current_row = render_border(current_row, &theme.colors.border, cols);
    }

    current_row = render_grid_headers(current_row, theme, cols);

    let footer_row = rows;
    let border_row = footer_row.saturating_sub(1);
    let pane_rows = border_row.saturating_sub(current_row);
    let message_row = current_row + pane_rows.saturating_sub(2) / 2;

    match &vm.movies {
        MoviesPane::Grid { items, .. } => {
            render_grid_rows(current_row, items, theme, cols);
        }
        MoviesPane::Loading { message } => render_loading(message_row, message, theme, cols),
        MoviesPane::Error { message } => render_error(message_row, message, theme, cols),
        MoviesPane::Empty(empty) => render_empty_state(message_row, empty, theme, cols),
    }

    render_border(border_row, &theme.colors.border, cols);
    render_footer(footer_row, &vm.footer, theme, cols);
}
