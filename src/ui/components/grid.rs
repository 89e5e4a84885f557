//! Movie grid renderer.
//!
//! This module renders the result list as a four-column table: TITLE, RATING,
//! LANG and YEAR. It supports selection highlighting and fuzzy match
//! highlighting of the committed search term in titles.

use crate::app::state::{AppState, LANGUAGE_COLUMN_WIDTH, RATING_COLUMN_WIDTH, YEAR_COLUMN_WIDTH};
use crate::ui::helpers::{self, fit, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::MovieItem;

/// Renders the table column headers at the specified row.
///
/// # Returns
///
/// The next available row position (row + 1)
pub fn render_grid_headers(row: usize, theme: &Theme, cols: usize) -> usize {
    let title_width = AppState::title_width(cols);

    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    print!(" {}", fit("TITLE", title_width));
    print!("{}", fit("RATING", RATING_COLUMN_WIDTH));
    print!("{}", fit("LANG", LANGUAGE_COLUMN_WIDTH));
    print!("{}", fit("YEAR", YEAR_COLUMN_WIDTH));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders all grid rows starting at the specified row.
///
/// # Returns
///
/// The next available row position (row + number of items)
pub fn render_grid_rows(row: usize, items: &[MovieItem], theme: &Theme, cols: usize) -> usize {
    let mut current_row = row;
    for item in items {
        current_row = render_grid_row(current_row, item, theme, cols);
    }
    current_row
}

/// Renders a single movie row.
///
/// # Styling Precedence
///
/// 1. Selection background (if `is_selected`)
/// 2. Fuzzy match highlights (unless selected)
/// 3. Normal text color, rating in its own color
///
/// The row is padded to the full pane width so the selection background spans
/// the line.
fn render_grid_row(row: usize, item: &MovieItem, theme: &Theme, cols: usize) -> usize {
    let title_width = AppState::title_width(cols);

    position_cursor(row, 1);

    if item.is_selected {
        print!("{}", Theme::fg(&theme.colors.selection_fg));
        print!("{}", Theme::bg(&theme.colors.selection_bg));
    } else {
        print!("{}", Theme::fg(&theme.colors.text_normal));
    }

    print!(" ");
    helpers::render_highlighted_text(&item.title, &item.highlight_ranges, theme, item.is_selected);
    let title_len = item.title.chars().count();
    print!("{}", " ".repeat(title_width.saturating_sub(title_len)));

    if !item.is_selected {
        print!("{}", Theme::fg(&theme.colors.rating_fg));
    }
    print!("{}", fit(&item.rating, RATING_COLUMN_WIDTH));

    if !item.is_selected {
        print!("{}", Theme::fg(&theme.colors.text_dim));
    }
    print!("{}", fit(&item.language, LANGUAGE_COLUMN_WIDTH));
    print!("{}", fit(&item.year, YEAR_COLUMN_WIDTH));

    let line_len = 1 + title_width + RATING_COLUMN_WIDTH + LANGUAGE_COLUMN_WIDTH + YEAR_COLUMN_WIDTH;
    print!("{}", " ".repeat(cols.saturating_sub(line_len)));

    print!("{}", Theme::reset());
    row + 1
}
