//! Loading and error messages shown in place of the grid.

use crate::ui::helpers::{center_padding, position_cursor};
use crate::ui::theme::Theme;

/// Renders the loading indicator centered on `row`.
pub fn render_loading(row: usize, message: &str, theme: &Theme, cols: usize) {
    render_centered(row, &format!("◌ {message}"), &theme.colors.spinner_fg, cols);
}

/// Renders the fetch error centered on `row`.
pub fn render_error(row: usize, message: &str, theme: &Theme, cols: usize) {
    render_centered(row, &format!("✗ {message}"), &theme.colors.error_fg, cols);
}

fn render_centered(row: usize, text: &str, color: &str, cols: usize) {
    let len = text.chars().count();
    let padding = center_padding(len, cols);

    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(color));
    print!("{}", " ".repeat(padding));
    print!("{text}");
    print!("{}", " ".repeat(cols.saturating_sub(padding + len)));
    print!("{}", Theme::reset());
}
