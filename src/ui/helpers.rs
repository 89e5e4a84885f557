//! Shared rendering utilities and helpers.
//!
//! This module provides low-level rendering utilities used across multiple UI
//! components: cursor placement, width-aware padding, and fuzzy match
//! highlighting with proper ANSI escape sequence management.
//!
//! All widths are counted in characters, not bytes, so titles with accents or
//! non-Latin scripts pad and truncate correctly.

use crate::ui::theme::Theme;

/// Positions the cursor at a specific row and column (1-indexed).
pub fn position_cursor(row: usize, col: usize) {
    print!("\u{1b}[{row};{col}H");
}

/// Returns `text` cut or right-padded with spaces to exactly `width` characters.
///
/// # Example
///
/// ```rust
/// use marquee::ui::helpers::fit;
///
/// assert_eq!(fit("7.8", 5), "7.8  ");
/// assert_eq!(fit("Amélie", 3), "Amé");
/// ```
#[must_use]
pub fn fit(text: &str, width: usize) -> String {
    let mut fitted: String = text.chars().take(width).collect();
    let len = fitted.chars().count();
    fitted.push_str(&" ".repeat(width - len));
    fitted
}

/// Returns the left padding that centers `len` characters in `cols`.
#[must_use]
pub const fn center_padding(len: usize, cols: usize) -> usize {
    cols.saturating_sub(len) / 2
}

/// Renders text with highlighted character ranges for fuzzy matches.
///
/// Ranges are `(start, end)` character indices, end exclusive, and are clamped
/// to the text. When `is_selected` is `true`, match highlighting is disabled to
/// avoid conflicting with selection background colors.
pub fn render_highlighted_text(
    text: &str,
    ranges: &[(usize, usize)],
    theme: &Theme,
    is_selected: bool,
) {
    if ranges.is_empty() || is_selected {
        print!("{text}");
        return;
    }

    let chars: Vec<char> = text.chars().collect();
    let mut current_pos = 0;

    for &(start, end) in ranges {
        let start = start.clamp(current_pos, chars.len());
        let end = end.clamp(start, chars.len());

        if start > current_pos {
            let normal_section: String = chars[current_pos..start].iter().collect();
            print!("{normal_section}");
        }

        print!("{}", Theme::fg(&theme.colors.match_highlight_fg));
        print!("{}", Theme::bg(&theme.colors.match_highlight_bg));
        let highlighted_section: String = chars[start..end].iter().collect();
        print!("{highlighted_section}");
        print!("{}", Theme::reset());
        print!("{}", Theme::fg(&theme.colors.text_normal));

        current_pos = end;
    }

    if current_pos < chars.len() {
        let remaining: String = chars[current_pos..].iter().collect();
        print!("{remaining}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_pads_and_cuts_by_chars() {
        assert_eq!(fit("", 3), "   ");
        assert_eq!(fit("N/A", 3), "N/A");
        assert_eq!(fit("日本語です", 2), "日本");
        assert_eq!(fit("ab", 4).chars().count(), 4);
    }

    #[test]
    fn centering_never_underflows() {
        assert_eq!(center_padding(10, 30), 10);
        assert_eq!(center_padding(40, 30), 0);
    }
}
