//! Focus state for keyboard input.
//!
//! The browser has a single screen, so the only mode is where keystrokes go:
//! into the search input, or to the result grid for navigation.
//!
//! # Example
//!
//! ```rust
//! use marquee::app::Focus;
//!
//! let focus = Focus::default();
//! assert_eq!(focus, Focus::SearchInput);
//! assert_eq!(focus.toggled(), Focus::Results);
//! ```

/// Where keyboard input is routed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    /// User is typing in the search input field.
    ///
    /// Printable characters edit the query; arrows and Ctrl+n/p still move
    /// the grid selection.
    #[default]
    SearchInput,

    /// User is navigating the result grid.
    ///
    /// Accepts j/k and arrows for movement. Typing any other character returns
    /// focus to the input.
    Results,
}

impl Focus {
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::SearchInput => Self::Results,
            Self::Results => Self::SearchInput,
        }
    }
}
