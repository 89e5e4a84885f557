//! User interface rendering layer with component-based architecture.
//!
//! This module turns application state into ANSI-styled output through
//! composable rendering components. It provides theme support, responsive
//! layout, and fuzzy match highlighting of the committed search term.
//!
//! # Architecture
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → render → ANSI Output
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: View model types representing renderable UI state
//! - [`renderer`]: Top-level rendering coordinator
//! - [`components`]: Composable UI component renderers
//! - [`helpers`]: Shared rendering utilities (highlighting, padding)
//! - [`theme`]: Color scheme definitions and ANSI escape sequence generation

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::render;
pub use theme::Theme;
pub use viewmodel::{
    EmptyState, FooterInfo, HeaderInfo, MovieItem, MoviesPane, SearchBarInfo, TrendingItem,
    TrendingSection, UIViewModel,
};
