//! Domain layer for the Marquee plugin.
//!
//! This module contains the core domain types, independent of Zellij APIs and of
//! the wire formats used by the movie provider and the document store.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`movie`]: Movie model and poster URL construction
//! - [`trending`]: Trending entry model

pub mod error;
pub mod movie;
pub mod trending;

pub use error::{MarqueeError, Result};
pub use movie::Movie;
pub use trending::TrendingEntry;
