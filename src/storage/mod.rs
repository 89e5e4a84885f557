//! Storage layer for the trending ranking.
//!
//! Search popularity lives in a hosted document store shared by every user of
//! the plugin. This module defines the store abstraction, its Appwrite
//! implementation, and the local ranking applied to what the store returns.
//!
//! # Modules
//!
//! - `backend`: Store trait abstraction for backend implementations
//! - `appwrite`: Appwrite REST implementation
//! - `ranking`: Count-descending ordering and truncation
//! - `models`: Store record types separate from domain models

pub mod appwrite;
pub mod backend;
pub mod models;
pub mod ranking;

pub use appwrite::{AppwriteConfig, AppwriteStore};
pub use backend::TrendingStore;
pub use models::TrendingDocument;
pub use ranking::rank_trending;
