//! Trending store abstraction.
//!
//! This module defines the [`TrendingStore`] trait that abstracts over the hosted
//! document store backing the trending strip. Implementations are sans-IO: they
//! build requests and interpret responses, while the plugin runtime performs the
//! round trips. The app layer owns one store as `Box<dyn TrendingStore>`, injected
//! at construction, so tests can substitute a double.
//!
//! # Design Philosophy
//!
//! The trait covers exactly the two use cases of the browser: read the top of the
//! ranking once at startup, and record one more search for a term. Recording is a
//! read-then-write sequence (lookup, then create or increment) with no atomicity;
//! two sessions recording the same new term at once can both create an entry.

use crate::api::http::{HttpRequest, HttpResponse};
use crate::domain::error::Result;
use crate::domain::{Movie, TrendingEntry};

/// Abstraction over the trending document store.
pub trait TrendingStore: std::fmt::Debug {
    /// Builds the request for the `limit` entries with the highest counts.
    ///
    /// # Errors
    ///
    /// Returns an error if the store is not configured.
    fn top_request(&self, limit: usize) -> Result<HttpRequest>;

    /// Builds the request looking up the entry recording exactly `query`.
    ///
    /// `movie` is the top search result; it travels with the request so a new
    /// entry can be created from it if the lookup finds nothing.
    ///
    /// # Errors
    ///
    /// Returns an error if the store is not configured.
    fn lookup_request(&self, query: &str, movie: &Movie) -> Result<HttpRequest>;

    /// Builds the request creating a new entry for `query` with count 1.
    ///
    /// # Errors
    ///
    /// Returns an error if the store is not configured or the body cannot be encoded.
    fn create_request(&self, query: &str, movie_id: u64, poster_url: &str) -> Result<HttpRequest>;

    /// Builds the request writing `existing.count + 1` back to `existing`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store is not configured or the body cannot be encoded.
    fn increment_request(&self, query: &str, existing: &TrendingEntry) -> Result<HttpRequest>;

    /// Interprets a list response (top-N read or lookup).
    ///
    /// # Errors
    ///
    /// Returns an error for non-2xx statuses or undecodable bodies.
    fn parse_entries(&self, response: &HttpResponse) -> Result<Vec<TrendingEntry>>;

    /// Interprets a single-document write response.
    ///
    /// # Errors
    ///
    /// Returns an error for non-2xx statuses or undecodable bodies.
    fn parse_entry(&self, response: &HttpResponse) -> Result<TrendingEntry>;
}
