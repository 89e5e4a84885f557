//! Movie metadata provider client (TMDB).
//!
//! Builds the two list requests the browser needs and interprets their
//! responses. Failure interpretation happens in a fixed order: HTTP status
//! first, then body decoding, then the provider's logical error flag.

use crate::api::http::{HttpRequest, HttpResponse, Verb};
use crate::api::messages::RequestContext;
use crate::domain::error::{MarqueeError, Result};
use crate::domain::movie::{self, Movie};
use serde::Deserialize;

/// Default API root.
pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";

/// Default poster CDN root.
pub const DEFAULT_IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";

/// Message shown for transport, HTTP and decoding failures.
pub const GENERIC_FETCH_ERROR: &str = "Error Fetching Movies.";

/// Message shown when the provider flags a failure without explaining it.
pub const PROVIDER_FALLBACK_ERROR: &str = "Failed to fetch Movies.";

/// Subset of a list response body.
///
/// Two error conventions are recognised: TMDB's `success: false` with
/// `status_message`, and the `response: "False"` / `Error` pair some
/// provider-compatible proxies return.
#[derive(Debug, Deserialize)]
struct MovieListPayload {
    #[serde(default)]
    results: Option<Vec<Movie>>,
    #[serde(default)]
    success: Option<bool>,
    #[serde(default)]
    status_message: Option<String>,
    #[serde(default)]
    response: Option<String>,
    #[serde(default, rename = "Error")]
    error: Option<String>,
}

impl MovieListPayload {
    /// Returns the provider's failure message if the body flags one.
    fn logical_failure(&self) -> Option<String> {
        let flagged = self.success == Some(false) || self.response.as_deref() == Some("False");
        if !flagged {
            return None;
        }

        let message = self
            .error
            .as_deref()
            .or(self.status_message.as_deref())
            .filter(|m| !m.trim().is_empty())
            .unwrap_or(PROVIDER_FALLBACK_ERROR);

        Some(message.to_string())
    }
}

/// Client for the movie metadata provider.
///
/// Configuration is fixed at construction. A missing API key is not an error
/// here; it surfaces when a request is built, so the first fetch fails with a
/// visible message instead of the plugin failing to load.
#[derive(Debug, Clone)]
pub struct MovieClient {
    base_url: String,
    image_base_url: String,
    api_key: Option<String>,
}

impl MovieClient {
    #[must_use]
    pub fn new(
        base_url: impl Into<String>,
        image_base_url: impl Into<String>,
        api_key: Option<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            image_base_url: image_base_url.into(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
        }
    }

    /// Returns the list endpoint for `query`.
    ///
    /// An empty query selects the popularity-sorted discover listing; anything
    /// else, including whitespace, is a title search with the query
    /// percent-encoded.
    ///
    /// # Examples
    ///
    /// ```
    /// use marquee::api::MovieClient;
    ///
    /// let client = MovieClient::new("https://api.test/3", "https://img.test", None);
    /// assert_eq!(client.endpoint(""), "https://api.test/3/discover/movie?sort_by=popularity.desc");
    /// assert_eq!(client.endpoint("the thing"), "https://api.test/3/search/movie?query=the%20thing");
    /// ```
    #[must_use]
    pub fn endpoint(&self, query: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        if query.is_empty() {
            format!("{base}/discover/movie?sort_by=popularity.desc")
        } else {
            format!("{base}/search/movie?query={}", urlencoding::encode(query))
        }
    }

    /// Builds the list request for `query`, tagged with `request_id`.
    ///
    /// # Errors
    ///
    /// Returns [`MarqueeError::Config`] if no API key is configured.
    pub fn movies_request(&self, request_id: u64, query: &str) -> Result<HttpRequest> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| MarqueeError::Config("tmdb_api_key is not set".to_string()))?;

        Ok(HttpRequest::new(
            Verb::Get,
            self.endpoint(query),
            RequestContext::movies(request_id, query.to_string()),
        )
        .with_header("accept", "application/json")
        .with_header("Authorization", format!("Bearer {api_key}")))
    }

    /// Returns the absolute poster URL for `movie`, empty if it has none.
    #[must_use]
    pub fn poster_url(&self, movie: &Movie) -> String {
        movie::poster_url(&self.image_base_url, movie.poster_path.as_deref())
    }
}

/// Interprets a list response.
///
/// A successful body without a `results` array is an empty list, not an error.
///
/// # Errors
///
/// - [`MarqueeError::Http`] for non-2xx statuses
/// - [`MarqueeError::Decode`] for bodies that are not a list payload
/// - [`MarqueeError::Provider`] when the body flags a logical failure
pub fn parse_movies(response: &HttpResponse) -> Result<Vec<Movie>> {
    let payload: MovieListPayload = response.json()?;

    if let Some(message) = payload.logical_failure() {
        return Err(MarqueeError::Provider(message));
    }

    Ok(payload.results.unwrap_or_default())
}

/// Maps a fetch failure to the message shown in place of the grid.
///
/// Provider-reported failures keep their own message; every other failure
/// collapses to [`GENERIC_FETCH_ERROR`].
#[must_use]
pub fn user_message(error: &MarqueeError) -> String {
    match error {
        MarqueeError::Provider(message) => message.clone(),
        _ => GENERIC_FETCH_ERROR.to_string(),
    }
}
