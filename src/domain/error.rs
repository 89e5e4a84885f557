//! Error types for the Marquee plugin.
//!
//! This module defines the centralized error type [`MarqueeError`] and a type alias
//! [`Result`] for convenient error handling throughout the plugin. All errors are
//! implemented using the `thiserror` crate for automatic `Error` trait implementation.

use thiserror::Error;

/// The main error type for Marquee plugin operations.
///
/// Variants map onto the failure taxonomy of the two network flows: transport
/// and HTTP failures, provider-reported failures inside an otherwise successful
/// body, undecodable bodies, and document store failures. The app layer decides
/// which of these become user-visible and which are only logged.
///
/// # Examples
///
/// ```
/// use marquee::MarqueeError;
///
/// fn require_key(key: Option<&str>) -> Result<&str, MarqueeError> {
///     key.ok_or_else(|| MarqueeError::Config("tmdb_api_key is not set".to_string()))
/// }
///
/// assert!(require_key(None).is_err());
/// ```
#[derive(Debug, Error)]
pub enum MarqueeError {
    /// Required configuration is missing or malformed.
    ///
    /// Raised at request-build time, so a missing secret fails the request
    /// without ever reaching the network.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The server answered with a non-2xx status.
    #[error("HTTP error: status {status}")]
    Http {
        /// Status code returned by the server (or by the host on transport failure).
        status: u16,
    },

    /// The provider flagged a logical failure inside a 2xx response body.
    #[error("Provider error: {0}")]
    Provider(String),

    /// The response body was not the JSON shape we expected.
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// Document store operation failed.
    ///
    /// Trending store failures never reach the user; they are logged and dropped.
    #[error("Store error: {0}")]
    Store(String),

    /// A response arrived whose request context could not be read back.
    #[error("Request context error: {0}")]
    Context(String),

    /// Theme parsing or loading failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized `Result` type for Marquee operations.
pub type Result<T> = std::result::Result<T, MarqueeError>;
