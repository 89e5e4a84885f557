//! Host-agnostic HTTP request and response values.
//!
//! The library never performs I/O. Clients build [`HttpRequest`] values which the
//! plugin shim hands to Zellij's `web_request`, and the shim turns each
//! `WebRequestResult` back into an [`HttpResponse`] carrying the original
//! [`RequestContext`]. Keeping both sides as plain values lets tests drive every
//! network path by constructing responses directly.

use crate::api::messages::RequestContext;
use crate::domain::error::{MarqueeError, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;

/// HTTP methods the plugin issues.
///
/// Zellij's host only exposes GET, POST, PUT and DELETE; document updates are
/// therefore expressed as a PUT upsert rather than a PATCH.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Get,
    Post,
    Put,
}

/// An outgoing request, ready to be executed by the host.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub verb: Verb,
    pub url: String,
    pub headers: BTreeMap<String, String>,
    pub body: Vec<u8>,
    /// Continuation data echoed back with the response.
    pub context: RequestContext,
}

impl HttpRequest {
    /// Creates a request with no headers and an empty body.
    #[must_use]
    pub fn new(verb: Verb, url: impl Into<String>, context: RequestContext) -> Self {
        Self {
            verb,
            url: url.into(),
            headers: BTreeMap::new(),
            body: Vec::new(),
            context,
        }
    }

    /// Adds or replaces a header.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Serializes `payload` as the JSON body and sets `Content-Type`.
    ///
    /// # Errors
    ///
    /// Returns [`MarqueeError::Decode`] if the payload cannot be serialized.
    pub fn with_json_body<T: Serialize>(mut self, payload: &T) -> Result<Self> {
        self.body = serde_json::to_vec(payload)?;
        Ok(self.with_header("Content-Type", "application/json"))
    }

    /// Returns the header value for `name`, if set.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }
}

/// A settled request: status, raw body, and the context it was issued with.
///
/// Transport failures reported by the host arrive here as non-2xx statuses, so
/// callers see a single failure shape for "unreachable" and "HTTP error".
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
    pub context: RequestContext,
}

impl HttpResponse {
    /// Returns `true` for 2xx statuses.
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Decodes a 2xx body as JSON.
    ///
    /// # Errors
    ///
    /// - [`MarqueeError::Http`] if the status is not 2xx (checked first)
    /// - [`MarqueeError::Decode`] if the body is not valid JSON for `T`
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        if !self.is_success() {
            return Err(MarqueeError::Http { status: self.status });
        }
        Ok(serde_json::from_slice(&self.body)?)
    }
}
