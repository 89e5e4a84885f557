//! Request context carried through the host's web request round trip.
//!
//! Zellij executes `web_request` asynchronously and reports completion as a
//! separate event, echoing back a string map supplied with the request. This
//! module defines what the plugin stores in that map: which continuation the
//! response belongs to, and the OpenTelemetry trace context of the span that
//! issued the request so the response handling is linked to it.

use crate::domain::error::{MarqueeError, Result};
use crate::domain::Movie;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Key under which the serialized context is stored in the host's context map.
pub const CONTEXT_KEY: &str = "marquee";

/// Distributed tracing context for linking spans across the request boundary.
///
/// Captures the current trace and span IDs from OpenTelemetry when a request is
/// built; the span handling the response takes them as its remote parent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceContext {
    /// OpenTelemetry trace ID as a hex string.
    pub trace_id: String,

    /// Span ID of the span that issued the request.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Creates a trace context from the current tracing span.
    ///
    /// Returns `None` when no OpenTelemetry layer is installed or the current
    /// span is not sampled, which is the normal case in tests.
    #[must_use]
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let otel_context = tracing::Span::current().context();
        let span_ref = otel_context.span();
        let span_context = span_ref.span_context();

        if !span_context.is_valid() {
            return None;
        }

        Some(Self {
            trace_id: format!("{:032x}", span_context.trace_id()),
            parent_span_id: format!("{:016x}", span_context.span_id()),
        })
    }

    /// Rebuilds the issuing span as a remote OpenTelemetry parent context.
    ///
    /// Returns `None` if either id is not valid hex.
    #[must_use]
    pub fn to_parent_context(&self) -> Option<opentelemetry::Context> {
        use opentelemetry::trace::{
            SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState,
        };

        let trace_id = TraceId::from_hex(&self.trace_id).ok()?;
        let span_id = SpanId::from_hex(&self.parent_span_id).ok()?;

        let span_context = SpanContext::new(
            trace_id,
            span_id,
            TraceFlags::SAMPLED,
            true,
            TraceState::default(),
        );

        Some(opentelemetry::Context::new().with_remote_span_context(span_context))
    }
}

/// Which continuation a response belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RequestKind {
    /// A movie list fetch for the committed search term.
    Movies {
        /// Monotonic id used to discard superseded responses.
        request_id: u64,
        /// Committed term the fetch was issued for (empty = popular).
        query: String,
    },

    /// The one-shot top-N trending read at startup.
    TrendingList,

    /// Lookup of an existing trending entry before recording a search.
    TrendingLookup {
        /// Exact term being recorded.
        query: String,
        /// Top-ranked result of the search, used if a new entry is created.
        movie: Movie,
    },

    /// Creation of a new trending entry with count 1.
    TrendingCreate {
        /// Exact term being recorded.
        query: String,
    },

    /// Increment of an existing trending entry.
    TrendingIncrement {
        /// Exact term being recorded.
        query: String,
        /// Count written by this request.
        count: u64,
    },
}

impl RequestKind {
    /// Short label for logs and span fields.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Movies { .. } => "movies",
            Self::TrendingList => "trending_list",
            Self::TrendingLookup { .. } => "trending_lookup",
            Self::TrendingCreate { .. } => "trending_create",
            Self::TrendingIncrement { .. } => "trending_increment",
        }
    }
}

/// Everything the plugin needs to resume when a response arrives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestContext {
    pub kind: RequestKind,

    /// Trace context of the span that issued the request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trace_context: Option<TraceContext>,
}

/// Generates constructors that capture the current trace context.
macro_rules! request_context_builders {
    (
        $(
            $builder_name:ident($variant:ident { $($field:ident: $ty:ty),* $(,)? })
        ),* $(,)?
    ) => {
        impl RequestContext {
            $(
                #[doc = concat!("Create a ", stringify!($variant), " context with current trace context")]
                #[must_use]
                pub fn $builder_name($($field: $ty),*) -> Self {
                    Self {
                        kind: RequestKind::$variant { $($field,)* },
                        trace_context: TraceContext::from_current(),
                    }
                }
            )*
        }
    };
}

request_context_builders! {
    movies(Movies { request_id: u64, query: String }),
    trending_list(TrendingList {}),
    trending_lookup(TrendingLookup { query: String, movie: Movie }),
    trending_create(TrendingCreate { query: String }),
    trending_increment(TrendingIncrement { query: String, count: u64 }),
}

impl RequestContext {
    /// Serializes this context into the host's context map.
    ///
    /// # Errors
    ///
    /// Returns [`MarqueeError::Decode`] if serialization fails.
    pub fn to_context_map(&self) -> Result<BTreeMap<String, String>> {
        let payload = serde_json::to_string(self)?;
        Ok(BTreeMap::from([(CONTEXT_KEY.to_string(), payload)]))
    }

    /// Reads a context back from the host's context map.
    ///
    /// # Errors
    ///
    /// Returns [`MarqueeError::Context`] if the key is missing or the payload
    /// is not a context this plugin wrote.
    pub fn from_context_map(map: &BTreeMap<String, String>) -> Result<Self> {
        let payload = map
            .get(CONTEXT_KEY)
            .ok_or_else(|| MarqueeError::Context(format!("missing `{CONTEXT_KEY}` entry")))?;

        serde_json::from_str(payload).map_err(|e| MarqueeError::Context(e.to_string()))
    }

    /// Parent context for spans handling the response, if one was captured.
    #[must_use]
    pub fn parent_context(&self) -> Option<opentelemetry::Context> {
        self.trace_context
            .as_ref()
            .and_then(TraceContext::to_parent_context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_survives_the_host_round_trip() {
        let context = RequestContext::trending_lookup("dune".to_string(), Movie::new(7, "Dune"));

        let map = context.to_context_map().unwrap();
        assert!(map.contains_key(CONTEXT_KEY));

        let restored = RequestContext::from_context_map(&map).unwrap();
        assert_eq!(restored, context);
    }

    #[test]
    fn foreign_context_maps_are_rejected() {
        let empty = BTreeMap::new();
        assert!(matches!(
            RequestContext::from_context_map(&empty),
            Err(MarqueeError::Context(_))
        ));

        let garbage = BTreeMap::from([(CONTEXT_KEY.to_string(), "not json".to_string())]);
        assert!(matches!(
            RequestContext::from_context_map(&garbage),
            Err(MarqueeError::Context(_))
        ));
    }

    #[test]
    fn no_trace_context_without_an_otel_layer() {
        let context = RequestContext::movies(1, String::new());
        assert!(context.trace_context.is_none());
        assert!(context.parent_context().is_none());
    }

    #[test]
    fn captured_ids_become_a_remote_parent() {
        use opentelemetry::trace::TraceContextExt;

        let trace = TraceContext {
            trace_id: "4bf92f3577b34da6a3ce929d0e0e4736".to_string(),
            parent_span_id: "00f067aa0ba902b7".to_string(),
        };
        let parent = trace.to_parent_context().unwrap();
        let span = parent.span();
        let span_context = span.span_context();

        assert!(span_context.is_remote());
        assert_eq!(format!("{:016x}", span_context.span_id()), trace.parent_span_id);

        let bad = TraceContext {
            trace_id: "zz".to_string(),
            parent_span_id: String::new(),
        };
        assert!(bad.to_parent_context().is_none());
    }
}
