//! Network layer: request construction and response interpretation.
//!
//! Nothing in this module performs I/O. Requests are plain values executed by
//! the plugin shim through Zellij's `web_request`; responses come back as
//! events and are interpreted here.
//!
//! # Modules
//!
//! - [`http`]: Request/response value types
//! - [`messages`]: Request context and trace propagation across the round trip
//! - [`tmdb`]: Movie metadata provider client

pub mod http;
pub mod messages;
pub mod tmdb;

pub use http::{HttpRequest, HttpResponse, Verb};
pub use messages::{RequestContext, RequestKind, TraceContext};
pub use tmdb::MovieClient;
