//! OpenTelemetry-based observability with file-based span export.
//!
//! ```text
//! tracing macros → tracing-opentelemetry → OpenTelemetry SDK → JsonlSpanExporter → RotatingSink
//! ```
//!
//! Spans land in `~/.local/share/zellij/marquee/marquee-spans.jsonl`, one JSON
//! object per line. The file rotates to a single `.1` backup above 5 MiB.
//!
//! Requests sent through the host carry the issuing span's trace context, so a
//! `handle_response` span is parented to the `handle_event` span that sent the
//! request even though the response arrives in a later callback.
//!
//! # Modules
//!
//! - [`init`]: Subscriber setup
//! - [`exporter`]: Span exporter and tracer provider
//! - [`sink`]: Rotating line writer

pub mod exporter;
pub mod init;
pub mod sink;

pub use init::init_tracing;
