//! Span exporter writing one compact JSON object per finished span.
//!
//! Each line looks like:
//!
//! ```json
//! {"name":"handle_response","traceId":"…","spanId":"…","parentSpanId":"…",
//!  "startTimeUnixNano":"…","endTimeUnixNano":"…","attributes":{"kind":"movies"},
//!  "status":"unset"}
//! ```
//!
//! Lines are self-contained so the file can be tailed or grepped while the
//! plugin runs.

use super::sink::RotatingSink;
use futures_util::future::BoxFuture;
use opentelemetry::trace::{SpanId, Status, TraceError};
use opentelemetry::{KeyValue, Value};
use opentelemetry_sdk::export::trace::{ExportResult, SpanData, SpanExporter};
use opentelemetry_sdk::resource::Resource;
use opentelemetry_sdk::trace::{Config, TracerProvider};
use serde_json::{json, Map, Value as JsonValue};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// OpenTelemetry exporter backed by a [`RotatingSink`].
#[derive(Debug)]
pub struct JsonlSpanExporter {
    sink: RotatingSink,
    is_shutdown: AtomicBool,
}

impl JsonlSpanExporter {
    #[must_use]
    pub const fn new(sink: RotatingSink) -> Self {
        Self {
            sink,
            is_shutdown: AtomicBool::new(false),
        }
    }

    fn write_batch(&self, batch: &[SpanData]) -> std::io::Result<()> {
        for span in batch {
            self.sink.write_line(&format_span(span).to_string())?;
        }
        Ok(())
    }
}

impl SpanExporter for JsonlSpanExporter {
    fn export(&mut self, batch: Vec<SpanData>) -> BoxFuture<'static, ExportResult> {
        if self.is_shutdown.load(Ordering::SeqCst) {
            return Box::pin(std::future::ready(Err(TraceError::from(
                "exporter is shut down",
            ))));
        }

        let result = self
            .write_batch(&batch)
            .map_err(|e| TraceError::from(e.to_string()));
        Box::pin(std::future::ready(result))
    }

    fn shutdown(&mut self) {
        self.is_shutdown.store(true, Ordering::SeqCst);
    }
}

/// Builds a tracer provider that exports every span as soon as it ends.
#[must_use]
pub fn create_tracer_provider(file_path: PathBuf, resource: Resource) -> TracerProvider {
    let exporter = JsonlSpanExporter::new(RotatingSink::new(file_path));

    TracerProvider::builder()
        .with_config(Config::default().with_resource(resource))
        .with_simple_exporter(exporter)
        .build()
}

fn format_span(span: &SpanData) -> JsonValue {
    let parent = if span.parent_span_id == SpanId::INVALID {
        String::new()
    } else {
        format!("{:016x}", span.parent_span_id)
    };

    let (status, status_message) = match &span.status {
        Status::Unset => ("unset", String::new()),
        Status::Ok => ("ok", String::new()),
        Status::Error { description } => ("error", description.to_string()),
    };

    json!({
        "name": span.name,
        "traceId": format!("{:032x}", span.span_context.trace_id()),
        "spanId": format!("{:016x}", span.span_context.span_id()),
        "parentSpanId": parent,
        "startTimeUnixNano": unix_nanos(span.start_time),
        "endTimeUnixNano": unix_nanos(span.end_time),
        "attributes": format_attributes(&span.attributes),
        "status": status,
        "statusMessage": status_message,
    })
}

fn unix_nanos(time: SystemTime) -> String {
    time.duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos()
        .to_string()
}

fn format_attributes(attributes: &[KeyValue]) -> JsonValue {
    let map: Map<String, JsonValue> = attributes
        .iter()
        .map(|kv| (kv.key.to_string(), attribute_value(&kv.value)))
        .collect();
    JsonValue::Object(map)
}

fn attribute_value(value: &Value) -> JsonValue {
    match value {
        Value::Bool(b) => json!(b),
        Value::I64(i) => json!(i),
        Value::F64(f) => json!(f),
        Value::String(s) => json!(s.as_str()),
        Value::Array(_) => json!(value.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use opentelemetry::trace::{Span, Tracer, TracerProvider as _};

    #[test]
    fn finished_spans_become_json_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("spans.jsonl");
        let provider = create_tracer_provider(path.clone(), Resource::empty());
        let tracer = provider.tracer("test");

        let mut span = tracer
            .span_builder("fetch_movies")
            .with_attributes(vec![KeyValue::new("query", "dune"), KeyValue::new("page", 1_i64)])
            .start(&tracer);
        span.end();

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 1);

        let line: JsonValue = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(line["name"], "fetch_movies");
        assert_eq!(line["attributes"]["query"], "dune");
        assert_eq!(line["attributes"]["page"], 1);
        assert_eq!(line["parentSpanId"], "");
        assert_eq!(line["traceId"].as_str().unwrap().len(), 32);
    }

    #[test]
    fn attribute_values_keep_their_json_type() {
        assert_eq!(attribute_value(&Value::Bool(true)), json!(true));
        assert_eq!(attribute_value(&Value::F64(7.5)), json!(7.5));
        assert_eq!(attribute_value(&Value::from("x")), json!("x"));
    }
}
