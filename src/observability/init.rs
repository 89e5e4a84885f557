//! Tracing initialization and subscriber setup.

use super::exporter;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// File name of the span log inside the data directory.
pub const SPAN_FILE_NAME: &str = "marquee-spans.jsonl";

/// Installs the global tracing subscriber.
///
/// Sets up a pipeline that:
/// 1. Filters spans and events with an `EnvFilter` built from `trace_level`
/// 2. Bridges them to OpenTelemetry
/// 3. Writes each finished span as one JSON line to the data directory
///
/// # Initialization Behavior
///
/// - Creates the data directory if it doesn't exist
/// - Silently returns if directory creation fails; the plugin runs untraced
/// - Idempotent: only the first successful call installs a subscriber
///
/// # Example
///
/// ```rust
/// use marquee::observability::init_tracing;
/// use marquee::Config;
///
/// let config = Config {
///     trace_level: "debug".to_string(),
///     ..Default::default()
/// };
///
/// init_tracing(&config);
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(config: &Config) {
    let data_dir = crate::infrastructure::paths::get_data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return;
    }

    let resource = Resource::new(vec![KeyValue::new("service.name", "Marquee")]);
    let provider = exporter::create_tracer_provider(data_dir.join(SPAN_FILE_NAME), resource);

    let tracer = provider.tracer("Marquee");
    let otel_layer = OpenTelemetryLayer::new(tracer);

    let filter = EnvFilter::try_new(&config.trace_level).unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(otel_layer)
        .try_init();
}
