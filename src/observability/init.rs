//! Subscriber setup: `tracing` macros flow through OpenTelemetry into the
//! rotating trace file.

use super::export;
use super::sink::{RotatingSink, DEFAULT_MAX_BYTES};
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// File name of the live trace file inside the data directory.
pub const TRACE_FILE_NAME: &str = "vibio-otlp.json";

const DEFAULT_LEVEL: &str = "info";

/// Installs the global subscriber.
///
/// The filter comes from `config.trace_level`, falling back to `info`.
/// Tracing is optional: if the data directory cannot be created the plugin
/// runs without a subscriber. Only the first call takes effect.
///
/// ```rust
/// use vibio::observability::init_tracing;
/// use vibio::Config;
///
/// init_tracing(&Config {
///     trace_level: Some("vibio=debug".to_string()),
///     ..Default::default()
/// });
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(config: &Config) {
    let filter = config.trace_level.as_deref().unwrap_or(DEFAULT_LEVEL);

    let data_dir = crate::infrastructure::paths::get_data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return;
    }

    let resource = Resource::new(vec![KeyValue::new("service.name", export::SCOPE_NAME)]);
    let sink = RotatingSink::new(data_dir.join(TRACE_FILE_NAME), DEFAULT_MAX_BYTES);
    let provider = export::tracer_provider(sink, resource);

    let _ = tracing_subscriber::registry()
        .with(EnvFilter::new(filter))
        .with(OpenTelemetryLayer::new(provider.tracer(export::SCOPE_NAME)))
        .try_init();
}
