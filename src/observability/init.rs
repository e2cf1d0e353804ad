//! Tracing subscriber setup.

use super::exporter::create_tracer_provider;
use super::rotating::{RotatingFile, DEFAULT_BACKUPS, DEFAULT_MAX_BYTES};
use crate::infrastructure::paths;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when the configuration sets no `trace_level`.
pub const DEFAULT_TRACE_LEVEL: &str = "info";

/// Installs the global subscriber exporting spans to the plugin data directory.
///
/// Returns `false` without side effects if the directory cannot be created or
/// a subscriber is already installed, so calling it twice is harmless.
pub fn init_tracing(level: Option<&str>) -> bool {
    let data_dir = paths::data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return false;
    }

    let filter = EnvFilter::try_new(level.unwrap_or(DEFAULT_TRACE_LEVEL))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_TRACE_LEVEL));

    let resource = Resource::new(vec![
        KeyValue::new("service.name", "Zinema"),
        KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
    ]);
    let file = RotatingFile::new(paths::trace_file(), DEFAULT_MAX_BYTES, DEFAULT_BACKUPS);
    let provider = create_tracer_provider(file, resource);

    tracing_subscriber::registry()
        .with(filter)
        .with(OpenTelemetryLayer::new(provider.tracer("Zinema")))
        .try_init()
        .is_ok()
}
