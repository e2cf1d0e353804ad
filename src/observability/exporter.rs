//! Span exporter writing OTLP/JSON lines to a rotating file.

use super::otlp::TracesData;
use super::rotating::RotatingFile;
use futures_util::future::BoxFuture;
use opentelemetry::trace::TraceError;
use opentelemetry_sdk::export::trace::{ExportResult, SpanData, SpanExporter};
use opentelemetry_sdk::resource::Resource;
use opentelemetry_sdk::trace::{Config, TracerProvider};
use std::future::ready;

/// Writes each exported batch as one JSON line.
#[derive(Debug)]
pub struct FileSpanExporter {
    file: RotatingFile,
    resource: Resource,
    is_shutdown: bool,
}

impl FileSpanExporter {
    #[must_use]
    pub const fn new(file: RotatingFile, resource: Resource) -> Self {
        Self {
            file,
            resource,
            is_shutdown: false,
        }
    }

    fn write_batch(&mut self, batch: &[SpanData]) -> ExportResult {
        let record = TracesData::from_batch(&self.resource, batch);
        let line = serde_json::to_string(&record).map_err(|e| TraceError::from(e.to_string()))?;
        self.file
            .append_line(&line)
            .map_err(|e| TraceError::from(e.to_string()))
    }
}

impl SpanExporter for FileSpanExporter {
    fn export(&mut self, batch: Vec<SpanData>) -> BoxFuture<'static, ExportResult> {
        let result = if self.is_shutdown {
            Err(TraceError::from("exporter is shut down"))
        } else {
            self.write_batch(&batch)
        };
        Box::pin(ready(result))
    }

    fn shutdown(&mut self) {
        self.is_shutdown = true;
    }

    fn set_resource(&mut self, resource: &Resource) {
        self.resource = resource.clone();
    }
}

/// Builds a provider exporting every span synchronously to `file`.
#[must_use]
pub fn create_tracer_provider(file: RotatingFile, resource: Resource) -> TracerProvider {
    let exporter = FileSpanExporter::new(file, resource.clone());

    TracerProvider::builder()
        .with_config(Config::default().with_resource(resource))
        .with_simple_exporter(exporter)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use opentelemetry::trace::{Span as _, Tracer as _, TracerProvider as _};
    use opentelemetry::KeyValue;

    #[test]
    fn finished_spans_land_in_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("zinema-otlp.json");
        let resource = Resource::new(vec![KeyValue::new("service.name", "Zinema")]);
        let provider = create_tracer_provider(RotatingFile::new(path.clone(), 1 << 20, 1), resource);

        let tracer = provider.tracer("test");
        let mut span = tracer.start("fetch");
        span.set_attribute(KeyValue::new("query", "heat"));
        span.end();

        let contents = std::fs::read_to_string(&path).unwrap();
        let line = contents.lines().next().unwrap();
        let data: serde_json::Value = serde_json::from_str(line).unwrap();
        let span = &data["resourceSpans"][0]["scopeSpans"][0]["spans"][0];

        assert_eq!(span["name"], "fetch");
        assert_eq!(span["attributes"][0]["value"]["stringValue"], "heat");
        assert_eq!(span["traceId"].as_str().unwrap().len(), 32);
    }

    #[test]
    fn shut_down_exporter_rejects_batches() {
        let dir = tempfile::tempdir().unwrap();
        let file = RotatingFile::new(dir.path().join("t.json"), 1024, 0);
        let mut exporter = FileSpanExporter::new(file, Resource::empty());

        exporter.shutdown();
        let result = futures_util::FutureExt::now_or_never(exporter.export(vec![]));
        assert!(matches!(result, Some(Err(_))));
    }
}
