//! OpenTelemetry tracing exported to a local file.
//!
//! `tracing` spans and events are bridged through `tracing-opentelemetry` to
//! an SDK tracer whose exporter appends one OTLP/JSON line per span to
//! `zinema-otlp.json` under the plugin data directory. The file rotates by
//! size so it never grows without bound.
//!
//! - [`rotating`]: size-rotated line file
//! - [`otlp`]: serializable OTLP/JSON records
//! - [`exporter`]: the span exporter and provider builder
//! - `init`: global subscriber installation

pub mod exporter;
mod init;
pub mod otlp;
pub mod rotating;

pub use init::{init_tracing, DEFAULT_TRACE_LEVEL};
