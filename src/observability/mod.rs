//! Tracing pipeline with file-based OTLP export.
//!
//! ```text
//! tracing macros → tracing-opentelemetry → SDK TracerProvider → JsonLinesExporter → RotatingSink
//! ```
//!
//! Each exported batch becomes one line of OTLP JSON in
//! `~/.local/share/zellij/vibio/vibio-otlp.json`. The file rotates past 10 MB
//! and keeps three numbered backups.
//!
//! Search requests are recorded in the `handle_event` span together with the
//! request id, latency and, on failure, `failure.kind`. Response bodies and
//! full URLs are never logged.

mod export;
mod init;
mod sink;

pub use init::{init_tracing, TRACE_FILE_NAME};
pub use sink::RotatingSink;
