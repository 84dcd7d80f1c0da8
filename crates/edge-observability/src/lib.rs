//! Observability infrastructure for the edge streaming SSR platform.
//!
//! This crate provides:
//! - `StructuredLogger` - Structured logging with request context
//! - `LogSink` - Pluggable log output (stderr, `tracing`, in-memory)

mod logging;
mod sink;

pub use logging::*;
pub use sink::*;

// Re-export RequestId from edge-core for convenience
pub use edge_core::RequestId;
