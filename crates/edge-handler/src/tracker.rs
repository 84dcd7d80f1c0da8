//! Per-request render tracking: shell state, final status, error count.

use std::sync::atomic::{AtomicU16, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use edge_core::{RenderError, ShellState};
use edge_observability::StructuredLogger;
use http::StatusCode;

/// Tracks one render from shell construction to the last section.
///
/// Shared between the adapter and the renderer's error callback.
#[derive(Debug)]
pub struct RenderTracker {
    state: Mutex<ShellState>,
    status: AtomicU16,
    errors_logged: AtomicUsize,
    logger: StructuredLogger,
}

impl RenderTracker {
    /// Start tracking with the caller's initial status.
    pub fn new(status: StatusCode, logger: StructuredLogger) -> Self {
        Self {
            state: Mutex::new(ShellState::ShellPending),
            status: AtomicU16::new(status.as_u16()),
            errors_logged: AtomicUsize::new(0),
            logger,
        }
    }

    /// Current shell state.
    pub fn state(&self) -> ShellState {
        *self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Record that the shell has been produced.
    pub fn mark_shell_rendered(&self) {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        *state = ShellState::ShellRendered;
    }

    /// Handle an error reported by the renderer.
    ///
    /// Shell errors are left to the caller, which receives them as `Err`.
    /// Streaming errors are logged and force a 500.
    pub fn on_render_error(&self, error: &RenderError) {
        match self.state() {
            ShellState::ShellPending => {}
            ShellState::ShellRendered => {
                self.status
                    .store(StatusCode::INTERNAL_SERVER_ERROR.as_u16(), Ordering::SeqCst);
                self.errors_logged.fetch_add(1, Ordering::SeqCst);
                self.logger
                    .error_builder("Streaming render error")
                    .field("error", error.to_string())
                    .field_i64("status", 500)
                    .emit();
            }
        }
    }

    /// Status the response should carry.
    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.status.load(Ordering::SeqCst))
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Number of streaming errors logged.
    pub fn errors_logged(&self) -> usize {
        self.errors_logged.load(Ordering::SeqCst)
    }
}

/// Handle to a request's tracker, attached to the response extensions.
///
/// Lets the host inspect errors that surface after the response was
/// returned (progressive delivery).
#[derive(Debug, Clone)]
pub struct RenderReport(pub(crate) Arc<RenderTracker>);

impl RenderReport {
    /// Current status; may become 500 while the body streams.
    pub fn status(&self) -> StatusCode {
        self.0.status()
    }

    /// Current shell state.
    pub fn state(&self) -> ShellState {
        self.0.state()
    }

    /// Number of streaming errors logged so far.
    pub fn errors_logged(&self) -> usize {
        self.0.errors_logged()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use edge_core::RequestId;
    use edge_observability::{LogLevel, MemorySink};

    use super::*;

    fn tracker() -> (RenderTracker, Arc<MemorySink>) {
        let sink = Arc::new(MemorySink::new());
        let logger = StructuredLogger::new(RequestId::from_string("r")).with_sink(sink.clone());
        (RenderTracker::new(StatusCode::OK, logger), sink)
    }

    #[test]
    fn test_pending_errors_not_logged() {
        let (tracker, sink) = tracker();

        tracker.on_render_error(&RenderError::Shell("boom".to_string()));

        assert_eq!(tracker.status(), StatusCode::OK);
        assert_eq!(tracker.errors_logged(), 0);
        assert!(sink.entries().is_empty());
    }

    #[test]
    fn test_rendered_errors_logged_and_500() {
        let (tracker, sink) = tracker();
        tracker.mark_shell_rendered();

        tracker.on_render_error(&RenderError::section("outlet", "boom"));

        assert_eq!(tracker.state(), ShellState::ShellRendered);
        assert_eq!(tracker.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(tracker.errors_logged(), 1);

        let errors = sink.at_level(LogLevel::Error);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].field_str("error").unwrap().contains("outlet"));
    }

    #[test]
    fn test_report_reflects_tracker() {
        let (tracker, _sink) = tracker();
        let report = RenderReport(Arc::new(tracker));

        assert_eq!(report.state(), ShellState::ShellPending);
        report.0.mark_shell_rendered();
        report.0.on_render_error(&RenderError::Stream("x".to_string()));
        assert_eq!(report.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(report.errors_logged(), 1);
    }
}
