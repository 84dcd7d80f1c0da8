//! Request lifecycle tracking.

use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Render progress of a single request.
///
/// `ShellPending` moves to `ShellRendered` once and never back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShellState {
    /// The shell has not been produced yet.
    #[default]
    ShellPending,
    /// The shell was produced; later errors are streaming errors.
    ShellRendered,
}

impl ShellState {
    /// Whether the shell has been rendered.
    pub fn is_rendered(&self) -> bool {
        matches!(self, Self::ShellRendered)
    }
}

/// Timing context for observability.
#[derive(Debug, Clone)]
pub struct TimingContext {
    start: Instant,
    marks: HashMap<String, Instant>,
}

impl TimingContext {
    /// Create a new timing context.
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
            marks: HashMap::new(),
        }
    }

    /// Record a timing mark.
    pub fn mark(&mut self, name: &str) {
        self.marks.insert(name.to_string(), Instant::now());
    }

    /// Get elapsed time since start.
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Time from start to a recorded mark.
    pub fn since_start(&self, name: &str) -> Option<Duration> {
        self.marks.get(name).map(|t| t.duration_since(self.start))
    }

    /// Get time to shell.
    pub fn time_to_shell(&self) -> Option<Duration> {
        self.since_start("shell_sent")
    }
}

impl Default for TimingContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shell_state_default_pending() {
        let state = ShellState::default();
        assert_eq!(state, ShellState::ShellPending);
        assert!(!state.is_rendered());
        assert!(ShellState::ShellRendered.is_rendered());
    }

    #[test]
    fn test_timing_marks() {
        let mut timing = TimingContext::new();
        assert!(timing.time_to_shell().is_none());

        timing.mark("shell_sent");
        assert!(timing.time_to_shell().is_some());
        assert!(timing.since_start("missing").is_none());
    }
}
