//! Explicit delivery control: stream progressively or wait for all content.

/// How a rendered page is handed to the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeliveryMode {
    /// Return right after the shell; sections stream as they render.
    #[default]
    Progressive,
    /// Render every section before returning the response.
    AllReady,
}

impl DeliveryMode {
    /// Pick the mode for a request.
    ///
    /// Crawlers and SPA-mode renders get the complete document.
    pub fn select(is_crawler: bool, spa_mode: bool) -> Self {
        if is_crawler || spa_mode {
            Self::AllReady
        } else {
            Self::Progressive
        }
    }

    /// Whether the response waits for all content.
    pub fn waits_for_all_ready(&self) -> bool {
        matches!(self, Self::AllReady)
    }

    /// Short name for logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Progressive => "progressive",
            Self::AllReady => "all_ready",
        }
    }
}
