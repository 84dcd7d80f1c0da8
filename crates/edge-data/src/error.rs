//! Error types for contact storage.

/// Error type for store operations.
#[derive(Debug, Clone, thiserror::Error)]
pub enum DataError {
    #[error("No contact found for {0}")]
    NotFound(String),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}
