//! Public SDK for the edge streaming SSR platform.
//!
//! This crate re-exports all platform functionality:
//!
//! ```ignore
//! use edge_sdk::prelude::*;
//!
//! let adapter = RenderAdapter::new(renderer, classifier, logger);
//! let load_context = LoadContext::new(RequestId::generate(), bindings);
//!
//! let data = load_sidebar(&request, &load_context, &store).await?;
//! let context = RenderContext::new("root").with_loader_data("root", serde_json::to_value(data)?);
//!
//! let response = adapter
//!     .handle(&request, StatusCode::OK, HeaderMap::new(), &context, &load_context)
//!     .await?;
//! ```

pub use edge_core;
pub use edge_data;
pub use edge_handler;
pub use edge_observability;
pub use edge_security;
pub use edge_streaming;

/// Prelude for convenient imports.
pub mod prelude {
    pub use edge_core::*;
    pub use edge_data::*;
    pub use edge_handler::*;
    pub use edge_observability::*;
    pub use edge_security::*;
    pub use edge_streaming::*;
}
