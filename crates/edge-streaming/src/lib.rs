//! Streaming primitives for shell-first SSR.
//!
//! This crate enforces shell-first streaming patterns:
//! - `StreamRenderer` - Renders a route into a `RenderStream`
//! - `RenderStream` - Shell, deferred sections, closing chunk
//! - `HtmlBody` - Response body over a render stream
//! - `Shell` - Shell template abstraction
//! - `DeliveryMode` - Progressive vs. all-ready delivery

mod body;
mod delivery;
mod render;
mod section;
mod shell;

pub use body::*;
pub use delivery::*;
pub use render::*;
pub use section::*;
pub use shell::*;
