//! HTTP adapter for streaming renders.
//!
//! - `RenderAdapter` - Turns a `StreamRenderer` into responses, buffering the
//!   full document for crawlers and SPA mode
//! - `RenderTracker` / `RenderReport` - Shell state and late errors of a request

mod adapter;
mod tracker;

pub use adapter::*;
pub use tracker::*;
