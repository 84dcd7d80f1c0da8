//! Core abstractions for the edge streaming SSR platform.
//!
//! This crate provides the fundamental types and traits:
//! - `RequestContext` / `LoadContext` - Typed request data for loaders
//! - `Bindings` - Host-injected configuration values
//! - `AppConfig` - Application configuration file
//! - `ShellState` - Render progress of a request

mod bindings;
mod config;
mod context;
mod error;
mod lifecycle;

pub use bindings::*;
pub use config::*;
pub use context::*;
pub use error::*;
pub use lifecycle::*;
