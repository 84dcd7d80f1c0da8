//! Contact data layer.
//!
//! This crate provides:
//! - `Contact` / `ContactUpdate` - Contact records and partial updates
//! - `ContactStore` - Async store interface used by route loaders
//! - `InMemoryContactStore` - Process-local store with demo data

mod contact;
mod error;
mod seed;
mod store;

pub use contact::*;
pub use error::*;
pub use seed::*;
pub use store::*;
