//! Contacts address book - Reference workload.
//!
//! Demonstrates the request adapter with:
//! - A root loader reading the `q` search parameter and a `link_title` binding
//! - A shell carrying the sidebar, with the page outlet streamed after it
//! - Fully rendered responses for crawlers and SPA mode
//! - Form posts that create, favorite and delete contacts

mod actions;
mod app;
mod renderer;
mod sidebar;
mod views;

#[cfg(target_arch = "wasm32")]
mod component;

pub use actions::Action;
pub use app::{header_entries, AppError, ContactsApp};
pub use renderer::{PageRenderer, Route, OUTLET_SECTION, ROOT_ROUTE};
pub use sidebar::{load_sidebar, LoaderError, SidebarData, LINK_TITLE_BINDING};
pub use views::{render_contact, render_index, render_not_found, render_sidebar};
