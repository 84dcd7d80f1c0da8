//! Section abstraction for independently streamable page parts.

use std::future::Future;

use edge_core::RenderError;
use futures::future::BoxFuture;
use futures::FutureExt;

/// Future producing a section's HTML.
pub type SectionFuture = BoxFuture<'static, Result<String, RenderError>>;

/// A section is a named, independently-streamable part of the page.
#[derive(Debug, Clone)]
pub struct Section {
    /// Section name (used for logs and error reports).
    pub name: String,
    /// Fallback HTML emitted when the section fails.
    pub fallback: Option<String>,
}

impl Section {
    /// Create a new section.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fallback: None,
        }
    }

    /// Create a section using the builder.
    pub fn builder(name: impl Into<String>) -> SectionBuilder {
        SectionBuilder::new(name)
    }

    /// HTML to emit in place of a failed section.
    pub fn fallback_html(&self) -> &str {
        self.fallback.as_deref().unwrap_or("")
    }
}

/// Builder for ergonomic section definition.
pub struct SectionBuilder {
    name: String,
    fallback: Option<String>,
}

impl SectionBuilder {
    /// Create a new section builder.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fallback: None,
        }
    }

    /// Set fallback HTML.
    pub fn with_fallback(mut self, html: impl Into<String>) -> Self {
        self.fallback = Some(html.into());
        self
    }

    /// Build the section.
    pub fn build(self) -> Section {
        Section {
            name: self.name,
            fallback: self.fallback,
        }
    }
}

/// A section paired with the work that renders it.
///
/// The future is not polled until the body reaches the section.
pub struct DeferredSection {
    /// Section metadata.
    pub section: Section,
    /// Pending render.
    pub future: SectionFuture,
}

impl DeferredSection {
    /// Pair a section with its render future.
    pub fn new<F>(section: Section, future: F) -> Self
    where
        F: Future<Output = Result<String, RenderError>> + Send + 'static,
    {
        Self {
            section,
            future: future.boxed(),
        }
    }
}

impl std::fmt::Debug for DeferredSection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeferredSection")
            .field("section", &self.section)
            .finish_non_exhaustive()
    }
}
