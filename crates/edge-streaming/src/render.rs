//! Renderer interface and the shell-first render stream.

use std::collections::VecDeque;
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use edge_core::RenderError;

use crate::section::{DeferredSection, Section};

/// Callback invoked for every render error, before and after the shell.
pub type ErrorCallback = Arc<dyn Fn(&RenderError) + Send + Sync>;

/// Options passed to a renderer for one render.
#[derive(Clone)]
pub struct RenderOptions {
    on_error: ErrorCallback,
}

impl RenderOptions {
    /// Options with an error callback.
    pub fn new(on_error: ErrorCallback) -> Self {
        Self { on_error }
    }

    /// Options with an error callback from a closure.
    pub fn on_error<F>(callback: F) -> Self
    where
        F: Fn(&RenderError) + Send + Sync + 'static,
    {
        Self::new(Arc::new(callback))
    }

    /// Report an error to the registered callback.
    pub fn report(&self, error: &RenderError) {
        (self.on_error)(error);
    }

    /// The registered callback.
    pub fn callback(&self) -> ErrorCallback {
        self.on_error.clone()
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::on_error(|_| {})
    }
}

impl std::fmt::Debug for RenderOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderOptions").finish_non_exhaustive()
    }
}

/// Route-level render context produced by the router and loaders.
///
/// Opaque to the request adapter apart from `spa_mode`.
#[derive(Debug, Clone, Default)]
pub struct RenderContext {
    /// Matched route identifier.
    pub route_id: String,
    /// Render the complete page before responding.
    pub spa_mode: bool,
    /// Loader results keyed by route id.
    pub loader_data: serde_json::Value,
}

impl RenderContext {
    /// Create a context for a route.
    pub fn new(route_id: impl Into<String>) -> Self {
        Self {
            route_id: route_id.into(),
            spa_mode: false,
            loader_data: serde_json::Value::Null,
        }
    }

    /// Set SPA mode.
    pub fn with_spa_mode(mut self, spa_mode: bool) -> Self {
        self.spa_mode = spa_mode;
        self
    }

    /// Attach loader data for a route.
    pub fn with_loader_data(mut self, route_id: &str, data: serde_json::Value) -> Self {
        if !self.loader_data.is_object() {
            self.loader_data = serde_json::Value::Object(serde_json::Map::new());
        }
        if let Some(map) = self.loader_data.as_object_mut() {
            map.insert(route_id.to_string(), data);
        }
        self
    }

    /// Loader data for a route, if any.
    pub fn route_data(&self, route_id: &str) -> Option<&serde_json::Value> {
        self.loader_data.get(route_id)
    }
}

/// Renders a route into a shell-first stream.
///
/// Errors before the shell exists are reported to the callback and
/// returned. Later errors only go to the callback.
#[async_trait]
pub trait StreamRenderer: Send + Sync {
    /// Render a page for `url`.
    async fn render(
        &self,
        context: &RenderContext,
        url: &str,
        options: RenderOptions,
    ) -> Result<RenderStream, RenderError>;
}

#[async_trait]
impl<T: StreamRenderer + ?Sized> StreamRenderer for Arc<T> {
    async fn render(
        &self,
        context: &RenderContext,
        url: &str,
        options: RenderOptions,
    ) -> Result<RenderStream, RenderError> {
        (**self).render(context, url, options).await
    }
}

/// A rendered shell followed by deferred sections and a closing chunk.
pub struct RenderStream {
    shell: Option<Vec<u8>>,
    pending: VecDeque<DeferredSection>,
    rendered: VecDeque<Vec<u8>>,
    closing: Option<Vec<u8>>,
    on_error: ErrorCallback,
    sections_done: Vec<String>,
}

impl RenderStream {
    /// Start a stream from shell HTML.
    pub fn builder(shell_html: impl Into<String>) -> RenderStreamBuilder {
        RenderStreamBuilder::new(shell_html)
    }

    /// Whether every section has been rendered.
    pub fn is_all_ready(&self) -> bool {
        self.pending.is_empty()
    }

    /// Names of sections rendered so far, in order.
    pub fn sections_done(&self) -> &[String] {
        &self.sections_done
    }

    /// Render every remaining section into the buffer.
    pub async fn all_ready(&mut self) {
        while let Some(deferred) = self.pending.pop_front() {
            let chunk = self.resolve(deferred).await;
            self.rendered.push_back(chunk);
        }
    }

    /// Next body chunk, rendering the next section on demand.
    pub async fn next_chunk(&mut self) -> Option<Vec<u8>> {
        if let Some(shell) = self.shell.take() {
            return Some(shell);
        }
        if let Some(chunk) = self.rendered.pop_front() {
            return Some(chunk);
        }
        if let Some(deferred) = self.pending.pop_front() {
            return Some(self.resolve(deferred).await);
        }
        self.closing.take()
    }

    async fn resolve(&mut self, deferred: DeferredSection) -> Vec<u8> {
        let DeferredSection { section, future } = deferred;

        let html = match future.await {
            Ok(html) => html,
            Err(err) => {
                let err = if matches!(err, RenderError::Section { .. }) {
                    err
                } else {
                    RenderError::section(section.name.clone(), err.to_string())
                };
                (self.on_error)(&err);
                section.fallback_html().to_string()
            }
        };

        self.sections_done.push(section.name);
        html.into_bytes()
    }
}

impl std::fmt::Debug for RenderStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderStream")
            .field("pending", &self.pending.len())
            .field("rendered", &self.rendered.len())
            .field("sections_done", &self.sections_done)
            .finish_non_exhaustive()
    }
}

/// Builder for [`RenderStream`].
pub struct RenderStreamBuilder {
    shell: String,
    sections: VecDeque<DeferredSection>,
    closing: String,
}

impl RenderStreamBuilder {
    /// Create a builder from shell HTML.
    pub fn new(shell_html: impl Into<String>) -> Self {
        Self {
            shell: shell_html.into(),
            sections: VecDeque::new(),
            closing: String::new(),
        }
    }

    /// Append a deferred section.
    pub fn defer<F>(mut self, section: Section, future: F) -> Self
    where
        F: Future<Output = Result<String, RenderError>> + Send + 'static,
    {
        self.sections.push_back(DeferredSection::new(section, future));
        self
    }

    /// Set the closing HTML.
    pub fn closing(mut self, html: impl Into<String>) -> Self {
        self.closing = html.into();
        self
    }

    /// Finish the stream, reporting section errors to `options`.
    pub fn build(self, options: &RenderOptions) -> RenderStream {
        RenderStream {
            shell: Some(self.shell.into_bytes()),
            pending: self.sections,
            rendered: VecDeque::new(),
            closing: if self.closing.is_empty() {
                None
            } else {
                Some(self.closing.into_bytes())
            },
            on_error: options.callback(),
            sections_done: Vec::new(),
        }
    }
}
