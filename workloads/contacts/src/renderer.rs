//! Page renderer: sidebar shell plus a deferred outlet.

use std::sync::Arc;

use async_trait::async_trait;
use edge_sdk::edge_core::{decode_component, RenderError};
use edge_sdk::edge_data::ContactStore;
use edge_sdk::edge_streaming::{
    HeadContent, RenderContext, RenderOptions, RenderStream, Section, Shell, StreamRenderer,
};

use crate::sidebar::SidebarData;
use crate::views::{
    render_contact, render_index, render_not_found, render_outlet_fallback, render_sidebar,
    CONTACTS_STYLES,
};

/// Route id of the root loader.
pub const ROOT_ROUTE: &str = "root";

/// Section name of the page outlet.
pub const OUTLET_SECTION: &str = "outlet";

/// Pages served by the workload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Index,
    Contact(String),
    NotFound,
}

impl Route {
    /// Match a request path, ignoring any query string.
    pub fn resolve(path: &str) -> Self {
        let path = path.split('?').next().unwrap_or_default();
        let path = path.trim_end_matches('/');

        if path.is_empty() {
            return Route::Index;
        }

        match path.strip_prefix("/contacts/") {
            Some(id) if !id.is_empty() && !id.contains('/') => {
                Route::Contact(decode_component(id))
            }
            _ => Route::NotFound,
        }
    }

    /// Route identifier used in the render context.
    pub fn id(&self) -> &'static str {
        match self {
            Route::Index => "routes/_index",
            Route::Contact(_) => "routes/contacts.$contactId",
            Route::NotFound => "routes/$",
        }
    }
}

/// Renders contacts pages from the root loader data.
pub struct PageRenderer {
    store: Arc<dyn ContactStore>,
    title: String,
}

impl PageRenderer {
    /// Create a renderer reading contacts from `store`.
    pub fn new(store: Arc<dyn ContactStore>, title: impl Into<String>) -> Self {
        Self {
            store,
            title: title.into(),
        }
    }

    fn shell(&self, sidebar: &SidebarData) -> Shell {
        Shell::new(
            HeadContent::new(&self.title)
                .with_meta("viewport", "width=device-width, initial-scale=1")
                .with_style(CONTACTS_STYLES),
        )
        .with_body_start(format!(
            "<body>\n{}<div id=\"detail\">\n",
            render_sidebar(sidebar)
        ))
        .with_body_end("\n</div>\n</body>\n</html>")
    }
}

fn sidebar_data(context: &RenderContext) -> Result<SidebarData, RenderError> {
    let value = context
        .route_data(ROOT_ROUTE)
        .ok_or_else(|| RenderError::Shell("missing root loader data".to_string()))?;

    serde_json::from_value(value.clone())
        .map_err(|e| RenderError::Shell(format!("invalid root loader data: {}", e)))
}

fn url_path(url: &str) -> String {
    match url.parse::<http::Uri>() {
        Ok(uri) => uri.path().to_string(),
        Err(_) => url.split('?').next().unwrap_or_default().to_string(),
    }
}

#[async_trait]
impl StreamRenderer for PageRenderer {
    async fn render(
        &self,
        context: &RenderContext,
        url: &str,
        options: RenderOptions,
    ) -> Result<RenderStream, RenderError> {
        let sidebar = match sidebar_data(context) {
            Ok(sidebar) => sidebar,
            Err(err) => {
                options.report(&err);
                return Err(err);
            }
        };

        let shell = self.shell(&sidebar);
        let path = url_path(url);
        let route = Route::resolve(&path);
        let store = self.store.clone();

        let outlet = async move {
            match route {
                Route::Index => Ok(render_index()),
                Route::Contact(id) => match store.get_contact(&id).await {
                    Ok(Some(contact)) => Ok(render_contact(&contact)),
                    Ok(None) => Ok(render_not_found(&path)),
                    Err(e) => Err(RenderError::section(OUTLET_SECTION, e.to_string())),
                },
                Route::NotFound => Ok(render_not_found(&path)),
            }
        };

        Ok(RenderStream::builder(shell.render_opening())
            .defer(
                Section::builder(OUTLET_SECTION)
                    .with_fallback(render_outlet_fallback())
                    .build(),
                outlet,
            )
            .closing(shell.render_closing())
            .build(&options))
    }
}
