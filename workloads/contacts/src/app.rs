//! Application wiring: loader, render context and adapter.

use std::sync::Arc;

use edge_sdk::edge_core::{
    AppConfig, Bindings, LoadContext, RenderError, RequestContext, RequestId,
};
use edge_sdk::edge_data::{ContactStore, DataError};
use edge_sdk::edge_handler::RenderAdapter;
use edge_sdk::edge_observability::StructuredLogger;
use edge_sdk::edge_security::{ClassifierError, SignatureClassifier};
use edge_sdk::edge_streaming::{HtmlBody, RenderContext};
use http::header::{CONTENT_TYPE, LOCATION};
use http::{HeaderMap, HeaderValue, Request, Response, StatusCode};

use crate::actions::Action;
use crate::renderer::{PageRenderer, Route, ROOT_ROUTE};
use crate::sidebar::{load_sidebar, LoaderError};
use crate::views::render_not_found;

/// Failure to produce a response.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Root loader failed: {0}")]
    Loader(#[from] LoaderError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("Contact store failed: {0}")]
    Store(#[from] DataError),

    #[error("Invalid crawler configuration: {0}")]
    Classifier(#[from] ClassifierError),
}

/// The contacts application.
pub struct ContactsApp {
    config: AppConfig,
    store: Arc<dyn ContactStore>,
    bindings: Arc<dyn Bindings>,
    adapter: RenderAdapter<PageRenderer, SignatureClassifier>,
    logger: StructuredLogger,
}

impl ContactsApp {
    /// Build the app from configuration.
    ///
    /// `bindings` are consulted on every request.
    pub fn new(
        config: AppConfig,
        store: Arc<dyn ContactStore>,
        bindings: Arc<dyn Bindings>,
        logger: StructuredLogger,
    ) -> Result<Self, AppError> {
        let classifier = SignatureClassifier::from_config(&config.crawlers)?;
        let renderer = PageRenderer::new(store.clone(), config.app.name.clone());
        let adapter = RenderAdapter::new(renderer, classifier, logger.clone());

        Ok(Self {
            config,
            store,
            bindings,
            adapter,
            logger,
        })
    }

    /// Active configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Contact store.
    pub fn store(&self) -> &Arc<dyn ContactStore> {
        &self.store
    }

    /// Serve one request.
    ///
    /// Form posts are applied to the store and answered with a redirect;
    /// everything else is rendered.
    pub async fn serve<B>(&self, request: &Request<B>) -> Result<Response<HtmlBody>, AppError> {
        let ctx = RequestContext::from_http(request);
        let load_context = LoadContext::new(ctx.request_id.clone(), self.bindings.clone());
        let logger = self.logger.for_request(ctx.request_id.clone(), ctx.path.clone());

        logger
            .info_builder("Request started")
            .field("method", ctx.method.as_str())
            .field("user_agent", ctx.header("user-agent").unwrap_or("-"))
            .emit();

        if let Some(action) = Action::resolve(ctx.method, &ctx.path) {
            return self
                .apply(&action, &ctx.path, &load_context.request_id, &logger)
                .await;
        }

        let sidebar = match load_sidebar(request, &load_context, self.store.as_ref()).await {
            Ok(sidebar) => sidebar,
            Err(e) => {
                logger
                    .error_builder("Root loader failed")
                    .field("error", e.to_string())
                    .emit();
                return Err(e.into());
            }
        };

        let route = Route::resolve(&ctx.path);
        let status = self.initial_status(&route).await;

        let data = serde_json::to_value(&sidebar)
            .map_err(|e| RenderError::Shell(format!("loader data: {}", e)))?;
        let context = RenderContext::new(route.id())
            .with_spa_mode(self.config.app.spa_mode)
            .with_loader_data(ROOT_ROUTE, data);

        let mut headers = HeaderMap::new();
        if let Ok(value) = HeaderValue::from_str(&load_context.request_id.to_string()) {
            headers.insert("x-request-id", value);
        }

        let response = self
            .adapter
            .handle(request, status, headers, &context, &load_context)
            .await?;

        logger
            .info_builder("Response started")
            .field_i64("status", i64::from(response.status().as_u16()))
            .field_i64("contacts", sidebar.contacts.len() as i64)
            .emit();

        Ok(response)
    }

    async fn apply(
        &self,
        action: &Action,
        path: &str,
        request_id: &RequestId,
        logger: &StructuredLogger,
    ) -> Result<Response<HtmlBody>, AppError> {
        let mut response = match action.run(self.store.as_ref()).await {
            Ok(location) => {
                let location = HeaderValue::from_str(&location)
                    .map_err(|e| RenderError::Shell(format!("redirect location: {}", e)))?;
                logger
                    .info_builder("Action applied")
                    .field("action", format!("{:?}", action))
                    .emit();

                let mut response = Response::new(HtmlBody::empty());
                *response.status_mut() = StatusCode::SEE_OTHER;
                response.headers_mut().insert(LOCATION, location);
                response
            }
            Err(DataError::NotFound(_)) => {
                let mut response = Response::new(HtmlBody::full(render_not_found(path)));
                *response.status_mut() = StatusCode::NOT_FOUND;
                response
                    .headers_mut()
                    .insert(CONTENT_TYPE, HeaderValue::from_static("text/html"));
                response
            }
            Err(e) => {
                logger
                    .error_builder("Action failed")
                    .field("error", e.to_string())
                    .emit();
                return Err(e.into());
            }
        };

        if let Ok(value) = HeaderValue::from_str(&request_id.to_string()) {
            response.headers_mut().insert("x-request-id", value);
        }
        Ok(response)
    }

    async fn initial_status(&self, route: &Route) -> StatusCode {
        match route {
            Route::Index => StatusCode::OK,
            Route::NotFound => StatusCode::NOT_FOUND,
            Route::Contact(id) => match self.store.get_contact(id).await {
                Ok(None) => StatusCode::NOT_FOUND,
                // Store failures surface in the outlet.
                Ok(Some(_)) | Err(_) => StatusCode::OK,
            },
        }
    }
}

/// Flatten response headers into name/value pairs for the host.
///
/// Repeated headers keep every value.
pub fn header_entries(headers: &HeaderMap) -> Vec<(String, Vec<u8>)> {
    headers
        .iter()
        .map(|(name, value)| (name.as_str().to_owned(), value.as_bytes().to_vec()))
        .collect()
}

impl std::fmt::Debug for ContactsApp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContactsApp")
            .field("app", &self.config.app.name)
            .field("spa_mode", &self.config.app.spa_mode)
            .finish_non_exhaustive()
    }
}
