//! Request adapter: render context + request in, streaming HTML response out.

use std::sync::Arc;

use edge_core::{LoadContext, RenderError, TimingContext};
use edge_observability::StructuredLogger;
use edge_security::ClientClassifier;
use edge_streaming::{DeliveryMode, HtmlBody, RenderContext, RenderOptions, StreamRenderer};
use http::header::{CONTENT_TYPE, USER_AGENT};
use http::{HeaderMap, HeaderValue, Request, Response, StatusCode};

use crate::tracker::{RenderReport, RenderTracker};

/// Adapts a streaming renderer to HTTP.
///
/// Crawlers and SPA-mode renders get a fully rendered body; everyone else
/// gets the shell immediately and the rest as it renders.
pub struct RenderAdapter<R, C> {
    renderer: R,
    classifier: C,
    logger: StructuredLogger,
}

impl<R, C> RenderAdapter<R, C>
where
    R: StreamRenderer,
    C: ClientClassifier,
{
    /// Create an adapter.
    ///
    /// `logger` is a template; each request gets a copy carrying its id.
    pub fn new(renderer: R, classifier: C, logger: StructuredLogger) -> Self {
        Self {
            renderer,
            classifier,
            logger,
        }
    }

    /// The renderer.
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Render `request` and build the response.
    ///
    /// Errors before the shell exists are returned and not logged here.
    /// Errors after it are logged once each and turn the status into 500.
    pub async fn handle<B>(
        &self,
        request: &Request<B>,
        status: StatusCode,
        mut headers: HeaderMap,
        context: &RenderContext,
        load_context: &LoadContext,
    ) -> Result<Response<HtmlBody>, RenderError> {
        let logger = self
            .logger
            .for_request(load_context.request_id.clone(), request.uri().path());
        let tracker = Arc::new(RenderTracker::new(status, logger.clone()));
        let mut timing = TimingContext::new();

        let callback_tracker = tracker.clone();
        let options = RenderOptions::on_error(move |err| callback_tracker.on_render_error(err));

        let url = request.uri().to_string();
        let mut stream = self.renderer.render(context, &url, options).await?;
        tracker.mark_shell_rendered();
        timing.mark("shell_sent");

        let user_agent = request
            .headers()
            .get(USER_AGENT)
            .and_then(|v| v.to_str().ok());
        let is_crawler = self.classifier.is_crawler(user_agent);
        let mode = DeliveryMode::select(is_crawler, context.spa_mode);

        if mode.waits_for_all_ready() {
            stream.all_ready().await;
            timing.mark("all_ready");
        }

        headers.insert(CONTENT_TYPE, HeaderValue::from_static("text/html"));

        logger
            .debug_builder("Response ready")
            .field("route", context.route_id.clone())
            .field("delivery", mode.as_str())
            .field_bool("crawler", is_crawler)
            .duration_ms("shell_ms", timing.time_to_shell().unwrap_or_default())
            .emit();

        let mut response = Response::new(HtmlBody::from_render(stream));
        *response.status_mut() = tracker.status();
        *response.headers_mut() = headers;
        response.extensions_mut().insert(RenderReport(tracker));

        Ok(response)
    }
}
