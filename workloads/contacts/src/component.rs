//! Spin HTTP component.

use std::sync::Arc;

use spin_sdk::http::{Fields, IncomingRequest, Method, OutgoingResponse, ResponseOutparam};
use spin_sdk::http_component;

use edge_sdk::edge_core::{AppConfig, Bindings, LayeredBindings, RequestId};
use edge_sdk::edge_data::InMemoryContactStore;
use edge_sdk::edge_observability::StructuredLogger;

use crate::app::{header_entries, AppError, ContactsApp};

const CONFIG: &str = include_str!("../edge.toml");

/// Bindings read from Spin application variables.
struct SpinVariables;

impl Bindings for SpinVariables {
    fn get(&self, name: &str) -> Option<String> {
        spin_sdk::variables::get(name).ok()
    }
}

#[http_component]
async fn handle(req: IncomingRequest, response_out: ResponseOutparam) {
    let logger = StructuredLogger::new(RequestId::generate()).with_workload("contacts");

    let config = match AppConfig::from_toml_str(CONFIG) {
        Ok(config) => config,
        Err(e) => {
            logger
                .error_builder("Invalid configuration")
                .field("error", e.to_string())
                .emit();
            respond_status(response_out, 500);
            return;
        }
    };
    let logger = logger.with_config(&config.logging);

    // Spin variables override values from edge.toml.
    let layers: Vec<Box<dyn Bindings>> =
        vec![Box::new(SpinVariables), Box::new(config.static_bindings())];
    let bindings = Arc::new(LayeredBindings::new(layers));
    let store = Arc::new(InMemoryContactStore::with_demo_data());

    let app = match ContactsApp::new(config, store, bindings, logger.clone()) {
        Ok(app) => app,
        Err(e) => {
            logger
                .error_builder("Failed to start app")
                .field("error", e.to_string())
                .emit();
            respond_status(response_out, 500);
            return;
        }
    };

    let request = match to_http_request(&req) {
        Ok(request) => request,
        Err(e) => {
            logger
                .warn_builder("Malformed request")
                .field("error", e.to_string())
                .emit();
            respond_status(response_out, 400);
            return;
        }
    };

    let response = match app.serve(&request).await {
        Ok(response) => response,
        Err(e) => {
            // Loader and store failures are logged by the app.
            if !matches!(e, AppError::Loader(_) | AppError::Store(_)) {
                logger
                    .error_builder("Request failed")
                    .field("error", e.to_string())
                    .emit();
            }
            respond_status(response_out, 500);
            return;
        }
    };

    let (parts, body) = response.into_parts();
    let header_list = header_entries(&parts.headers);

    let headers = match Fields::from_list(&header_list) {
        Ok(headers) => headers,
        Err(e) => {
            logger
                .error_builder("Invalid response headers")
                .field("error", format!("{:?}", e))
                .emit();
            respond_status(response_out, 500);
            return;
        }
    };
    let outgoing = OutgoingResponse::new(headers);
    if outgoing.set_status_code(parts.status.as_u16()).is_err() {
        logger
            .error_builder("Invalid response status")
            .field_i64("status", i64::from(parts.status.as_u16()))
            .emit();
        respond_status(response_out, 500);
        return;
    }

    let mut sink = outgoing.take_body();
    response_out.set(outgoing);

    if let Err(e) = body.pipe_to(&mut sink).await {
        logger
            .error_builder("Failed to stream body")
            .field("error", e.to_string())
            .emit();
    }
}

fn respond_status(response_out: ResponseOutparam, status: u16) {
    let response = OutgoingResponse::new(Fields::new());
    // Only called with fixed, valid codes.
    if response.set_status_code(status).is_ok() {
        response_out.set(response);
    }
}

fn to_http_request(req: &IncomingRequest) -> Result<http::Request<()>, http::Error> {
    let method = match req.method() {
        Method::Get => http::Method::GET,
        Method::Head => http::Method::HEAD,
        Method::Post => http::Method::POST,
        Method::Put => http::Method::PUT,
        Method::Delete => http::Method::DELETE,
        Method::Patch => http::Method::PATCH,
        Method::Options => http::Method::OPTIONS,
        _ => http::Method::GET,
    };

    let mut builder = http::Request::builder()
        .method(method)
        .uri(req.path_with_query().unwrap_or_else(|| "/".to_string()));

    for (name, value) in req.headers().entries() {
        builder = builder.header(name, value);
    }

    builder.body(())
}
