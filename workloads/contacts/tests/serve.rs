//! End-to-end tests for the contacts app.

use std::sync::Arc;

use async_trait::async_trait;
use contacts::{AppError, ContactsApp, LoaderError, LINK_TITLE_BINDING};
use edge_sdk::edge_core::{AppConfig, RequestId, StaticBindings};
use edge_sdk::edge_data::{Contact, ContactStore, ContactUpdate, DataError, InMemoryContactStore};
use edge_sdk::edge_handler::RenderReport;
use edge_sdk::edge_observability::{LogLevel, MemorySink, StructuredLogger};
use http::header::{CONTENT_TYPE, LOCATION, USER_AGENT};
use http::{Request, StatusCode};

const CONFIG: &str = r#"
[app]
name = "Contacts"

[crawlers]
signatures = ["googlebot", "curl/*"]
"#;

const GOOGLEBOT: &str = "Mozilla/5.0 (compatible; Googlebot/2.1; +http://www.google.com/bot.html)";
const FIREFOX: &str = "Mozilla/5.0 (X11; Linux x86_64; rv:125.0) Gecko/20100101 Firefox/125.0";

struct Harness {
    app: ContactsApp,
    bindings: Arc<StaticBindings>,
    sink: Arc<MemorySink>,
}

fn harness_with(config: &str, store: Arc<dyn ContactStore>) -> Harness {
    let config = AppConfig::from_toml_str(config).unwrap();
    let bindings = Arc::new(StaticBindings::new().with(LINK_TITLE_BINDING, "Contacts"));
    let sink = Arc::new(MemorySink::new());
    let logger = StructuredLogger::new(RequestId::from_string("app"))
        .with_min_level(LogLevel::Debug)
        .with_sink(sink.clone());

    let app = ContactsApp::new(config, store, bindings.clone(), logger).unwrap();
    Harness {
        app,
        bindings,
        sink,
    }
}

fn harness() -> Harness {
    harness_with(CONFIG, Arc::new(InMemoryContactStore::with_demo_data()))
}

fn get(uri: &str, user_agent: Option<&str>) -> Request<()> {
    let mut builder = Request::builder().uri(uri);
    if let Some(ua) = user_agent {
        builder = builder.header(USER_AGENT, ua);
    }
    builder.body(()).unwrap()
}

fn post(uri: &str) -> Request<()> {
    Request::builder().method("POST").uri(uri).body(()).unwrap()
}

#[tokio::test]
async fn test_browser_index_streams() {
    let h = harness();

    let response = h.app.serve(&get("/", Some(FIREFOX))).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[CONTENT_TYPE], "text/html");
    assert!(response.headers().contains_key("x-request-id"));
    assert!(!response.body().is_all_ready());

    let html = response.into_body().collect_string().await;
    assert!(html.contains("Ada Lovelace"));
    assert!(html.contains(r#"id="index-page""#));
}

#[tokio::test]
async fn test_crawler_gets_complete_document() {
    let h = harness();

    let response = h
        .app
        .serve(&get("/contacts/hedy-lamarr", Some(GOOGLEBOT)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.body().is_all_ready());

    let html = response.into_body().collect_string().await;
    assert!(html.contains("<h1>Hedy Lamarr"));
    assert!(html.contains("Frequency hopping."));
}

#[tokio::test]
async fn test_spa_mode_gets_complete_document() {
    let config = CONFIG.replace("[app]\n", "[app]\nspa_mode = true\n");
    let h = harness_with(&config, Arc::new(InMemoryContactStore::with_demo_data()));

    let response = h.app.serve(&get("/", Some(FIREFOX))).await.unwrap();

    assert!(h.app.config().app.spa_mode);
    assert!(response.body().is_all_ready());
}

#[tokio::test]
async fn test_search_filters_sidebar() {
    let h = harness();

    let response = h.app.serve(&get("/?q=ann", None)).await.unwrap();
    let html = response.into_body().collect_string().await;

    assert!(html.contains("Annie Easley"));
    assert!(!html.contains("Ada Lovelace"));
    assert!(html.contains(r#"value="ann""#));
}

#[tokio::test]
async fn test_unknown_contact_is_404() {
    let h = harness();

    let response = h
        .app
        .serve(&get("/contacts/nobody", Some(GOOGLEBOT)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let html = response.into_body().collect_string().await;
    assert!(html.contains("Not Found"));
}

#[tokio::test]
async fn test_link_title_change_seen_by_next_request() {
    let h = harness();

    let first = h.app.serve(&get("/", None)).await.unwrap();
    let first = first.into_body().collect_string().await;

    h.bindings.set(LINK_TITLE_BINDING, "Address Book");
    let second = h.app.serve(&get("/", None)).await.unwrap();
    let second = second.into_body().collect_string().await;

    assert!(first.contains(r#"<a href="/">Contacts</a>"#));
    assert!(second.contains(r#"<a href="/">Address Book</a>"#));
}

#[tokio::test]
async fn test_missing_link_title_fails_request() {
    let h = harness();
    h.bindings.remove(LINK_TITLE_BINDING);

    let err = h.app.serve(&get("/", None)).await.unwrap_err();

    assert!(matches!(err, AppError::Loader(LoaderError::Binding(_))));
    assert_eq!(h.sink.at_level(LogLevel::Error).len(), 1);
}

#[tokio::test]
async fn test_new_contact_redirects_to_its_page() {
    let h = harness();

    let response = h.app.serve(&post("/contacts")).await.unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert!(response.headers().contains_key("x-request-id"));
    let location = response.headers()[LOCATION].to_str().unwrap().to_string();
    assert!(location.starts_with("/contacts/"));

    let page = h.app.serve(&get(&location, Some(GOOGLEBOT))).await.unwrap();
    assert_eq!(page.status(), StatusCode::OK);
    assert!(page.into_body().collect_string().await.contains("<i>No Name</i>"));
}

#[tokio::test]
async fn test_favorite_toggles_and_redirects() {
    let h = harness();

    let response = h
        .app
        .serve(&post("/contacts/ada-lovelace/favorite"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[LOCATION], "/contacts/ada-lovelace");

    let contact = h.app.store().get_contact("ada-lovelace").await.unwrap().unwrap();
    let page = h
        .app
        .serve(&get("/contacts/ada-lovelace", Some(GOOGLEBOT)))
        .await
        .unwrap();
    let html = page.into_body().collect_string().await;
    let label = if contact.favorite {
        "Remove from favorites"
    } else {
        "Add to favorites"
    };
    assert!(html.contains(label));
}

#[tokio::test]
async fn test_destroy_removes_contact() {
    let h = harness();

    let response = h
        .app
        .serve(&post("/contacts/ada-lovelace/destroy"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[LOCATION], "/");

    let page = h
        .app
        .serve(&get("/contacts/ada-lovelace", Some(GOOGLEBOT)))
        .await
        .unwrap();
    assert_eq!(page.status(), StatusCode::NOT_FOUND);

    let index = h.app.serve(&get("/", Some(GOOGLEBOT))).await.unwrap();
    assert!(!index.into_body().collect_string().await.contains("Ada Lovelace"));
}

#[tokio::test]
async fn test_favorite_unknown_contact_is_404() {
    let h = harness();

    let response = h.app.serve(&post("/contacts/nobody/favorite")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(response.headers()[CONTENT_TYPE], "text/html");
    assert!(h.sink.at_level(LogLevel::Error).is_empty());
}

/// Lists contacts but fails single lookups.
struct FlakyStore(InMemoryContactStore);

#[async_trait]
impl ContactStore for FlakyStore {
    async fn get_contacts(&self, query: Option<&str>) -> Result<Vec<Contact>, DataError> {
        self.0.get_contacts(query).await
    }

    async fn get_contact(&self, _id: &str) -> Result<Option<Contact>, DataError> {
        Err(DataError::Unavailable("replica lag".to_string()))
    }

    async fn create_empty_contact(&self) -> Result<Contact, DataError> {
        self.0.create_empty_contact().await
    }

    async fn update_contact(&self, id: &str, update: ContactUpdate) -> Result<Contact, DataError> {
        self.0.update_contact(id, update).await
    }

    async fn delete_contact(&self, id: &str) -> Result<(), DataError> {
        self.0.delete_contact(id).await
    }
}

#[tokio::test]
async fn test_outlet_failure_for_crawler_is_500() {
    let h = harness_with(CONFIG, Arc::new(FlakyStore(InMemoryContactStore::with_demo_data())));

    let response = h
        .app
        .serve(&get("/contacts/ada-lovelace", Some("curl/8.4.0")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.headers()[CONTENT_TYPE], "text/html");

    let errors = h.sink.at_level(LogLevel::Error);
    assert_eq!(errors.len(), 1);
    assert!(errors[0].field_str("error").unwrap().contains("replica lag"));

    let html = response.into_body().collect_string().await;
    assert!(html.contains("Unable to load this page"));
}

#[tokio::test]
async fn test_outlet_failure_while_streaming_is_reported() {
    let h = harness_with(CONFIG, Arc::new(FlakyStore(InMemoryContactStore::with_demo_data())));

    let response = h
        .app
        .serve(&get("/contacts/ada-lovelace", Some(FIREFOX)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let report = response.extensions().get::<RenderReport>().cloned().unwrap();
    assert_eq!(report.errors_logged(), 0);

    let html = response.into_body().collect_string().await;

    assert!(html.contains("Ada Lovelace"));
    assert!(html.contains("Unable to load this page"));
    assert_eq!(report.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(report.errors_logged(), 1);
    assert_eq!(h.sink.at_level(LogLevel::Error).len(), 1);
}

#[tokio::test]
async fn test_action_store_failure_is_logged_once() {
    let h = harness_with(CONFIG, Arc::new(FlakyStore(InMemoryContactStore::with_demo_data())));

    let err = h
        .app
        .serve(&post("/contacts/ada-lovelace/favorite"))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Store(DataError::Unavailable(_))));
    assert_eq!(h.sink.at_level(LogLevel::Error).len(), 1);
}
