//! Root loader: the data behind the sidebar.

use edge_sdk::edge_core::{parse_query, BindingError, LoadContext};
use edge_sdk::edge_data::{Contact, ContactStore, DataError};
use serde::{Deserialize, Serialize};

/// Binding holding the sidebar heading.
pub const LINK_TITLE_BINDING: &str = "link_title";

/// Sidebar loader output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SidebarData {
    /// Contacts matching `q`, in store order.
    pub contacts: Vec<Contact>,
    /// Search query from the URL, if present.
    pub q: Option<String>,
    /// Value of the `link_title` binding.
    pub link_title: String,
}

/// Loader failure.
#[derive(Debug, thiserror::Error)]
pub enum LoaderError {
    #[error(transparent)]
    Binding(#[from] BindingError),

    #[error(transparent)]
    Data(#[from] DataError),
}

/// Load the sidebar for `request`.
///
/// `q` comes from the request URL. The binding is read on every call so
/// changes are seen by the next request.
pub async fn load_sidebar<B, S>(
    request: &http::Request<B>,
    load_context: &LoadContext,
    store: &S,
) -> Result<SidebarData, LoaderError>
where
    S: ContactStore + ?Sized,
{
    let q = request
        .uri()
        .query()
        .and_then(|query| parse_query(query).remove("q"));

    let link_title = load_context.env.require(LINK_TITLE_BINDING)?;
    let contacts = store.get_contacts(q.as_deref()).await?;

    Ok(SidebarData {
        contacts,
        q,
        link_title,
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use edge_sdk::edge_core::{RequestId, StaticBindings};
    use edge_sdk::edge_data::{ContactUpdate, InMemoryContactStore};

    use super::*;

    fn load_context(bindings: StaticBindings) -> LoadContext {
        LoadContext::new(RequestId::from_string("req"), Arc::new(bindings))
    }

    fn get(uri: &str) -> http::Request<()> {
        http::Request::builder().uri(uri).body(()).unwrap()
    }

    #[tokio::test]
    async fn test_no_query() {
        let store = InMemoryContactStore::with_demo_data();
        let ctx = load_context(StaticBindings::new().with(LINK_TITLE_BINDING, "Contacts"));

        let data = load_sidebar(&get("/"), &ctx, &store).await.unwrap();

        assert_eq!(data.q, None);
        assert_eq!(data.link_title, "Contacts");
        assert_eq!(data.contacts, store.get_contacts(None).await.unwrap());
    }

    #[tokio::test]
    async fn test_query_filters_contacts() {
        let store = InMemoryContactStore::with_demo_data();
        let ctx = load_context(StaticBindings::new().with(LINK_TITLE_BINDING, "Contacts"));

        let data = load_sidebar(&get("/?q=ann"), &ctx, &store).await.unwrap();

        assert_eq!(data.q.as_deref(), Some("ann"));
        assert_eq!(data.contacts.len(), 1);
        assert_eq!(data.contacts[0].id, "annie-easley");
    }

    #[tokio::test]
    async fn test_query_is_decoded() {
        let store = InMemoryContactStore::with_demo_data();
        let ctx = load_context(StaticBindings::new().with(LINK_TITLE_BINDING, "x"));

        let data = load_sidebar(&get("/?q=ada+love%20lace"), &ctx, &store)
            .await
            .unwrap();

        assert_eq!(data.q.as_deref(), Some("ada love lace"));
    }

    #[tokio::test]
    async fn test_empty_query_passed_through() {
        let store = InMemoryContactStore::with_demo_data();
        let ctx = load_context(StaticBindings::new().with(LINK_TITLE_BINDING, "x"));

        let data = load_sidebar(&get("/?q="), &ctx, &store).await.unwrap();

        assert_eq!(data.q.as_deref(), Some(""));
        assert_eq!(data.contacts.len(), store.len());
    }

    #[tokio::test]
    async fn test_missing_binding_is_error() {
        let store = InMemoryContactStore::with_demo_data();
        let ctx = load_context(StaticBindings::new());

        let err = load_sidebar(&get("/"), &ctx, &store).await.unwrap_err();

        assert!(matches!(err, LoaderError::Binding(BindingError::Missing(ref n)) if n == "link_title"));
    }

    #[tokio::test]
    async fn test_binding_read_per_call() {
        let store = InMemoryContactStore::new();
        let bindings = Arc::new(StaticBindings::new().with(LINK_TITLE_BINDING, "Before"));
        let ctx = LoadContext::new(RequestId::from_string("req"), bindings.clone());

        let first = load_sidebar(&get("/"), &ctx, &store).await.unwrap();
        bindings.set(LINK_TITLE_BINDING, "After");
        let second = load_sidebar(&get("/"), &ctx, &store).await.unwrap();

        assert_eq!(first.link_title, "Before");
        assert_eq!(second.link_title, "After");
    }

    struct DownStore;

    #[async_trait]
    impl ContactStore for DownStore {
        async fn get_contacts(&self, _query: Option<&str>) -> Result<Vec<Contact>, DataError> {
            Err(DataError::Unavailable("db offline".to_string()))
        }

        async fn get_contact(&self, _id: &str) -> Result<Option<Contact>, DataError> {
            Err(DataError::Unavailable("db offline".to_string()))
        }

        async fn create_empty_contact(&self) -> Result<Contact, DataError> {
            Err(DataError::Unavailable("db offline".to_string()))
        }

        async fn update_contact(
            &self,
            _id: &str,
            _update: ContactUpdate,
        ) -> Result<Contact, DataError> {
            Err(DataError::Unavailable("db offline".to_string()))
        }

        async fn delete_contact(&self, _id: &str) -> Result<(), DataError> {
            Err(DataError::Unavailable("db offline".to_string()))
        }
    }

    #[tokio::test]
    async fn test_store_error_propagates() {
        let ctx = load_context(StaticBindings::new().with(LINK_TITLE_BINDING, "x"));

        let err = load_sidebar(&get("/"), &ctx, &DownStore).await.unwrap_err();

        assert!(matches!(err, LoaderError::Data(DataError::Unavailable(_))));
    }

    #[test]
    fn test_serializes_link_title_camel_case() {
        let data = SidebarData {
            contacts: Vec::new(),
            q: None,
            link_title: "Contacts".to_string(),
        };
        let json = serde_json::to_value(&data).unwrap();

        assert_eq!(json["linkTitle"], "Contacts");
        assert!(json["q"].is_null());
        assert!(json["contacts"].as_array().unwrap().is_empty());
    }
}
