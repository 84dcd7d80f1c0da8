//! Form actions posted from the contacts pages.

use edge_sdk::edge_core::{decode_component, Method};
use edge_sdk::edge_data::{ContactStore, ContactUpdate, DataError};

/// A mutation requested by one of the page forms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// `POST /contacts`
    Create,
    /// `POST /contacts/{id}/favorite`
    ToggleFavorite(String),
    /// `POST /contacts/{id}/destroy`
    Destroy(String),
}

impl Action {
    /// Match a form post. Anything other than POST is never an action.
    pub fn resolve(method: Method, path: &str) -> Option<Self> {
        if method != Method::Post {
            return None;
        }

        let path = path.split('?').next().unwrap_or_default();
        let path = path.trim_end_matches('/');
        if path == "/contacts" {
            return Some(Action::Create);
        }

        let rest = path.strip_prefix("/contacts/")?;
        let (id, verb) = rest.split_once('/')?;
        if id.is_empty() {
            return None;
        }

        let id = decode_component(id);
        match verb {
            "favorite" => Some(Action::ToggleFavorite(id)),
            "destroy" => Some(Action::Destroy(id)),
            _ => None,
        }
    }

    /// Apply the action, returning where to redirect the browser.
    pub async fn run<S: ContactStore + ?Sized>(&self, store: &S) -> Result<String, DataError> {
        match self {
            Action::Create => {
                let contact = store.create_empty_contact().await?;
                Ok(format!("/contacts/{}", contact.id))
            }
            Action::ToggleFavorite(id) => {
                let contact = store
                    .get_contact(id)
                    .await?
                    .ok_or_else(|| DataError::NotFound(id.clone()))?;
                let update = ContactUpdate {
                    favorite: Some(!contact.favorite),
                    ..ContactUpdate::default()
                };
                store.update_contact(id, update).await?;
                Ok(format!("/contacts/{}", contact.id))
            }
            Action::Destroy(id) => {
                store.delete_contact(id).await?;
                Ok("/".to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use edge_sdk::edge_data::InMemoryContactStore;

    use super::*;

    #[test]
    fn test_resolve_actions() {
        assert_eq!(Action::resolve(Method::Post, "/contacts"), Some(Action::Create));
        assert_eq!(
            Action::resolve(Method::Post, "/contacts/ada-lovelace/favorite"),
            Some(Action::ToggleFavorite("ada-lovelace".to_string()))
        );
        assert_eq!(
            Action::resolve(Method::Post, "/contacts/a%20b/destroy/"),
            Some(Action::Destroy("a b".to_string()))
        );
    }

    #[test]
    fn test_resolve_ignores_other_requests() {
        assert_eq!(Action::resolve(Method::Get, "/contacts"), None);
        assert_eq!(Action::resolve(Method::Get, "/contacts/ada-lovelace/destroy"), None);
        assert_eq!(Action::resolve(Method::Post, "/contacts/ada-lovelace"), None);
        assert_eq!(Action::resolve(Method::Post, "/contacts/ada-lovelace/edit"), None);
        assert_eq!(Action::resolve(Method::Post, "/contacts//favorite"), None);
    }

    #[tokio::test]
    async fn test_create_redirects_to_new_contact() {
        let store = InMemoryContactStore::with_demo_data();
        let before = store.get_contacts(None).await.unwrap().len();

        let location = Action::Create.run(&store).await.unwrap();

        let id = location.strip_prefix("/contacts/").unwrap();
        assert!(store.get_contact(id).await.unwrap().is_some());
        assert_eq!(store.get_contacts(None).await.unwrap().len(), before + 1);
    }

    #[tokio::test]
    async fn test_toggle_favorite_flips_flag() {
        let store = InMemoryContactStore::with_demo_data();
        let action = Action::ToggleFavorite("ada-lovelace".to_string());
        let initial = store.get_contact("ada-lovelace").await.unwrap().unwrap().favorite;

        assert_eq!(action.run(&store).await.unwrap(), "/contacts/ada-lovelace");
        let toggled = store.get_contact("ada-lovelace").await.unwrap().unwrap();
        assert_eq!(toggled.favorite, !initial);

        action.run(&store).await.unwrap();
        let restored = store.get_contact("ada-lovelace").await.unwrap().unwrap();
        assert_eq!(restored.favorite, initial);
    }

    #[tokio::test]
    async fn test_toggle_unknown_contact_is_not_found() {
        let store = InMemoryContactStore::with_demo_data();

        let err = Action::ToggleFavorite("nobody".to_string())
            .run(&store)
            .await
            .unwrap_err();

        assert!(matches!(err, DataError::NotFound(id) if id == "nobody"));
    }

    #[tokio::test]
    async fn test_destroy_removes_contact() {
        let store = InMemoryContactStore::with_demo_data();

        let location = Action::Destroy("ada-lovelace".to_string())
            .run(&store)
            .await
            .unwrap();

        assert_eq!(location, "/");
        assert!(store.get_contact("ada-lovelace").await.unwrap().is_none());
    }
}
