//! Contact store interface and the in-memory implementation.

use std::cmp::Ordering as CmpOrdering;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::Utc;

use crate::contact::{Contact, ContactUpdate};
use crate::error::DataError;
use crate::seed::demo_contacts;

/// Async access to contacts.
#[async_trait]
pub trait ContactStore: Send + Sync {
    /// Contacts matching `query` (all when absent or empty), sorted by last
    /// name then creation time.
    async fn get_contacts(&self, query: Option<&str>) -> Result<Vec<Contact>, DataError>;

    /// A single contact.
    async fn get_contact(&self, id: &str) -> Result<Option<Contact>, DataError>;

    /// Create a contact with no fields set.
    async fn create_empty_contact(&self) -> Result<Contact, DataError>;

    /// Merge `update` into an existing contact.
    async fn update_contact(&self, id: &str, update: ContactUpdate) -> Result<Contact, DataError>;

    /// Remove a contact; removing a missing id is not an error.
    async fn delete_contact(&self, id: &str) -> Result<(), DataError>;
}

#[async_trait]
impl<T: ContactStore + ?Sized> ContactStore for std::sync::Arc<T> {
    async fn get_contacts(&self, query: Option<&str>) -> Result<Vec<Contact>, DataError> {
        (**self).get_contacts(query).await
    }

    async fn get_contact(&self, id: &str) -> Result<Option<Contact>, DataError> {
        (**self).get_contact(id).await
    }

    async fn create_empty_contact(&self) -> Result<Contact, DataError> {
        (**self).create_empty_contact().await
    }

    async fn update_contact(&self, id: &str, update: ContactUpdate) -> Result<Contact, DataError> {
        (**self).update_contact(id, update).await
    }

    async fn delete_contact(&self, id: &str) -> Result<(), DataError> {
        (**self).delete_contact(id).await
    }
}

/// Process-local contact store.
#[derive(Debug, Default)]
pub struct InMemoryContactStore {
    records: RwLock<HashMap<String, Contact>>,
    sequence: AtomicU64,
}

impl InMemoryContactStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with the demo contacts.
    pub fn with_demo_data() -> Self {
        Self::from_contacts(demo_contacts())
    }

    /// Create a store from existing contacts.
    pub fn from_contacts(contacts: impl IntoIterator<Item = Contact>) -> Self {
        let records = contacts
            .into_iter()
            .map(|c| (c.id.clone(), c))
            .collect::<HashMap<_, _>>();

        Self {
            records: RwLock::new(records),
            sequence: AtomicU64::new(0),
        }
    }

    /// Number of stored contacts.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, HashMap<String, Contact>> {
        self.records.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, HashMap<String, Contact>> {
        self.records.write().unwrap_or_else(|e| e.into_inner())
    }

    fn next_id(&self) -> String {
        let seq = self.sequence.fetch_add(1, Ordering::Relaxed);
        let millis = Utc::now().timestamp_millis().max(0) as u64;
        format!("{}{}", to_base36(millis), to_base36(seq))
    }
}

#[async_trait]
impl ContactStore for InMemoryContactStore {
    async fn get_contacts(&self, query: Option<&str>) -> Result<Vec<Contact>, DataError> {
        let mut contacts: Vec<Contact> = {
            let records = self.read();
            match query.map(str::trim).filter(|q| !q.is_empty()) {
                Some(q) => records
                    .values()
                    .filter(|c| matches_contact(c, q))
                    .cloned()
                    .collect(),
                None => records.values().cloned().collect(),
            }
        };

        contacts.sort_by(compare_contacts);
        Ok(contacts)
    }

    async fn get_contact(&self, id: &str) -> Result<Option<Contact>, DataError> {
        Ok(self.read().get(id).cloned())
    }

    async fn create_empty_contact(&self) -> Result<Contact, DataError> {
        let contact = Contact::empty(self.next_id(), Utc::now());
        self.write().insert(contact.id.clone(), contact.clone());
        Ok(contact)
    }

    async fn update_contact(&self, id: &str, update: ContactUpdate) -> Result<Contact, DataError> {
        let mut records = self.write();
        let contact = records
            .get_mut(id)
            .ok_or_else(|| DataError::NotFound(id.to_string()))?;
        update.apply(contact);
        Ok(contact.clone())
    }

    async fn delete_contact(&self, id: &str) -> Result<(), DataError> {
        self.write().remove(id);
        Ok(())
    }
}

/// Case-insensitive fuzzy match on first or last name: every query
/// character must appear in order.
pub fn matches_contact(contact: &Contact, query: &str) -> bool {
    let query = query.to_lowercase();
    [contact.first.as_deref(), contact.last.as_deref()]
        .into_iter()
        .flatten()
        .any(|field| is_subsequence(&query, &field.to_lowercase()))
}

fn is_subsequence(needle: &str, haystack: &str) -> bool {
    let mut hay = haystack.chars();
    needle.chars().all(|n| hay.any(|h| h == n))
}

fn compare_contacts(a: &Contact, b: &Contact) -> CmpOrdering {
    let a_last = a.last.as_deref().unwrap_or("");
    let b_last = b.last.as_deref().unwrap_or("");
    a_last
        .cmp(b_last)
        .then_with(|| a.created_at.cmp(&b.created_at))
}

fn to_base36(mut n: u64) -> String {
    const DIGITS: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if n == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while n > 0 {
        out.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    out.reverse();
    String::from_utf8_lossy(&out).into_owned()
}
