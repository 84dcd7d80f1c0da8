//! Contact records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A contact as stored and rendered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    /// Stable identifier used in URLs.
    pub id: String,
    /// Given name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first: Option<String>,
    /// Family name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last: Option<String>,
    /// Avatar image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    /// Twitter handle, with or without `@`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    /// Free-form notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Marked as favorite.
    #[serde(default)]
    pub favorite: bool,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

impl Contact {
    /// An empty contact with the given id.
    pub fn empty(id: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            first: None,
            last: None,
            avatar: None,
            twitter: None,
            notes: None,
            favorite: false,
            created_at,
        }
    }

    /// "First Last", or `None` when both are missing.
    pub fn display_name(&self) -> Option<String> {
        let name = [self.first.as_deref(), self.last.as_deref()]
            .into_iter()
            .flatten()
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        if name.is_empty() {
            None
        } else {
            Some(name)
        }
    }

    /// Twitter handle without a leading `@`.
    pub fn twitter_handle(&self) -> Option<&str> {
        self.twitter
            .as_deref()
            .map(|t| t.trim_start_matches('@'))
            .filter(|t| !t.is_empty())
    }
}

/// Partial update merged onto an existing contact.
///
/// `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactUpdate {
    #[serde(default)]
    pub first: Option<String>,
    #[serde(default)]
    pub last: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub twitter: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub favorite: Option<bool>,
}

impl ContactUpdate {
    /// Merge this update into `contact`.
    pub fn apply(self, contact: &mut Contact) {
        if let Some(first) = self.first {
            contact.first = Some(first);
        }
        if let Some(last) = self.last {
            contact.last = Some(last);
        }
        if let Some(avatar) = self.avatar {
            contact.avatar = Some(avatar);
        }
        if let Some(twitter) = self.twitter {
            contact.twitter = Some(twitter);
        }
        if let Some(notes) = self.notes {
            contact.notes = Some(notes);
        }
        if let Some(favorite) = self.favorite {
            contact.favorite = favorite;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name() {
        let mut contact = Contact::empty("x", Utc::now());
        assert!(contact.display_name().is_none());

        contact.first = Some("Ada".to_string());
        assert_eq!(contact.display_name().as_deref(), Some("Ada"));

        contact.last = Some("Lovelace".to_string());
        assert_eq!(contact.display_name().as_deref(), Some("Ada Lovelace"));
    }

    #[test]
    fn test_twitter_handle() {
        let mut contact = Contact::empty("x", Utc::now());
        contact.twitter = Some("@ada".to_string());
        assert_eq!(contact.twitter_handle(), Some("ada"));

        contact.twitter = Some("@".to_string());
        assert!(contact.twitter_handle().is_none());
    }

    #[test]
    fn test_update_merges() {
        let mut contact = Contact::empty("x", Utc::now());
        contact.notes = Some("keep".to_string());

        ContactUpdate {
            first: Some("Grace".to_string()),
            favorite: Some(true),
            ..Default::default()
        }
        .apply(&mut contact);

        assert_eq!(contact.first.as_deref(), Some("Grace"));
        assert_eq!(contact.notes.as_deref(), Some("keep"));
        assert!(contact.favorite);
    }

    #[test]
    fn test_serde_camel_case() {
        let contact = Contact::empty("x", Utc::now());
        let json = serde_json::to_value(&contact).unwrap();

        assert!(json.get("createdAt").is_some());
        assert!(json.get("first").is_none());
        assert_eq!(json["favorite"], false);
    }
}
