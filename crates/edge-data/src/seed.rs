//! Demo contacts for local development and the reference workload.

use chrono::{Duration, Utc};

use crate::contact::Contact;

const DEMO: &[(&str, &str, Option<&str>, Option<&str>)] = &[
    ("Ada", "Lovelace", Some("@analytical_ada"), Some("Wrote the first published program.")),
    ("Grace", "Hopper", Some("@amazing_grace"), Some("Ask about the nanosecond wire.")),
    ("Alan", "Turing", None, None),
    ("Annie", "Easley", None, Some("Centaur upper stage software.")),
    ("Katherine", "Johnson", None, None),
    ("Dennis", "Ritchie", None, None),
    ("Barbara", "Liskov", None, Some("Substitution principle.")),
    ("Margaret", "Hamilton", Some("@apollo_margaret"), None),
    ("Ken", "Thompson", None, None),
    ("Hedy", "Lamarr", None, Some("Frequency hopping.")),
    ("Joan", "Clarke", None, None),
    ("Frances", "Allen", None, None),
];

/// The demo contact set; ids are `first-last` in lower case.
pub fn demo_contacts() -> Vec<Contact> {
    let base = Utc::now();

    DEMO.iter()
        .enumerate()
        .map(|(i, (first, last, twitter, notes))| {
            let id = format!("{}-{}", first.to_lowercase(), last.to_lowercase());
            let mut contact = Contact::empty(id.clone(), base + Duration::milliseconds(i as i64));
            contact.first = Some(first.to_string());
            contact.last = Some(last.to_string());
            contact.avatar = Some(format!("https://i.pravatar.cc/150?u={}", id));
            contact.twitter = twitter.map(String::from);
            contact.notes = notes.map(String::from);
            contact
        })
        .collect()
}
