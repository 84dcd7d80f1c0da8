//! Client classification: is the caller an automated crawler?

use edge_core::CrawlerConfig;
use serde::{Deserialize, Serialize};

/// Errors building a classifier.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ClassifierError {
    #[error("invalid signature at index {0}: empty pattern")]
    EmptySignature(usize),
}

/// Decides whether a user agent belongs to an automated crawler.
pub trait ClientClassifier: Send + Sync {
    /// Classify a user agent; a missing header is never a crawler.
    fn is_crawler(&self, user_agent: Option<&str>) -> bool;
}

impl<T: ClientClassifier + ?Sized> ClientClassifier for std::sync::Arc<T> {
    fn is_crawler(&self, user_agent: Option<&str>) -> bool {
        (**self).is_crawler(user_agent)
    }
}

/// Classifier that never reports a crawler.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCrawlers;

impl ClientClassifier for NoCrawlers {
    fn is_crawler(&self, _user_agent: Option<&str>) -> bool {
        false
    }
}

/// Classifier driven by a configured list of user-agent signatures.
///
/// Matching is case-insensitive. A signature without `*` matches anywhere
/// in the user agent; `*` is a wildcard (`prefix*`, `*suffix`, `a*b`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(try_from = "CrawlerConfig")]
pub struct SignatureClassifier {
    signatures: Vec<String>,
}

impl SignatureClassifier {
    /// Build from signatures, rejecting empty patterns.
    pub fn new<I, S>(signatures: I) -> Result<Self, ClassifierError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let signatures = signatures
            .into_iter()
            .enumerate()
            .map(|(i, sig)| normalize_signature(i, sig.as_ref()))
            .collect::<Result<_, _>>()?;
        Ok(Self { signatures })
    }

    /// Build from the `[crawlers]` config section.
    pub fn from_config(config: &CrawlerConfig) -> Result<Self, ClassifierError> {
        Self::new(&config.signatures)
    }

    /// Add one signature (builder style), rejecting empty patterns.
    pub fn with_signature(mut self, signature: impl AsRef<str>) -> Result<Self, ClassifierError> {
        let sig = normalize_signature(self.signatures.len(), signature.as_ref())?;
        self.signatures.push(sig);
        Ok(self)
    }

    /// Number of configured signatures.
    pub fn len(&self) -> usize {
        self.signatures.len()
    }

    /// Whether no signatures are configured.
    pub fn is_empty(&self) -> bool {
        self.signatures.is_empty()
    }

    /// The first signature matching `user_agent`, if any.
    pub fn matching_signature(&self, user_agent: &str) -> Option<&str> {
        let ua = user_agent.to_lowercase();
        self.signatures
            .iter()
            .find(|sig| matches_signature(&ua, sig))
            .map(String::as_str)
    }
}

impl TryFrom<CrawlerConfig> for SignatureClassifier {
    type Error = ClassifierError;

    fn try_from(config: CrawlerConfig) -> Result<Self, Self::Error> {
        Self::from_config(&config)
    }
}

impl ClientClassifier for SignatureClassifier {
    fn is_crawler(&self, user_agent: Option<&str>) -> bool {
        match user_agent {
            Some(ua) if !ua.trim().is_empty() => self.matching_signature(ua).is_some(),
            _ => false,
        }
    }
}

/// Lowercase a signature; a pattern of only wildcards would match everything.
fn normalize_signature(index: usize, signature: &str) -> Result<String, ClassifierError> {
    let sig = signature.trim().to_lowercase();
    if sig.trim_matches('*').is_empty() {
        return Err(ClassifierError::EmptySignature(index));
    }
    Ok(sig)
}

fn matches_signature(ua: &str, signature: &str) -> bool {
    if !signature.contains('*') {
        return ua.contains(signature);
    }

    let parts: Vec<&str> = signature.split('*').collect();
    let first = parts[0];
    let last = parts[parts.len() - 1];

    if !ua.starts_with(first) {
        return false;
    }

    // Interior fragments must appear in order after the prefix.
    let mut rest = &ua[first.len()..];
    for part in &parts[1..parts.len() - 1] {
        match rest.find(part) {
            Some(pos) => rest = &rest[pos + part.len()..],
            None => return false,
        }
    }

    rest.len() >= last.len() && rest.ends_with(last)
}
