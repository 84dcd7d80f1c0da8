//! Client classification for the edge streaming SSR platform.
//!
//! This crate provides:
//! - `ClientClassifier` - Pluggable crawler detection
//! - `SignatureClassifier` - Pattern-based matching on configured user-agent signatures
//!
//! # Example
//!
//! ```
//! use edge_security::{ClientClassifier, SignatureClassifier};
//!
//! let classifier = SignatureClassifier::new(["googlebot", "curl/*"]).unwrap();
//! assert!(classifier.is_crawler(Some("curl/8.4.0")));
//! assert!(!classifier.is_crawler(None));
//! ```

mod crawler;

pub use crawler::*;
