//! Detector Module
//!
//! Decides whether an email address or domain looks like phishing.
//!
//! ## Structure
//! - `types`: Verdict, Evidence, Classification
//! - `identifier`: normalization and domain extraction
//! - `policy`: allow-list and suspicious pattern tables
//! - `distance`: Levenshtein edit distance
//! - `rules`: ordered local decision rules
//! - `classifier`: runs the rules, then the registration lookup
//!
//! ## Usage
//! ```ignore
//! let policy = Policy::with_allowed_domains(["paypal.com", "google.com"])?;
//! let classifier = DomainClassifier::new(policy, Arc::new(whois_client));
//!
//! let result = classifier.classify("secure-update@example.com").await;
//! assert_eq!(result.verdict, Verdict::LikelyPhishing);
//! ```

pub mod types;
pub mod identifier;
pub mod policy;
pub mod distance;
pub mod rules;
pub mod classifier;

pub use types::{Classification, Evidence, Subject, Verdict};
pub use identifier::{normalize, InputError};
pub use policy::{AllowList, PatternScope, PatternSet, Policy, PolicyError, SuspiciousPattern};
pub use distance::levenshtein;
pub use rules::Rule;
pub use classifier::DomainClassifier;
