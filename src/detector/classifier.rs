//! Domain Classifier
//!
//! Input: raw identifier (email address or bare domain)
//! Output: Classification
//!
//! Precedence, first match wins:
//! extraction -> allow-list -> suspicious patterns -> typosquat -> registration

use std::sync::Arc;
use std::time::Duration;

use super::identifier::normalize;
use super::policy::Policy;
use super::rules::{self, Rule};
use super::types::{Classification, Evidence, Subject, Verdict};
use crate::whois::{LookupError, RegistrationLookup, NOT_REGISTERED};

/// Fallback bound on a registration lookup
pub const DEFAULT_LOOKUP_TIMEOUT: Duration = Duration::from_secs(10);

pub struct DomainClassifier {
    policy: Policy,
    rules: Vec<Box<dyn Rule>>,
    lookup: Arc<dyn RegistrationLookup>,
    lookup_timeout: Duration,
}

impl DomainClassifier {
    /// Classifier with the default rule chain
    pub fn new(policy: Policy, lookup: Arc<dyn RegistrationLookup>) -> Self {
        Self::with_rules(policy, rules::default_rules(), lookup)
    }

    /// Classifier with a custom local rule chain; registration always runs last
    pub fn with_rules(
        policy: Policy,
        rules: Vec<Box<dyn Rule>>,
        lookup: Arc<dyn RegistrationLookup>,
    ) -> Self {
        Self {
            policy,
            rules,
            lookup,
            lookup_timeout: DEFAULT_LOOKUP_TIMEOUT,
        }
    }

    pub fn lookup_timeout(mut self, timeout: Duration) -> Self {
        self.lookup_timeout = timeout;
        self
    }

    pub fn policy(&self) -> &Policy {
        &self.policy
    }

    /// Classify an identifier. Never fails: input and lookup errors become verdicts.
    pub async fn classify(&self, identifier: &str) -> Classification {
        tracing::debug!("Checking input: {}", identifier);

        let subject = match normalize(identifier) {
            Ok(subject) => subject,
            Err(err) => {
                tracing::info!("Rejected input {:?}: {}", identifier, err);
                return Classification::new(
                    Verdict::InvalidInput,
                    Evidence::Error(err.to_string()),
                    rules::EXTRACTION,
                );
            }
        };
        tracing::debug!("Extracted domain: {}", subject.domain);

        for rule in &self.rules {
            if let Some(verdict) = rule.evaluate(&subject, &self.policy) {
                tracing::info!(
                    domain = %subject.domain,
                    rule = rule.name(),
                    "Classified as {}", verdict
                );
                return Classification::new(verdict, Evidence::None, rule.name());
            }
        }

        self.check_registration(&subject).await
    }

    async fn check_registration(&self, subject: &Subject) -> Classification {
        let result = match tokio::time::timeout(
            self.lookup_timeout,
            self.lookup.lookup(&subject.domain),
        )
        .await
        {
            Ok(result) => result,
            Err(_) => Err(LookupError::Timeout(self.lookup_timeout)),
        };

        let (verdict, evidence) = match result {
            Err(err) => {
                tracing::warn!("Error validating domain {} with WHOIS: {}", subject.domain, err);
                (Verdict::LikelyPhishing, Evidence::Error(err.to_string()))
            }
            Ok(text) if !text.is_empty() && text != NOT_REGISTERED => {
                tracing::debug!("WHOIS data for domain {}: registered", subject.domain);
                (Verdict::NotPhishing, Evidence::Registration(text))
            }
            Ok(text) => {
                tracing::debug!("Domain is not registered or suspicious: {}", subject.domain);
                (Verdict::LikelyPhishing, Evidence::Registration(text))
            }
        };

        tracing::info!(
            domain = %subject.domain,
            rule = rules::REGISTRATION,
            "Classified as {}", verdict
        );
        Classification::new(verdict, evidence, rules::REGISTRATION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_ALLOWED_DOMAINS;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Canned registration data; unknown domains fail with a request error
    struct FakeLookup {
        answers: HashMap<String, Result<String, LookupError>>,
        calls: AtomicUsize,
    }

    impl FakeLookup {
        fn new(answers: &[(&str, Result<&str, LookupError>)]) -> Arc<Self> {
            Arc::new(Self {
                answers: answers
                    .iter()
                    .map(|(d, r)| (d.to_string(), r.clone().map(str::to_string)))
                    .collect(),
                calls: AtomicUsize::new(0),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl RegistrationLookup for FakeLookup {
        async fn lookup(&self, domain: &str) -> Result<String, LookupError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.answers
                .get(domain)
                .cloned()
                .unwrap_or_else(|| Err(LookupError::Request("connection refused".to_string())))
        }
    }

    struct StalledLookup;

    #[async_trait]
    impl RegistrationLookup for StalledLookup {
        async fn lookup(&self, _domain: &str) -> Result<String, LookupError> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok("registered".to_string())
        }
    }

    fn classifier(lookup: Arc<dyn RegistrationLookup>) -> DomainClassifier {
        let policy = Policy::with_allowed_domains(DEFAULT_ALLOWED_DOMAINS).unwrap();
        DomainClassifier::new(policy, lookup)
    }

    #[tokio::test]
    async fn test_allow_listed_email() {
        let lookup = FakeLookup::new(&[]);
        let result = classifier(lookup.clone()).classify("user@paypal.com").await;

        assert_eq!(result.verdict, Verdict::NotPhishing);
        assert_eq!(result.evidence.as_str(), "");
        assert_eq!(result.rule, rules::ALLOW_LIST);
        assert_eq!(lookup.calls(), 0);
    }

    #[tokio::test]
    async fn test_allow_list_short_circuits_everything() {
        let lookup = FakeLookup::new(&[]);
        let c = classifier(lookup.clone());
        for domain in DEFAULT_ALLOWED_DOMAINS {
            let result = c.classify(domain).await;
            assert_eq!(result.verdict, Verdict::NotPhishing, "{domain}");
            assert_eq!(result.evidence, Evidence::None);
        }
        // Keyword in the local part does not matter for a trusted domain
        let result = c.classify("secure-login@google.com").await;
        assert_eq!(result.verdict, Verdict::NotPhishing);
        assert_eq!(lookup.calls(), 0);
    }

    #[tokio::test]
    async fn test_suspicious_keywords() {
        let lookup = FakeLookup::new(&[]);
        let result = classifier(lookup.clone()).classify("secure-update@example.com").await;

        assert_eq!(result.verdict, Verdict::LikelyPhishing);
        assert_eq!(result.evidence.as_str(), "");
        assert_eq!(result.rule, rules::SUSPICIOUS_PATTERN);
        assert_eq!(lookup.calls(), 0);
    }

    #[tokio::test]
    async fn test_typosquat() {
        let lookup = FakeLookup::new(&[("paypa1.com", Ok("registered"))]);
        let result = classifier(lookup.clone()).classify("paypa1.com").await;

        assert_eq!(result.verdict, Verdict::LikelyPhishing);
        assert_eq!(result.rule, rules::TYPOSQUAT);
        assert_eq!(lookup.calls(), 0);
    }

    #[tokio::test]
    async fn test_digit_run_in_email_domain() {
        let lookup = FakeLookup::new(&[("pay4567.com", Ok("registered"))]);
        let result = classifier(lookup.clone()).classify("x@pay4567.com").await;

        assert_eq!(result.verdict, Verdict::LikelyPhishing);
        assert_eq!(result.evidence, Evidence::None);
        assert_eq!(result.rule, rules::SUSPICIOUS_PATTERN);
        assert_eq!(lookup.calls(), 0);
    }

    #[tokio::test]
    async fn test_ip_literal_email_is_invalid() {
        let lookup = FakeLookup::new(&[]);
        let result = classifier(lookup.clone()).classify("user@[127.0.0.1]").await;

        assert_eq!(result.verdict, Verdict::InvalidInput);
        assert_eq!(result.rule, rules::EXTRACTION);
        assert_eq!(lookup.calls(), 0);
    }

    #[tokio::test]
    async fn test_invalid_email() {
        let result = classifier(FakeLookup::new(&[])).classify("not-an-email@").await;

        assert_eq!(result.verdict, Verdict::InvalidInput);
        assert!(result.evidence.is_error());
        assert!(!result.evidence.as_str().is_empty());
    }

    #[tokio::test]
    async fn test_empty_input_is_invalid() {
        let lookup = FakeLookup::new(&[]);
        let result = classifier(lookup.clone()).classify("").await;

        assert_eq!(result.verdict, Verdict::InvalidInput);
        assert_eq!(result.rule, rules::EXTRACTION);
        assert_eq!(lookup.calls(), 0);
    }

    #[tokio::test]
    async fn test_not_registered() {
        let lookup = FakeLookup::new(&[("unregistered-example123.net", Ok(NOT_REGISTERED))]);
        let result = classifier(lookup.clone()).classify("unregistered-example123.net").await;

        assert_eq!(result.verdict, Verdict::LikelyPhishing);
        assert_eq!(result.evidence.as_str(), "not registered");
        assert_eq!(result.rule, rules::REGISTRATION);
        assert_eq!(lookup.calls(), 1);
    }

    #[tokio::test]
    async fn test_empty_registration_data_is_phishing() {
        let lookup = FakeLookup::new(&[("quiet.org", Ok(""))]);
        let result = classifier(lookup).classify("quiet.org").await;

        assert_eq!(result.verdict, Verdict::LikelyPhishing);
        assert_eq!(result.evidence, Evidence::Registration(String::new()));
    }

    #[tokio::test]
    async fn test_registered_domain_is_not_phishing() {
        let whois = r#"{"result":"registered","registrar":"Example Registrar"}"#;
        let lookup = FakeLookup::new(&[("rust-lang.org", Ok(whois))]);
        let result = classifier(lookup).classify("Alice@Rust-Lang.org").await;

        assert_eq!(result.verdict, Verdict::NotPhishing);
        assert_eq!(result.evidence.as_str(), whois);
    }

    #[tokio::test]
    async fn test_lookup_failure_is_phishing() {
        let lookup = FakeLookup::new(&[("example.org", Err(LookupError::Status(503)))]);
        let result = classifier(lookup).classify("example.org").await;

        assert_eq!(result.verdict, Verdict::LikelyPhishing);
        assert_eq!(result.evidence, Evidence::Error("received non-OK status code 503".to_string()));
    }

    #[tokio::test]
    async fn test_lookup_timeout_is_phishing() {
        let c = classifier(Arc::new(StalledLookup)).lookup_timeout(Duration::from_millis(50));
        let result = c.classify("example.org").await;

        assert_eq!(result.verdict, Verdict::LikelyPhishing);
        assert_eq!(
            result.evidence,
            Evidence::Error(LookupError::Timeout(Duration::from_millis(50)).to_string())
        );
    }

    #[tokio::test]
    async fn test_idempotent() {
        let lookup = FakeLookup::new(&[("example.org", Ok("registered"))]);
        let c = classifier(lookup);
        for input in ["example.org", "paypa1.com", "secure@example.com", "bad@", "user@amazon.com"] {
            assert_eq!(c.classify(input).await, c.classify(input).await);
        }
    }

    #[tokio::test]
    async fn test_custom_rule_chain() {
        // Without local rules every valid input goes to registration
        let lookup = FakeLookup::new(&[("paypal.com", Ok("registered"))]);
        let policy = Policy::with_allowed_domains(["paypal.com"]).unwrap();
        let c = DomainClassifier::with_rules(policy, Vec::new(), lookup.clone());

        let result = c.classify("paypal.com").await;
        assert_eq!(result.rule, rules::REGISTRATION);
        assert_eq!(lookup.calls(), 1);
    }
}
