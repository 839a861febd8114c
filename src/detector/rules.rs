//! Classification Rules
//!
//! Each local rule maps a normalized subject to an optional verdict. The
//! classifier runs them in order and the first verdict wins; registration
//! lookup only runs when none of them decides.

use super::distance::levenshtein;
use super::policy::{PatternScope, Policy};
use super::types::{Subject, Verdict};

// ============================================================================
// RULE NAMES
// ============================================================================

pub const EXTRACTION: &str = "extraction";
pub const ALLOW_LIST: &str = "allow_list";
pub const SUSPICIOUS_PATTERN: &str = "suspicious_pattern";
pub const TYPOSQUAT: &str = "typosquat";
pub const REGISTRATION: &str = "registration";

/// Domains within this edit distance of a trusted domain are typosquats
pub const TYPOSQUAT_MAX_DISTANCE: usize = 2;

/// A pure decision step
pub trait Rule: Send + Sync {
    fn name(&self) -> &'static str;

    /// `Some` decides the classification, `None` passes to the next rule
    fn evaluate(&self, subject: &Subject, policy: &Policy) -> Option<Verdict>;
}

/// Default chain: allow-list, suspicious patterns, typosquat
pub fn default_rules() -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(AllowListRule),
        Box::new(SuspiciousPatternRule),
        Box::new(TyposquatRule),
    ]
}

// ============================================================================
// RULES
// ============================================================================

/// Exact match against a trusted domain
pub struct AllowListRule;

impl Rule for AllowListRule {
    fn name(&self) -> &'static str {
        ALLOW_LIST
    }

    fn evaluate(&self, subject: &Subject, policy: &Policy) -> Option<Verdict> {
        if policy.allow_list.contains(&subject.domain) {
            tracing::debug!("Domain is allow-listed: {}", subject.domain);
            return Some(Verdict::NotPhishing);
        }
        None
    }
}

/// Suspicious keywords or digit runs
pub struct SuspiciousPatternRule;

impl Rule for SuspiciousPatternRule {
    fn name(&self) -> &'static str {
        SUSPICIOUS_PATTERN
    }

    fn evaluate(&self, subject: &Subject, policy: &Policy) -> Option<Verdict> {
        for pattern in policy.patterns.iter() {
            let text = match pattern.scope {
                PatternScope::Identifier => Some(subject.identifier.as_str()),
                PatternScope::Email => subject
                    .local_part
                    .is_some()
                    .then_some(subject.identifier.as_str()),
            };

            if text.is_some_and(|t| pattern.is_match(t)) {
                tracing::debug!("Phishing pattern match found: {}", pattern.label);
                return Some(Verdict::LikelyPhishing);
            }
        }
        None
    }
}

/// Small edit distance from any trusted domain
pub struct TyposquatRule;

impl Rule for TyposquatRule {
    fn name(&self) -> &'static str {
        TYPOSQUAT
    }

    fn evaluate(&self, subject: &Subject, policy: &Policy) -> Option<Verdict> {
        let closest = policy
            .allow_list
            .iter()
            .map(|trusted| (trusted, levenshtein(&subject.domain, trusted)))
            .find(|(_, distance)| *distance <= TYPOSQUAT_MAX_DISTANCE);

        if let Some((trusted, distance)) = closest {
            tracing::debug!(
                "Domain {} is typosquatted (distance {} from {})",
                subject.domain, distance, trusted
            );
            return Some(Verdict::LikelyPhishing);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_ALLOWED_DOMAINS;
    use crate::detector::identifier::normalize;

    fn policy() -> Policy {
        Policy::with_allowed_domains(DEFAULT_ALLOWED_DOMAINS).unwrap()
    }

    fn eval(rule: &dyn Rule, identifier: &str) -> Option<Verdict> {
        rule.evaluate(&normalize(identifier).unwrap(), &policy())
    }

    #[test]
    fn test_allow_list_rule() {
        assert_eq!(eval(&AllowListRule, "user@paypal.com"), Some(Verdict::NotPhishing));
        assert_eq!(eval(&AllowListRule, "google.com"), Some(Verdict::NotPhishing));
        assert_eq!(eval(&AllowListRule, "mail.google.com"), None);
    }

    #[test]
    fn test_keyword_matches_anywhere_in_identifier() {
        assert_eq!(eval(&SuspiciousPatternRule, "secure-update@example.com"), Some(Verdict::LikelyPhishing));
        assert_eq!(eval(&SuspiciousPatternRule, "alice@account-center.io"), Some(Verdict::LikelyPhishing));
        assert_eq!(eval(&SuspiciousPatternRule, "VerifyNow.biz"), Some(Verdict::LikelyPhishing));
        assert_eq!(eval(&SuspiciousPatternRule, "alice@example.com"), None);
    }

    #[test]
    fn test_digit_run_checks_whole_email_address() {
        assert_eq!(eval(&SuspiciousPatternRule, "user48213@example.com"), Some(Verdict::LikelyPhishing));
        assert_eq!(eval(&SuspiciousPatternRule, "x@pay4567.com"), Some(Verdict::LikelyPhishing));
        assert_eq!(eval(&SuspiciousPatternRule, "user48@example.com"), None);
    }

    #[test]
    fn test_digit_run_skips_bare_domains() {
        assert_eq!(eval(&SuspiciousPatternRule, "unregistered-example123.net"), None);
        assert_eq!(eval(&SuspiciousPatternRule, "pay4567.com"), None);
    }

    #[test]
    fn test_typosquat_rule() {
        assert_eq!(eval(&TyposquatRule, "paypa1.com"), Some(Verdict::LikelyPhishing));
        assert_eq!(eval(&TyposquatRule, "someone@amaz0n.co"), Some(Verdict::LikelyPhishing));
        assert_eq!(eval(&TyposquatRule, "gooogle.comm"), Some(Verdict::LikelyPhishing));
        assert_eq!(eval(&TyposquatRule, "rust-lang.org"), None);
    }

    #[test]
    fn test_default_rule_order() {
        let names: Vec<_> = default_rules().iter().map(|r| r.name()).collect();
        assert_eq!(names, vec![ALLOW_LIST, SUSPICIOUS_PATTERN, TYPOSQUAT]);
    }
}
