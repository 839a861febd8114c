//! Classification Policy
//!
//! Allow-list and suspicious pattern tables. Immutable once built and shared
//! read-only between requests.

use regex::Regex;
use thiserror::Error;

// ============================================================================
// BUILT-IN PATTERNS
// ============================================================================

/// Suspicious keywords, matched case-insensitively against the whole identifier
pub const SUSPICIOUS_KEYWORDS: &[&str] = &[
    "secure", "update", "support", "alert",
    "account", "verify", "banking", "login",
];

/// Three or more consecutive digits, matched against email addresses only
pub const DIGIT_RUN_PATTERN: &str = r"\d{3,}";

#[derive(Debug, Error)]
pub enum PolicyError {
    #[error("allow-list must contain at least one domain")]
    EmptyAllowList,

    #[error("invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

// ============================================================================
// ALLOW-LIST
// ============================================================================

/// Ordered set of trusted domains
#[derive(Debug, Clone)]
pub struct AllowList {
    domains: Vec<String>,
}

impl AllowList {
    pub fn new<I, S>(domains: I) -> Result<Self, PolicyError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut list: Vec<String> = Vec::new();
        for domain in domains {
            let domain = domain.as_ref().trim().to_lowercase();
            if !domain.is_empty() && !list.contains(&domain) {
                list.push(domain);
            }
        }

        if list.is_empty() {
            return Err(PolicyError::EmptyAllowList);
        }
        Ok(Self { domains: list })
    }

    pub fn contains(&self, domain: &str) -> bool {
        self.domains.iter().any(|d| d == domain)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.domains.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.domains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }
}

// ============================================================================
// PATTERN SET
// ============================================================================

/// Which part of the subject a pattern inspects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternScope {
    /// Full normalized identifier
    Identifier,
    /// Full identifier, but only when it is an email address; never matches a bare domain
    Email,
}

#[derive(Debug, Clone)]
pub struct SuspiciousPattern {
    pub label: String,
    pub scope: PatternScope,
    regex: Regex,
}

impl SuspiciousPattern {
    pub fn new(pattern: &str, scope: PatternScope) -> Result<Self, PolicyError> {
        let regex = Regex::new(pattern).map_err(|source| PolicyError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(Self {
            label: pattern.to_string(),
            scope,
            regex,
        })
    }

    /// Case-insensitive keyword matcher
    pub fn keyword(keyword: &str) -> Result<Self, PolicyError> {
        let mut pattern = Self::new(&format!("(?i){}", regex::escape(keyword)), PatternScope::Identifier)?;
        pattern.label = keyword.to_string();
        Ok(pattern)
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

/// Ordered sequence of suspicious patterns
#[derive(Debug, Clone)]
pub struct PatternSet {
    patterns: Vec<SuspiciousPattern>,
}

impl PatternSet {
    pub fn new(patterns: Vec<SuspiciousPattern>) -> Self {
        Self { patterns }
    }

    /// Keyword list followed by the digit-run matcher
    pub fn builtin() -> Result<Self, PolicyError> {
        let mut patterns = SUSPICIOUS_KEYWORDS
            .iter()
            .map(|k| SuspiciousPattern::keyword(k))
            .collect::<Result<Vec<_>, _>>()?;
        patterns.push(SuspiciousPattern::new(DIGIT_RUN_PATTERN, PatternScope::Email)?);
        Ok(Self::new(patterns))
    }

    pub fn iter(&self) -> impl Iterator<Item = &SuspiciousPattern> {
        self.patterns.iter()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

// ============================================================================
// POLICY
// ============================================================================

/// Everything the local rules consult
#[derive(Debug, Clone)]
pub struct Policy {
    pub allow_list: AllowList,
    pub patterns: PatternSet,
}

impl Policy {
    pub fn new(allow_list: AllowList, patterns: PatternSet) -> Self {
        Self { allow_list, patterns }
    }

    /// Given allow-list with the built-in patterns
    pub fn with_allowed_domains<I, S>(domains: I) -> Result<Self, PolicyError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Ok(Self::new(AllowList::new(domains)?, PatternSet::builtin()?))
    }
}
