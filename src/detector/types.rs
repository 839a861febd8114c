//! Detector Types
//!
//! Data structures only. Classification logic lives in `classifier` and `rules`.

use serde::Serialize;

// ============================================================================
// VERDICT
// ============================================================================

/// Outcome of classifying one identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    NotPhishing,
    LikelyPhishing,
    InvalidInput,
}

impl Verdict {
    /// Literal used on the HTTP boundary
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::NotPhishing => "not phishing",
            Verdict::LikelyPhishing => "likely phishing",
            Verdict::InvalidInput => "invalid input",
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// EVIDENCE
// ============================================================================

/// What backs a verdict
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Evidence {
    /// Decided by a local rule, nothing to show
    None,
    /// Raw registration lookup text, verbatim (may be empty)
    Registration(String),
    /// Input format or lookup failure detail
    Error(String),
}

impl Evidence {
    /// Evidence as a flat string; empty for `Evidence::None`
    pub fn as_str(&self) -> &str {
        match self {
            Evidence::None => "",
            Evidence::Registration(text) | Evidence::Error(text) => text,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Evidence::Error(_))
    }
}

// ============================================================================
// SUBJECT / RESULT
// ============================================================================

/// Normalized identifier handed to each rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subject {
    /// Full lowercase identifier
    pub identifier: String,
    /// Part before the last `@`, for email addresses
    pub local_part: Option<String>,
    /// Domain checked against the allow-list and registration lookup
    pub domain: String,
}

/// Result of one classification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub verdict: Verdict,
    pub evidence: Evidence,
    /// Name of the rule that decided
    pub rule: &'static str,
}

impl Classification {
    pub fn new(verdict: Verdict, evidence: Evidence, rule: &'static str) -> Self {
        Self { verdict, evidence, rule }
    }
}
