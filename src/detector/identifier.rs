//! Identifier normalization and domain extraction

use thiserror::Error;
use validator::ValidateEmail;

use super::types::Subject;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("identifier is empty")]
    Empty,

    #[error("invalid email format: {0}")]
    InvalidEmail(String),

    #[error("invalid domain: '{0}'")]
    InvalidDomain(String),
}

/// Lowercase the identifier and split out the domain to check.
///
/// Email addresses must pass mail-address syntax validation; the domain is
/// whatever follows the last `@`. Anything without `@` is taken as a domain.
pub fn normalize(identifier: &str) -> Result<Subject, InputError> {
    let identifier = identifier.to_lowercase();
    if identifier.is_empty() {
        return Err(InputError::Empty);
    }

    let (local_part, domain) = match identifier.rsplit_once('@') {
        Some((local, domain)) => {
            if !identifier.validate_email() {
                return Err(InputError::InvalidEmail(identifier));
            }
            (Some(local.to_string()), domain.to_string())
        }
        None => (None, identifier.clone()),
    };

    if !is_plausible_domain(&domain) {
        return Err(InputError::InvalidDomain(domain));
    }

    Ok(Subject {
        identifier,
        local_part,
        domain,
    })
}

/// Non-empty labels separated by dots, at least two of them. Labels hold only
/// letters, digits and hyphens, which rules out address literals like `[127.0.0.1]`.
fn is_plausible_domain(domain: &str) -> bool {
    if !domain.chars().all(|c| c.is_alphanumeric() || c == '-' || c == '.') {
        return false;
    }
    let mut labels = domain.split('.');
    let all_non_empty = labels.clone().all(|label| !label.is_empty());
    all_non_empty && labels.nth(1).is_some()
}
