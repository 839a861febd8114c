//! Domain validation handler

use axum::{extract::{Query, State}, Json};
use serde::{Deserialize, Serialize};

use crate::detector::{Classification, Evidence};
use crate::{AppError, AppResult, AppState};

#[derive(Debug, Deserialize)]
pub struct ValidateDomainQuery {
    pub domain: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ValidateDomainResponse {
    pub domain: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub whois_data: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub phishing_status: &'static str,
    pub rule: &'static str,
}

impl ValidateDomainResponse {
    fn new(domain: String, result: Classification) -> Self {
        let (whois_data, error) = match result.evidence {
            Evidence::None => (None, None),
            Evidence::Registration(text) if text.is_empty() => (None, None),
            Evidence::Registration(text) => (Some(text), None),
            Evidence::Error(msg) => (None, Some(msg)),
        };

        Self {
            domain,
            whois_data,
            error,
            phishing_status: result.verdict.as_str(),
            rule: result.rule,
        }
    }
}

/// GET /validate-domain?domain=<email or domain>
pub async fn validate(
    State(state): State<AppState>,
    Query(query): Query<ValidateDomainQuery>,
) -> AppResult<Json<ValidateDomainResponse>> {
    let domain = query
        .domain
        .filter(|d| !d.is_empty())
        .ok_or_else(|| AppError::ValidationError("Domain is required".to_string()))?;

    let result = state.classifier.classify(&domain).await;

    Ok(Json(ValidateDomainResponse::new(domain, result)))
}
