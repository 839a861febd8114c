//! Registration lookup - WHOIS API client
//!
//! Sends an authenticated GET to the registration-data API and hands back the
//! raw response body. No schema parsing and no caching.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

/// Sentinel body meaning the domain has no registration
pub const NOT_REGISTERED: &str = "not registered";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("error making request: {0}")]
    Request(String),

    #[error("received non-OK status code {0}")]
    Status(u16),

    #[error("error reading response body: {0}")]
    Body(String),

    #[error("lookup timed out after {0:?}")]
    Timeout(Duration),
}

/// Source of domain registration data
#[async_trait]
pub trait RegistrationLookup: Send + Sync {
    /// Raw registration text for `domain`
    async fn lookup(&self, domain: &str) -> Result<String, LookupError>;
}

/// HTTP client for the WHOIS API
#[derive(Debug, Clone)]
pub struct WhoisClient {
    http: reqwest::Client,
    api_url: String,
    api_key: String,
    timeout: Duration,
}

impl WhoisClient {
    pub fn new(api_url: &str, api_key: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("phishguard/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            api_url: api_url.to_string(),
            api_key: api_key.to_string(),
            timeout,
        })
    }

    fn map_send_error(&self, err: reqwest::Error) -> LookupError {
        if err.is_timeout() {
            LookupError::Timeout(self.timeout)
        } else {
            LookupError::Request(err.to_string())
        }
    }
}

#[async_trait]
impl RegistrationLookup for WhoisClient {
    async fn lookup(&self, domain: &str) -> Result<String, LookupError> {
        let response = self
            .http
            .get(&self.api_url)
            .query(&[("domain", domain)])
            .header("apikey", &self.api_key)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        tracing::debug!("WHOIS request for {} returned {}", domain, status.as_u16());

        if !status.is_success() {
            return Err(LookupError::Status(status.as_u16()));
        }

        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                LookupError::Timeout(self.timeout)
            } else {
                LookupError::Body(e.to_string())
            }
        })?;

        tracing::trace!("WHOIS response body for {}: {}", domain, body);
        Ok(body)
    }
}
