//! Configuration module

use std::env;
use std::time::Duration;

use thiserror::Error;

/// Default registration lookup endpoint
pub const DEFAULT_WHOIS_API_URL: &str = "https://api.apilayer.com/whois/check";

/// Domains trusted without further checks unless `ALLOWED_DOMAINS` overrides them
pub const DEFAULT_ALLOWED_DOMAINS: &[&str] = &[
    "paypal.com",
    "amazon.com",
    "bankofamerica.com",
    "google.com",
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("required environment variable {0} is missing")]
    Missing(&'static str),

    #[error("environment variable {name} has invalid value '{value}'")]
    Invalid { name: &'static str, value: String },
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl LogFormat {
    /// Read `LOG_FORMAT` directly; logging starts before the rest of the config is validated
    pub fn from_env() -> Self {
        match env::var("LOG_FORMAT") {
            Ok(v) if v.eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Text,
        }
    }
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,

    /// Environment (development, production)
    pub environment: String,

    /// API key for the registration lookup service
    pub whois_api_key: String,

    /// Registration lookup endpoint
    pub whois_api_url: String,

    /// Upper bound on a single registration lookup
    pub whois_timeout: Duration,

    /// Trusted domains, lowercase, in configured order
    pub allowed_domains: Vec<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|name| env::var(name).ok())
    }

    /// Load configuration from an arbitrary variable source
    pub fn from_vars<F>(var: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let whois_api_key = var("WHOIS_API_KEY")
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .ok_or(ConfigError::Missing("WHOIS_API_KEY"))?;

        let port = match var("PORT") {
            Some(p) => p.trim().parse().map_err(|_| ConfigError::Invalid {
                name: "PORT",
                value: p,
            })?,
            None => 8080,
        };

        let whois_timeout = match var("WHOIS_TIMEOUT_SECS") {
            Some(s) => match s.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    return Err(ConfigError::Invalid {
                        name: "WHOIS_TIMEOUT_SECS",
                        value: s,
                    })
                }
            },
            None => Duration::from_secs(10),
        };

        let allowed_domains = match var("ALLOWED_DOMAINS") {
            Some(list) => {
                let domains: Vec<String> = list
                    .split(',')
                    .map(|d| d.trim().to_lowercase())
                    .filter(|d| !d.is_empty())
                    .collect();
                if domains.is_empty() {
                    return Err(ConfigError::Invalid {
                        name: "ALLOWED_DOMAINS",
                        value: list,
                    });
                }
                domains
            }
            None => DEFAULT_ALLOWED_DOMAINS.iter().map(|d| d.to_string()).collect(),
        };

        Ok(Self {
            port,
            environment: var("ENVIRONMENT").unwrap_or_else(|| "development".to_string()),
            whois_api_key,
            whois_api_url: var("WHOIS_API_URL")
                .unwrap_or_else(|| DEFAULT_WHOIS_API_URL.to_string()),
            whois_timeout,
            allowed_domains,
        })
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}
