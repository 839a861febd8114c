//! PhishGuard
//!
//! Heuristic phishing checker for email addresses and domains, served over
//! HTTP next to a small in-memory shot records API.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                        PHISHGUARD                        │
//! ├──────────────────────────────────────────────────────────┤
//! │  ┌────────────┐   ┌──────────────────┐   ┌────────────┐  │
//! │  │  API       │──▶│ DomainClassifier │──▶│ WHOIS API  │  │
//! │  │  (Axum)    │   │ (ordered rules)  │   │ (reqwest)  │  │
//! │  └─────┬──────┘   └──────────────────┘   └────────────┘  │
//! │        ▼                                                 │
//! │  ┌────────────┐                                          │
//! │  │ ShotStore  │                                          │
//! │  └────────────┘                                          │
//! └──────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod detector;
pub mod error;
pub mod handlers;
pub mod models;
pub mod whois;

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub use error::{AppError, AppResult, StartupError};

use config::Config;
use detector::{DomainClassifier, Policy};
use models::ShotStore;
use whois::{RegistrationLookup, WhoisClient};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub classifier: Arc<DomainClassifier>,
    pub shots: Arc<ShotStore>,
}

impl AppState {
    pub fn new(classifier: DomainClassifier, shots: ShotStore) -> Self {
        Self {
            classifier: Arc::new(classifier),
            shots: Arc::new(shots),
        }
    }

    /// Build state from validated configuration, using the WHOIS API for lookups
    pub fn from_config(config: &Config) -> Result<Self, StartupError> {
        let whois = WhoisClient::new(
            &config.whois_api_url,
            &config.whois_api_key,
            config.whois_timeout,
        )?;
        Self::with_lookup(config, Arc::new(whois))
    }

    pub fn with_lookup(
        config: &Config,
        lookup: Arc<dyn RegistrationLookup>,
    ) -> Result<Self, StartupError> {
        let policy = Policy::with_allowed_domains(&config.allowed_domains)?;
        let classifier = DomainClassifier::new(policy, lookup).lookup_timeout(config.whois_timeout);
        Ok(Self::new(classifier, ShotStore::seeded()))
    }
}

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::check))
        .route("/validate-domain", get(handlers::domain::validate))
        .route("/shots", get(handlers::shots::list).post(handlers::shots::create))
        .route("/shots/:player_id", get(handlers::shots::by_player))
        .fallback(handlers::not_found)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        )
        .with_state(state)
}
