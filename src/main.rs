//! PhishGuard server entry point

use std::net::SocketAddr;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use phishguard::config::{Config, LogFormat};
use phishguard::{create_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env before anything reads the environment
    dotenvy::dotenv().ok();

    // Initialize logging
    init_tracing(LogFormat::from_env());

    tracing::info!("PhishGuard server starting...");

    // Validate configuration before accepting traffic
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Configuration error: {}", e);
            return Err(e).context("failed to load configuration");
        }
    };

    tracing::info!(
        environment = %config.environment,
        production = config.is_production(),
        "WHOIS endpoint: {} (timeout {:?})",
        config.whois_api_url,
        config.whois_timeout
    );
    tracing::info!("Allow-list: {}", config.allowed_domains.join(", "));

    // Build application state
    let state = AppState::from_config(&config).context("failed to build application state")?;

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    tracing::info!("🚀 Server listening on http://{}", addr);

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}

fn init_tracing(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "phishguard=debug,tower_http=debug".into());

    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}
