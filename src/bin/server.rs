//! Trainplan HTTP Server Binary
//!
//! This is the main entry point for the training-plan REST API server.
//! It initializes the repository and auth provider, sets up the HTTP router,
//! and starts serving requests.
//!
//! # Usage
//!
//! ```bash
//! # Run with local (in-memory) repository and auth (default)
//! cargo run --bin trainplan-server --features "local-repo,http-server"
//!
//! # Run against the hosted platform's row and auth APIs
//! PLATFORM_URL=https://project.example.co \
//! SERVICE_ROLE_KEY=... ANON_KEY=... \
//!   cargo run --bin trainplan-server --features "remote-repo,http-server"
//! ```
//!
//! # Environment Variables
//!
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8080)
//! - `PLATFORM_URL`: Hosted project base URL (required for remote-repo)
//! - `SERVICE_ROLE_KEY`: Service-role API key (required for remote-repo)
//! - `ANON_KEY`: Anonymous API key (required for remote-repo)
//! - `SITE_URL`: Front-end URL used in recovery redirects
//! - `INVITE_TTL_HOURS`: Invitation token lifetime (default: 72)
//! - `RUST_LOG`: Log level (default: info)

use std::env;
use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use trainplan::db;
use trainplan::http::{create_router, AppState};
use trainplan::platform::{AuthProvider, InviteSettings, LocalAuthProvider};

fn build_auth_provider() -> anyhow::Result<Arc<dyn AuthProvider>> {
    #[cfg(feature = "remote-repo")]
    if env::var("PLATFORM_URL").is_ok() {
        let config = trainplan::platform::PlatformConfig::from_env()
            .map_err(|e| anyhow::anyhow!(e))?;
        info!("Using hosted auth platform at {}", config.base_url);
        return Ok(Arc::new(trainplan::platform::HttpAuthProvider::new(config)?));
    }

    info!("Using in-memory auth provider");
    Ok(Arc::new(LocalAuthProvider::new()))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("Starting Trainplan HTTP Server");

    // Initialize global repository once and reuse it across the app
    db::init_repository().map_err(|e| anyhow::anyhow!(e))?;
    let repository = std::sync::Arc::clone(db::get_repository()?);
    info!("Repository initialized successfully");

    let auth = build_auth_provider()?;
    let invites = InviteSettings::from_env();

    // Provision the avatar bucket when running against the hosted platform.
    #[cfg(feature = "remote-repo")]
    if env::var("PLATFORM_URL").is_ok() {
        let config = trainplan::platform::PlatformConfig::from_env()
            .map_err(|e| anyhow::anyhow!(e))?;
        trainplan::platform::storage::ensure_avatar_bucket(&config).await?;
        info!("Avatar bucket verified");
    }

    // Create application state
    let state = AppState::new(repository, auth, invites);

    // Create router with all endpoints
    let app = create_router(state);

    // Determine bind address
    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(8080);
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;

    info!("Server listening on http://{}", addr);

    // Start the server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
