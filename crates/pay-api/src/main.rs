//! # Nuvei Gateway
//!
//! HTTP facade over the Nuvei payment gateway.
//!
//! ## Usage
//!
//! ```bash
//! # Set environment variables
//! export MERCHANT_ID=...
//! export MERCHANT_SITE_ID=...
//! export SECRET_KEY=...
//! export NUVEI_ENV=int   # or prod
//!
//! # Run the server
//! nuvei-gateway
//! ```

use pay_api::{routes, state::AppState};
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    // Initialize application state
    let state = AppState::new()?;

    let addr = state.config.socket_addr()?;

    info!("Gateway environment: {}", state.credentials.environment);
    info!("Merchant: {}/{}", state.credentials.merchant_id, state.credentials.merchant_site_id);
    info!("Payment provider: {}", state.gateway.provider_name());

    // Create router
    let app = routes::create_router(state);

    // Start server
    info!("Server is running on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
