//! Main entry point for the hims application.
//!
//! Resolves configuration from the environment once at startup, builds the
//! core configuration, and serves the REST API.

use std::path::PathBuf;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hims_api_rest::AppState;
use hims_core::{CoreConfig, DEFAULT_DATA_DIR};

/// Main entry point for the hims REST server
///
/// # Environment Variables
/// - `HIMS_ADDR`: REST server address (default: "0.0.0.0:3000")
/// - `HIMS_DATA_DIR`: Directory for record storage (default: "hims_data")
/// - `HIMS_FACILITY`: Facility namespace stamped into configuration (default: "hims.local")
///
/// # Returns
/// * `Ok(())` - If the server starts and runs successfully
/// * `Err(anyhow::Error)` - If configuration or server startup fails
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive("hims=info".parse()?))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr = std::env::var("HIMS_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());
    let data_dir = std::env::var("HIMS_DATA_DIR").unwrap_or_else(|_| DEFAULT_DATA_DIR.into());
    let facility = std::env::var("HIMS_FACILITY").unwrap_or_else(|_| "hims.local".into());

    let cfg = Arc::new(CoreConfig::new(PathBuf::from(data_dir), facility)?);

    tracing::info!("++ Starting hims REST on {}", addr);

    let app = hims_api_rest::router(AppState::new(cfg));

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
