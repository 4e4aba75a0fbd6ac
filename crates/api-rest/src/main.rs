//! Standalone REST API server binary.
//!
//! ## Purpose
//! Runs the REST API server on its own.
//!
//! ## Intended use
//! Useful for development and debugging when you only want the REST
//! server (with OpenAPI/Swagger UI). The workspace's main `hims-run`
//! binary is the production entry point.

use std::path::PathBuf;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hims_api_rest::{router, AppState};
use hims_core::{CoreConfig, DEFAULT_DATA_DIR};

/// Main entry point for the standalone hims REST API server
///
/// # Environment Variables
/// - `HIMS_REST_ADDR`: Server address (default: "0.0.0.0:3000")
/// - `HIMS_DATA_DIR`: Directory for record storage (default: "hims_data")
/// - `HIMS_FACILITY`: Facility namespace (default: "hims.dev")
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - the core configuration is invalid, or
/// - the server address cannot be bound.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("hims_api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr = std::env::var("HIMS_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());
    let data_dir = std::env::var("HIMS_DATA_DIR").unwrap_or_else(|_| DEFAULT_DATA_DIR.into());
    let facility = std::env::var("HIMS_FACILITY").unwrap_or_else(|_| "hims.dev".into());

    tracing::info!("-- Starting hims REST API on {}", addr);

    let cfg = Arc::new(CoreConfig::new(PathBuf::from(data_dir), facility)?);
    let app = router(AppState::new(cfg));

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
