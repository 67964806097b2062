//! HTTP surface for the SMC exporter.
//!
//! Serves the metrics path, a small landing page and a health check. Every
//! request to the metrics path triggers one fresh collection pass.

pub mod config;
pub mod handlers;
pub mod router;

// Re-export commonly used items
pub use config::WebConfig;
pub use router::create_app;

use crate::error::{Result, SmcError};
use crate::metrics::SmcExporter;
use std::sync::Arc;
use tracing::info;

/// Start the web server and run until Ctrl-C, then close the session.
pub async fn start_web_server(config: WebConfig, exporter: Arc<SmcExporter>) -> Result<()> {
    let app = create_app(&config, exporter.clone())?;
    let addr = config.bind_address()?;

    info!("Starting SMC exporter on http://{}", addr);
    info!("Metrics available at http://{}{}", addr, config.telemetry_path);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| SmcError::web_server_error(format!("Failed to bind to address: {}", e)))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| SmcError::web_server_error(format!("Server error: {}", e)))?;

    info!("Shutting down, closing SMC session");
    exporter.close();
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
