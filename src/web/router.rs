//! Web application router and middleware setup.

use crate::error::Result;
use crate::metrics::SmcExporter;
use crate::web::config::WebConfig;
use crate::web::handlers::{self, AppState};
use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Create the axum application with all routes and middleware.
pub fn create_app(config: &WebConfig, exporter: Arc<SmcExporter>) -> Result<Router> {
    config.validate()?;

    let state = AppState {
        exporter,
        telemetry_path: config.telemetry_path.clone(),
    };

    let app = Router::new()
        .route(&config.telemetry_path, get(handlers::metrics))
        .route("/health", get(handlers::health_check))
        .route("/", get(handlers::index))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    Ok(app)
}
