//! HTTP handlers for the exporter endpoints.

use crate::metrics::sink::TEXT_CONTENT_TYPE;
use crate::metrics::SmcExporter;
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{Html, IntoResponse, Json, Response},
};
use serde_json::json;
use std::sync::Arc;
use tracing::error;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub exporter: Arc<SmcExporter>,
    pub telemetry_path: String,
}

/// Run one collection pass and return it as Prometheus text.
pub async fn metrics(State(state): State<AppState>) -> Response {
    let exporter = state.exporter.clone();
    // Hardware reads block, keep them off the async workers
    match tokio::task::spawn_blocking(move || exporter.render_text()).await {
        Ok(Ok(body)) => ([(header::CONTENT_TYPE, TEXT_CONTENT_TYPE)], body).into_response(),
        Ok(Err(e)) => {
            error!("Failed to render metrics: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
        Err(e) => {
            error!("Collection pass failed: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// Health check endpoint.
pub async fn health_check(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "service": "smc-exporter",
        "version": env!("CARGO_PKG_VERSION"),
        "backend": state.exporter.backend_name(),
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// Landing page linking to the metrics path.
pub async fn index(State(state): State<AppState>) -> Html<String> {
    Html(format!(
        r#"<html>
<head><title>SMC Exporter</title></head>
<body>
<h1>SMC Exporter</h1>
<p>Backend: {}</p>
<p><a href="{}">Metrics</a></p>
</body>
</html>"#,
        state.exporter.backend_name(),
        state.telemetry_path
    ))
}
